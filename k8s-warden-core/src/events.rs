use std::sync::Arc;

use kube::runtime::events::{Event, EventType, Recorder};
use log::warn;

/// Reasons attached to managed-resource lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventReason {
    Created,
    Updated,
}

impl EventReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventReason::Created => "Created",
            EventReason::Updated => "Updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSeverity {
    Normal,
    Warning,
}

/// One notification about a managed-resource mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub severity: EventSeverity,
    pub reason: EventReason,
    pub message: String,
}

impl EventRecord {
    pub fn created(kind: &str, name: &str) -> Self {
        Self {
            severity: EventSeverity::Normal,
            reason: EventReason::Created,
            message: format!("Created {kind} {name}"),
        }
    }

    pub fn updated(kind: &str, name: &str) -> Self {
        Self {
            severity: EventSeverity::Normal,
            reason: EventReason::Updated,
            message: format!("Updated {kind} {name}"),
        }
    }
}

/// Fire-and-forget notification sink. Implementations must never fail the
/// reconcile pass on delivery problems.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EventRecord);
}

/// Publishes events through the cluster event API, attributed to the parent
/// object the recorder was built for.
#[derive(Clone)]
pub struct RecorderSink {
    recorder: Arc<Recorder>,
}

impl RecorderSink {
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder: Arc::new(recorder),
        }
    }
}

impl EventSink for RecorderSink {
    fn emit(&self, event: EventRecord) {
        let recorder = self.recorder.clone();

        tokio::spawn(async move {
            let published = recorder
                .publish(Event {
                    type_: match event.severity {
                        EventSeverity::Normal => EventType::Normal,
                        EventSeverity::Warning => EventType::Warning,
                    },
                    reason: event.reason.as_str().to_owned(),
                    note: Some(event.message.clone()),
                    action: "Reconcile".to_owned(),
                    secondary: None,
                })
                .await;

            if let Err(error) = published {
                warn!("Couldn't publish the '{}' event! {error:?}", event.message);
            }
        });
    }
}
