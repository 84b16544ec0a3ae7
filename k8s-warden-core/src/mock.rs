use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::{core::ErrorResponse, Resource};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    events::{EventRecord, EventSink},
    kubernetes::store::{ClusterObject, ObjectStore, StoreObject},
    resources::{
        crd::v1alpha1::warden::{Warden, WardenSpec},
        labels::WORKER_NODE_LABEL,
        release::WardenRelease,
        ParentRef,
    },
};

pub const TEST_NAMESPACE: &str = "warden-system";
pub const TEST_MONITORING_NAMESPACE: &str = "monitoring";
pub const TEST_PARENT_NAME: &str = "primary";
pub const TEST_PARENT_UID: &str = "b1aa8c1c-3c9b-4e19-8473-92b0a132d87a";

pub fn test_release() -> WardenRelease {
    WardenRelease {
        namespace: TEST_NAMESPACE.to_owned(),
        monitoring_namespace: TEST_MONITORING_NAMESPACE.to_owned(),
    }
}

pub fn test_parent() -> ParentRef {
    ParentRef::new(TEST_NAMESPACE, TEST_PARENT_NAME, TEST_PARENT_UID)
}

pub fn test_warden() -> Warden {
    let mut warden = Warden::new(TEST_PARENT_NAME, WardenSpec::default());
    warden.metadata.namespace = Some(TEST_NAMESPACE.to_owned());
    warden.metadata.uid = Some(TEST_PARENT_UID.to_owned());

    warden
}

pub fn worker_node(name: &str) -> Node {
    let mut node = Node::default();
    node.metadata.name = Some(name.to_owned());
    node.metadata.labels = Some(BTreeMap::from([(WORKER_NODE_LABEL.to_owned(), String::new())]));

    node
}

pub fn not_found_error() -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_owned(),
        message: "not found".to_owned(),
        reason: "NotFound".to_owned(),
        code: 404,
    })
}

pub fn server_error() -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_owned(),
        message: "the server choked".to_owned(),
        reason: "InternalError".to_owned(),
        code: 500,
    })
}

fn injected_error(message: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_owned(),
        message: message.to_owned(),
        reason: "InternalError".to_owned(),
        code: 500,
    })
}

type ObjectKey = (String, String, String);

/// In-memory stand-in for the cluster API, keyed by kind, namespace and name.
#[derive(Clone, Default)]
pub struct MockStore {
    objects: Arc<Mutex<BTreeMap<ObjectKey, Value>>>,
    create_failure: Arc<Mutex<Option<(String, String)>>>,
    get_failures: Arc<Mutex<u32>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed<K>(&self, object: &K)
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        let key = (
            K::kind(&()).into_owned(),
            object.meta().namespace.clone().unwrap_or_default(),
            object.meta().name.clone().unwrap_or_default(),
        );

        self.objects
            .lock()
            .unwrap()
            .insert(key, serde_json::to_value(object).unwrap());
    }

    pub fn stored<K>(&self, namespace: &str, name: &str) -> Option<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let key = (K::kind(&()).into_owned(), namespace.to_owned(), name.to_owned());

        self.objects
            .lock()
            .unwrap()
            .get(&key)
            .map(|value| serde_json::from_value(value.clone()).unwrap())
    }

    pub fn remove<K>(&self, namespace: &str, name: &str)
    where
        K: Resource<DynamicType = ()>,
    {
        let key = (K::kind(&()).into_owned(), namespace.to_owned(), name.to_owned());

        self.objects.lock().unwrap().remove(&key);
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Makes every create of the given kind fail with the given message.
    pub fn fail_creates_of(&self, kind: &str, message: &str) {
        *self.create_failure.lock().unwrap() = Some((kind.to_owned(), message.to_owned()));
    }

    /// Makes the next `count` gets fail with a server error.
    pub fn fail_next_gets(&self, count: u32) {
        *self.get_failures.lock().unwrap() = count;
    }

    fn matches_selector(value: &Value, label_selector: &str) -> bool {
        if label_selector.is_empty() {
            return true;
        }

        let Some(labels) = value.pointer("/metadata/labels").and_then(Value::as_object) else {
            return false;
        };

        label_selector.split(',').all(|requirement| {
            match requirement.split_once('=') {
                Some((key, expected)) => {
                    labels.get(key).and_then(Value::as_str) == Some(expected)
                }
                None => labels.contains_key(requirement),
            }
        })
    }

    fn list_matching<K: DeserializeOwned>(
        &self,
        kind: &str,
        namespace: Option<&str>,
        label_selector: &str,
    ) -> Vec<K> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|((object_kind, object_namespace, _), value)| {
                object_kind == kind
                    && namespace.map_or(true, |namespace| object_namespace == namespace)
                    && Self::matches_selector(value, label_selector)
            })
            .map(|(_, value)| serde_json::from_value(value.clone()).unwrap())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn get<K: StoreObject>(&self, namespace: &str, name: &str) -> Result<K, kube::Error> {
        {
            let mut remaining = self.get_failures.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(server_error());
            }
        }

        self.stored(namespace, name).ok_or_else(not_found_error)
    }

    async fn create<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error> {
        if let Some((kind, message)) = self.create_failure.lock().unwrap().as_ref() {
            if kind == K::kind(&()).as_ref() {
                return Err(injected_error(message));
            }
        }

        self.seed(object);

        Ok(())
    }

    async fn update<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error> {
        let namespace = object.meta().namespace.clone().unwrap_or_default();
        let name = object.meta().name.clone().unwrap_or_default();

        if self.stored::<K>(&namespace, &name).is_none() {
            return Err(not_found_error());
        }

        self.seed(object);

        Ok(())
    }

    async fn patch_json<K: StoreObject>(
        &self,
        namespace: &str,
        name: &str,
        patch: &json_patch::Patch,
    ) -> Result<(), kube::Error> {
        let key = (K::kind(&()).into_owned(), namespace.to_owned(), name.to_owned());
        let mut objects = self.objects.lock().unwrap();

        let Some(value) = objects.get_mut(&key) else {
            return Err(not_found_error());
        };

        json_patch::patch(value, patch).map_err(|error| {
            kube::Error::Api(ErrorResponse {
                status: "Failure".to_owned(),
                message: error.to_string(),
                reason: "Invalid".to_owned(),
                code: 422,
            })
        })?;

        Ok(())
    }

    async fn list<K: StoreObject>(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error> {
        Ok(self.list_matching(K::kind(&()).as_ref(), Some(namespace), label_selector))
    }

    async fn list_cluster<K: ClusterObject>(
        &self,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error> {
        Ok(self.list_matching(K::kind(&()).as_ref(), None, label_selector))
    }
}

/// Captures emitted events for inspection.
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<EventRecord> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for MockEventSink {
    fn emit(&self, event: EventRecord) {
        self.events.lock().unwrap().push(event);
    }
}
