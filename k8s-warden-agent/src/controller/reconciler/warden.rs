use std::{sync::Arc, time::Duration};

use k8s_warden_core::{
    events::RecorderSink,
    helpers::RequireMetadata,
    kubernetes::{operations::apply_resource_status, store::KubeStore},
    reconciler::{MonitoringReconciler, WardenRequest},
    resources::{
        crd::v1alpha1::warden::{Warden, WardenStatus},
        ParentRef,
    },
};
use kube::{
    api::PatchParams,
    runtime::{
        controller::Action,
        events::{Recorder, Reporter},
    },
    Client, Resource,
};

use crate::controller::CONTROLLER_FIELD_MANAGER;

use super::{context::ReconcilerContext, error::ReconcilerError};

const SUCCESS_REQUEUE_SECS: u64 = 60 * 5;

const DEFAULT_ERROR_REQUEUE_SECS: u64 = 10;
const MISSING_METADATA_REQUEUE_SECS: u64 = 60 * 5;

pub async fn reconcile_warden(
    object: Arc<Warden>,
    context: Arc<ReconcilerContext>,
) -> Result<Action, ReconcilerError> {
    try_reconcile(&object, &context).await?;

    Ok(Action::requeue(Duration::from_secs(SUCCESS_REQUEUE_SECS)))
}

pub fn reconcile_warden_error(
    _object: Arc<Warden>,
    error: &ReconcilerError,
    _context: Arc<ReconcilerContext>,
) -> Action {
    Action::requeue(match error {
        ReconcilerError::MissingObjectMetadata => {
            Duration::from_secs(MISSING_METADATA_REQUEUE_SECS)
        }
        _ => Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS),
    })
}

async fn try_reconcile(
    object: &Warden,
    context: &ReconcilerContext,
) -> Result<(), ReconcilerError> {
    let parent = ParentRef::new(
        object.require_namespace_or(ReconcilerError::MissingObjectMetadata)?,
        object.require_name_or(ReconcilerError::MissingObjectMetadata)?,
        object.require_uid_or(ReconcilerError::MissingObjectMetadata)?,
    );

    let reconciler = MonitoringReconciler::new(
        KubeStore::new(context.client.clone()),
        RecorderSink::new(create_recorder(&context.client, object)),
        context.release.clone(),
        parent.clone(),
    );

    reconciler
        .reconcile()
        .await
        .map_err(ReconcilerError::KubeApiError)?;

    let mut request = WardenRequest::new(object.clone());
    reconciler.update_related_objects(&mut request);

    if request.status_dirty {
        if let Some(status) = request.warden.status {
            apply_status(context, &parent, status).await?;
        }
    }

    Ok(())
}

fn create_recorder(client: &Client, object: &Warden) -> Recorder {
    Recorder::new(
        client.clone(),
        Reporter::from(CONTROLLER_FIELD_MANAGER.to_owned()),
        object.object_ref(&()),
    )
}

async fn apply_status(
    context: &ReconcilerContext,
    parent: &ParentRef,
    status: WardenStatus,
) -> Result<(), ReconcilerError> {
    apply_resource_status::<Warden, WardenStatus>(
        &context.client,
        status,
        &parent.name,
        &parent.namespace,
        &PatchParams::apply(CONTROLLER_FIELD_MANAGER),
    )
    .await
    .map_err(ReconcilerError::KubeApiError)?;

    Ok(())
}
