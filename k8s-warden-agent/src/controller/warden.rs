use std::sync::Arc;

use futures::StreamExt;
use k8s_warden_core::resources::crd::{
    monitoring::{PrometheusRule, ServiceMonitor},
    v1alpha1::warden::Warden,
};
use k8s_openapi::api::{
    core::v1::Service,
    rbac::v1::{Role, RoleBinding},
};
use kube::runtime::{watcher::Config, Controller};
use log::{info, warn};

use crate::controller::reconciler::warden::{reconcile_warden, reconcile_warden_error};

use super::reconciler::context::ReconcilerContext;

pub async fn start_warden_controller(context: &Arc<ReconcilerContext>) {
    info!("Creating warden controller...");

    let watcher_config = Config::default();
    let controller = Controller::new(context.namespaced_api::<Warden>(), watcher_config.clone())
        .owns(
            context.namespaced_api::<PrometheusRule>(),
            watcher_config.clone(),
        )
        .owns(context.namespaced_api::<Role>(), watcher_config.clone())
        .owns(
            context.namespaced_api::<RoleBinding>(),
            watcher_config.clone(),
        )
        .owns(context.namespaced_api::<Service>(), watcher_config.clone())
        .owns(
            context.namespaced_api::<ServiceMonitor>(),
            watcher_config.clone(),
        )
        .shutdown_on_signal()
        .run(reconcile_warden, reconcile_warden_error, context.clone())
        .for_each(|warden| async move {
            match warden {
                Ok(o) => info!("Reconciled warden {:?}", o),
                Err(e) => warn!("Warden reconciliation failed: {:#?}", e),
            }
        });

    info!("Warden controller created!");

    controller.await
}
