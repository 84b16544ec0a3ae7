use std::time::Duration;

use derive_builder::Builder;
use json_patch::{PatchOperation, ReplaceOperation};
use k8s_openapi::api::{apps::v1::Deployment, core::v1::Node};
use log::info;
use thiserror::Error;
use tokio::time::{sleep, Instant};

use crate::{
    kubernetes::{is_not_found, store::ObjectStore},
    resources::{
        crd::v1alpha1::{
            tenant_quota::{derived_tenant_quota_name, TenantQuota},
            warden::Warden,
        },
        labels::{get_joined_quota_workload_labels, WORKER_NODE_LABEL},
    },
};

pub const FEATURE_GATE_PATH: &str = "/spec/featureGates/enableTenantQuota";

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60 * 5);
pub const DEFAULT_ENABLE_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_DISABLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum FeatureGateError {
    #[error("Clusters with a single worker node can't support the enableTenantQuota feature gate!")]
    SingleWorkerTopology,
    #[error("Timed out waiting for {awaiting}!")]
    WaitTimeout { awaiting: &'static str },
    #[error("Couldn't communicate with the cluster API! Reason: {}", .0)]
    KubeApiError(#[from] kube::Error),
}

/// Flips the tenant-quota feature gate on a parent object and waits until the
/// externally reconciled subsystem converges with the new setting.
#[derive(Builder)]
#[builder(pattern = "owned", setter(into))]
pub struct TenantQuotaGate<S: ObjectStore> {
    store: S,
    namespace: String,
    parent_name: String,
    #[builder(default = "DEFAULT_WAIT_TIMEOUT")]
    timeout: Duration,
    #[builder(default = "DEFAULT_ENABLE_POLL_INTERVAL")]
    enable_poll_interval: Duration,
    #[builder(default = "DEFAULT_DISABLE_POLL_INTERVAL")]
    disable_poll_interval: Duration,
}

impl<S: ObjectStore> TenantQuotaGate<S> {
    /// Patches the gate on the parent object, then waits (bounded by the
    /// configured timeout) until the subsystem resource reports available or
    /// is gone, depending on the direction of the toggle. Enabling is refused
    /// outright on single-worker clusters.
    pub async fn set_feature_gate(&self, enable: bool) -> Result<(), FeatureGateError> {
        if enable && self.is_single_worker_topology().await? {
            return Err(FeatureGateError::SingleWorkerTopology);
        }

        info!(
            "{} the tenant quota subsystem...",
            if enable { "Enabling" } else { "Disabling" }
        );

        self.store
            .patch_json::<Warden>(&self.namespace, &self.parent_name, &feature_gate_patch(enable))
            .await?;

        if enable {
            self.await_quota_available().await?;
            info!("Tenant quota subsystem is available!");
        } else {
            self.await_quota_removed().await?;
            info!("Tenant quota subsystem was removed!");
        }

        Ok(())
    }

    /// Workloads the subsystem controller brought up for this release.
    pub async fn quota_workloads(&self) -> Result<Vec<Deployment>, FeatureGateError> {
        let workloads = self
            .store
            .list::<Deployment>(&self.namespace, &get_joined_quota_workload_labels())
            .await?;

        Ok(workloads)
    }

    async fn is_single_worker_topology(&self) -> Result<bool, FeatureGateError> {
        let workers = self.store.list_cluster::<Node>(WORKER_NODE_LABEL).await?;

        Ok(workers.len() <= 1)
    }

    async fn await_quota_available(&self) -> Result<(), FeatureGateError> {
        let name = derived_tenant_quota_name(&self.parent_name);
        let deadline = Instant::now() + self.timeout;

        loop {
            // anything short of an available quota, errors included, keeps
            // the poll going until the deadline
            if let Ok(quota) = self.store.get::<TenantQuota>(&self.namespace, &name).await {
                if quota.is_available() {
                    return Ok(());
                }
            }

            self.sleep_or_time_out(
                deadline,
                self.enable_poll_interval,
                "the TenantQuota Available condition",
            )
            .await?;
        }
    }

    async fn await_quota_removed(&self) -> Result<(), FeatureGateError> {
        let name = derived_tenant_quota_name(&self.parent_name);
        let deadline = Instant::now() + self.timeout;

        loop {
            match self.store.get::<TenantQuota>(&self.namespace, &name).await {
                Err(error) if is_not_found(&error) => return Ok(()),
                Ok(_) | Err(_) => (),
            }

            self.sleep_or_time_out(deadline, self.disable_poll_interval, "the TenantQuota removal")
                .await?;
        }
    }

    async fn sleep_or_time_out(
        &self,
        deadline: Instant,
        interval: Duration,
        awaiting: &'static str,
    ) -> Result<(), FeatureGateError> {
        if Instant::now() + interval > deadline {
            return Err(FeatureGateError::WaitTimeout { awaiting });
        }

        sleep(interval).await;

        Ok(())
    }
}

fn feature_gate_patch(enable: bool) -> json_patch::Patch {
    json_patch::Patch(vec![PatchOperation::Replace(ReplaceOperation {
        path: FEATURE_GATE_PATH.to_owned(),
        value: serde_json::Value::Bool(enable),
    })])
}
