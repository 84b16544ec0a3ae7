use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const TENANT_QUOTA_NAME_PREFIX: &str = "tenant-quota";
pub const AVAILABLE_CONDITION: &str = "Available";

/// Name of the subsystem resource belonging to the given parent.
pub fn derived_tenant_quota_name(parent_name: &str) -> String {
    format!("{TENANT_QUOTA_NAME_PREFIX}-{parent_name}")
}

/// Binding for the tenant-quota subsystem's resource. The subsystem is
/// installed and reconciled by its own controller; this crate only flips the
/// feature gate on the parent and observes this resource converging.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "quota.k8s-warden.dev",
    version = "v1alpha1",
    kind = "TenantQuota",
    namespaced,
    status = "TenantQuotaStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct TenantQuotaSpec {
    /// restricts quota enforcement to namespaces matching these labels
    pub namespace_selector: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantQuotaStatus {
    pub conditions: Option<Vec<TenantQuotaCondition>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantQuotaCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl TenantQuota {
    /// true once the subsystem controller reports the resource serviceable
    pub fn is_available(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|status| status.conditions.as_ref())
            .map(|conditions| {
                conditions
                    .iter()
                    .any(|condition| {
                        condition.type_ == AVAILABLE_CONDITION && condition.status == "True"
                    })
            })
            .unwrap_or(false)
    }
}
