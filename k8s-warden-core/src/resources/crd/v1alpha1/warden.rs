use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "k8s-warden.dev",
    version = "v1alpha1",
    kind = "Warden",
    namespaced,
    status = "WardenStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct WardenSpec {
    /// toggles for optional, separately reconciled subsystems
    #[serde(default)]
    pub feature_gates: WardenFeatureGates,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardenFeatureGates {
    /// rolls out the tenant-quota subsystem when set
    #[serde(default)]
    pub enable_tenant_quota: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardenStatus {
    /// identities of the managed resources reconciled for this warden
    pub related_objects: Option<Vec<ObjectRef>>,
}

/// Identity of one managed resource as projected into the parent status.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
}
