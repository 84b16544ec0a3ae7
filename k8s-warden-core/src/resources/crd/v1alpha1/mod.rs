use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

use self::{tenant_quota::TenantQuota, warden::Warden};

pub mod tenant_quota;
pub mod warden;

/// Definitions for every custom resource this crate owns, in install order.
pub fn v1alpha1_crds() -> Vec<CustomResourceDefinition> {
    vec![Warden::crd(), TenantQuota::crd()]
}
