use std::env::var;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::ObjectMeta;
use thiserror::Error;

use super::labels::get_monitoring_labels;

pub const NAMESPACE_ENV: &str = "KUBE_WARDEN_NAMESPACE";
pub const MONITORING_NAMESPACE_ENV: &str = "KUBE_WARDEN_MONITORING_NAMESPACE";

pub const DEFAULT_MONITORING_NAMESPACE: &str = "monitoring";

/// Process-wide deployment configuration for a warden installation.
#[derive(Debug, Clone)]
pub struct WardenRelease {
    /// namespace the parent resource and all managed resources live in
    pub namespace: String,
    /// namespace of the cluster scrape stack (prometheus service account)
    pub monitoring_namespace: String,
}

#[derive(Debug, Error)]
pub enum FromError {
    #[error("Env var unavailable: {}", .0)]
    VarUnset(std::env::VarError),
}

impl WardenRelease {
    pub fn from_env() -> Result<Self, FromError> {
        Ok(Self {
            namespace: var(NAMESPACE_ENV).map_err(FromError::VarUnset)?,
            monitoring_namespace: var(MONITORING_NAMESPACE_ENV)
                .unwrap_or_else(|_| DEFAULT_MONITORING_NAMESPACE.to_owned()),
        })
    }

    pub fn generate_monitoring_metadata(
        &self,
        name: &str,
        owner_reference: OwnerReference,
    ) -> ObjectMeta {
        ObjectMeta {
            labels: Some(get_monitoring_labels()),
            namespace: Some(self.namespace.to_owned()),
            name: Some(name.to_owned()),
            owner_references: Some(vec![owner_reference]),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::resources::{labels::get_monitoring_labels, ParentRef};

    use super::WardenRelease;

    #[test]
    fn generated_metadata_carries_identity_labels_and_owner() {
        let release = WardenRelease {
            namespace: "warden-system".to_owned(),
            monitoring_namespace: "monitoring".to_owned(),
        };
        let parent = ParentRef::new("warden-system", "primary", "2f9a33cd");

        let metadata = release.generate_monitoring_metadata("some-resource", parent.owner_ref());

        assert_eq!(metadata.name.as_deref(), Some("some-resource"));
        assert_eq!(metadata.namespace.as_deref(), Some("warden-system"));
        assert_eq!(metadata.labels, Some(get_monitoring_labels()));
        assert_eq!(metadata.owner_references, Some(vec![parent.owner_ref()]));
    }
}
