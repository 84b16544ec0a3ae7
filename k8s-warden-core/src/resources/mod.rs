use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::Resource;

use self::crd::v1alpha1::warden::Warden;

pub mod crd;
pub mod labels;
pub mod monitoring;
pub mod release;

/// Identity of the parent Warden a reconcile pass runs for. Captured once
/// when the pass starts and immutable afterwards; every managed resource's
/// owner reference is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub namespace: String,
    pub name: String,
    pub uid: String,
}

impl ParentRef {
    pub fn new(namespace: &str, name: &str, uid: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            uid: uid.to_owned(),
        }
    }

    /// The single controller owner reference stamped on managed resources.
    pub fn owner_ref(&self) -> OwnerReference {
        OwnerReference {
            api_version: Warden::api_version(&()).into_owned(),
            kind: Warden::kind(&()).into_owned(),
            name: self.name.to_owned(),
            uid: self.uid.to_owned(),
            controller: Some(true),
            ..Default::default()
        }
    }
}
