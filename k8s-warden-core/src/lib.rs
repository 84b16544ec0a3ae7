pub mod events;
pub mod featuregate;
pub mod helpers;
pub mod kubernetes;
pub mod reconciler;
pub mod resources;

#[cfg(test)]
pub(crate) mod mock;

pub const RESOURCE_GROUP: &str = "k8s-warden.dev";
pub const QUOTA_RESOURCE_GROUP: &str = "quota.k8s-warden.dev";

pub const DEFAULT_WARDEN_NAME: &str = "primary";
