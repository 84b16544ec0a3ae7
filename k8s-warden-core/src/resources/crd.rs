pub mod monitoring;
pub mod v1alpha1;
