pub mod disable_quota;
pub mod enable_quota;
pub mod export_crds;
