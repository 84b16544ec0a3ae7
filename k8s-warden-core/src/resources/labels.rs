use std::collections::BTreeMap;

pub const WORKER_NODE_LABEL: &str = "node-role.kubernetes.io/worker";

/// Canonical label set carried by every managed monitoring resource.
/// The drift reconciler replaces any diverging label map with this one
/// wholesale, so additions here propagate to the cluster on the next pass.
pub fn get_monitoring_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app.kubernetes.io/name".to_owned(), "k8s-warden".to_owned()),
        ("app.kubernetes.io/component".to_owned(), "monitoring".to_owned()),
        ("app.kubernetes.io/managed-by".to_owned(), "k8s-warden-agent".to_owned()),
    ])
}

/// Pod selector for the agent deployment, targeted by the metrics service.
pub fn get_agent_selector_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app.kubernetes.io/name".to_owned(), "k8s-warden".to_owned()),
        ("app.kubernetes.io/component".to_owned(), "agent".to_owned()),
    ])
}

/// Labels identifying the tenant-quota subsystem's workloads. The subsystem
/// is reconciled by its own controller; this crate only observes it.
pub fn get_quota_workload_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app.kubernetes.io/component".to_owned(), "tenant-quota".to_owned()),
    ])
}

pub fn get_joined_quota_workload_labels() -> String {
    "app.kubernetes.io/component=tenant-quota".to_owned()
}
