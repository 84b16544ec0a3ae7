use k8s_openapi::api::{
    core::v1::Service,
    rbac::v1::{Role, RoleBinding},
};

use super::{
    crd::{
        monitoring::{PrometheusRule, ServiceMonitor},
        v1alpha1::warden::ObjectRef,
    },
    release::WardenRelease,
    ParentRef,
};

pub mod rbac;
pub mod rule;
pub mod service;
pub mod service_monitor;

pub const PROMETHEUS_RULE_NAME: &str = "k8s-warden-prometheus-rule";
pub const METRICS_ROLE_NAME: &str = "k8s-warden-metrics";
pub const METRICS_SERVICE_NAME: &str = "k8s-warden-operator-metrics";

pub const METRICS_PORT: i32 = 8443;
pub const METRICS_PORT_NAME: &str = "http-metrics";

/// Closed set of resource kinds the drift reconciler manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedKind {
    PrometheusRule,
    Role,
    RoleBinding,
    Service,
    ServiceMonitor,
}

impl ManagedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagedKind::PrometheusRule => "PrometheusRule",
            ManagedKind::Role => "Role",
            ManagedKind::RoleBinding => "RoleBinding",
            ManagedKind::Service => "Service",
            ManagedKind::ServiceMonitor => "ServiceMonitor",
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            ManagedKind::PrometheusRule | ManagedKind::ServiceMonitor => "monitoring.coreos.com/v1",
            ManagedKind::Role | ManagedKind::RoleBinding => "rbac.authorization.k8s.io/v1",
            ManagedKind::Service => "v1",
        }
    }
}

/// Desired state of a single managed resource, tagged by kind.
#[derive(Debug, PartialEq)]
pub enum DesiredObject {
    PrometheusRule(PrometheusRule),
    Role(Role),
    RoleBinding(RoleBinding),
    Service(Service),
    ServiceMonitor(ServiceMonitor),
}

/// Kind-specific drift comparison over the spec payload of a managed
/// resource. Labels and owner references are compared by the reconciler
/// itself from the desired object's metadata.
pub trait ManagedResource {
    fn spec_differs(&self, desired: &Self) -> bool;
    fn overwrite_spec(&mut self, desired: &Self);
}

/// One entry of the managed-resource table: identity plus the pure
/// desired-state builder for its kind.
pub struct ResourceDescriptor {
    pub kind: ManagedKind,
    pub name: &'static str,
    pub build: fn(&WardenRelease, &ParentRef) -> DesiredObject,
}

impl ResourceDescriptor {
    pub fn object_ref(&self, namespace: &str) -> ObjectRef {
        ObjectRef {
            api_version: self.kind.api_version().to_owned(),
            kind: self.kind.as_str().to_owned(),
            name: self.name.to_owned(),
            namespace: namespace.to_owned(),
        }
    }
}

/// The full managed set, in reconcile order. Created once for the process
/// and never mutated.
pub static MANAGED_RESOURCES: [ResourceDescriptor; 5] = [
    ResourceDescriptor {
        kind: ManagedKind::PrometheusRule,
        name: PROMETHEUS_RULE_NAME,
        build: build_prometheus_rule,
    },
    ResourceDescriptor {
        kind: ManagedKind::Role,
        name: METRICS_ROLE_NAME,
        build: build_metrics_role,
    },
    ResourceDescriptor {
        kind: ManagedKind::RoleBinding,
        name: METRICS_ROLE_NAME,
        build: build_metrics_role_binding,
    },
    ResourceDescriptor {
        kind: ManagedKind::Service,
        name: METRICS_SERVICE_NAME,
        build: build_metrics_service,
    },
    ResourceDescriptor {
        kind: ManagedKind::ServiceMonitor,
        name: METRICS_SERVICE_NAME,
        build: build_service_monitor,
    },
];

fn build_prometheus_rule(release: &WardenRelease, parent: &ParentRef) -> DesiredObject {
    DesiredObject::PrometheusRule(release.generate_prometheus_rule(parent))
}

fn build_metrics_role(release: &WardenRelease, parent: &ParentRef) -> DesiredObject {
    DesiredObject::Role(release.generate_metrics_role(parent))
}

fn build_metrics_role_binding(release: &WardenRelease, parent: &ParentRef) -> DesiredObject {
    DesiredObject::RoleBinding(release.generate_metrics_role_binding(parent))
}

fn build_metrics_service(release: &WardenRelease, parent: &ParentRef) -> DesiredObject {
    DesiredObject::Service(release.generate_metrics_service(parent))
}

fn build_service_monitor(release: &WardenRelease, parent: &ParentRef) -> DesiredObject {
    DesiredObject::ServiceMonitor(release.generate_service_monitor(parent))
}
