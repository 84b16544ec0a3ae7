use k8s_openapi::{
    api::core::v1::{Service, ServicePort, ServiceSpec},
    apimachinery::pkg::util::intstr::IntOrString,
};

use crate::resources::{labels::get_agent_selector_labels, release::WardenRelease, ParentRef};

use super::{ManagedResource, METRICS_PORT, METRICS_PORT_NAME, METRICS_SERVICE_NAME};

impl WardenRelease {
    pub fn generate_metrics_service(&self, parent: &ParentRef) -> Service {
        Service {
            metadata: self.generate_monitoring_metadata(METRICS_SERVICE_NAME, parent.owner_ref()),
            spec: Some(ServiceSpec {
                ports: Some(vec![ServicePort {
                    name: Some(METRICS_PORT_NAME.to_owned()),
                    port: METRICS_PORT,
                    protocol: Some("TCP".to_owned()),
                    target_port: Some(IntOrString::Int(METRICS_PORT)),
                    ..Default::default()
                }]),
                selector: Some(get_agent_selector_labels()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl ManagedResource for Service {
    fn spec_differs(&self, desired: &Self) -> bool {
        let observed = self.spec.as_ref();
        let desired = desired.spec.as_ref();

        observed.map(|spec| &spec.ports) != desired.map(|spec| &spec.ports)
            || observed.map(|spec| &spec.selector) != desired.map(|spec| &spec.selector)
    }

    fn overwrite_spec(&mut self, desired: &Self) {
        // ports and selector are the managed payload; cluster-assigned
        // fields such as clusterIP must survive the heal
        let desired_ports = desired.spec.as_ref().and_then(|spec| spec.ports.clone());
        let desired_selector = desired.spec.as_ref().and_then(|spec| spec.selector.clone());

        let spec = self.spec.get_or_insert_with(Default::default);
        spec.ports = desired_ports;
        spec.selector = desired_selector;
    }
}
