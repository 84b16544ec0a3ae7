use crate::resources::{
    crd::monitoring::{MonitorEndpoint, MonitorSelector, ServiceMonitor, ServiceMonitorSpec},
    labels::get_monitoring_labels,
    release::WardenRelease,
    ParentRef,
};

use super::{ManagedResource, METRICS_PORT_NAME, METRICS_SERVICE_NAME};

impl WardenRelease {
    pub fn generate_service_monitor(&self, parent: &ParentRef) -> ServiceMonitor {
        ServiceMonitor {
            metadata: self.generate_monitoring_metadata(METRICS_SERVICE_NAME, parent.owner_ref()),
            spec: ServiceMonitorSpec {
                selector: MonitorSelector {
                    match_labels: Some(get_monitoring_labels()),
                },
                endpoints: vec![MonitorEndpoint {
                    port: Some(METRICS_PORT_NAME.to_owned()),
                    path: None,
                    scheme: Some("https".to_owned()),
                    interval: None,
                }],
            },
        }
    }
}

impl ManagedResource for ServiceMonitor {
    fn spec_differs(&self, desired: &Self) -> bool {
        self.spec != desired.spec
    }

    fn overwrite_spec(&mut self, desired: &Self) {
        self.spec = desired.spec.clone();
    }
}
