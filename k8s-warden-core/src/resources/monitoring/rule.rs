use std::collections::BTreeMap;

use crate::resources::{
    crd::monitoring::{AlertRule, PrometheusRule, PrometheusRuleSpec, RuleGroup},
    release::WardenRelease,
    ParentRef,
};

use super::{ManagedResource, METRICS_SERVICE_NAME, PROMETHEUS_RULE_NAME};

pub const RULE_GROUP_NAME: &str = "k8s-warden.rules";

impl WardenRelease {
    pub fn generate_prometheus_rule(&self, parent: &ParentRef) -> PrometheusRule {
        PrometheusRule {
            metadata: self.generate_monitoring_metadata(PROMETHEUS_RULE_NAME, parent.owner_ref()),
            spec: PrometheusRuleSpec {
                groups: Some(vec![RuleGroup {
                    name: RULE_GROUP_NAME.to_owned(),
                    rules: self.generate_alert_rules(),
                }]),
            },
        }
    }

    fn generate_alert_rules(&self) -> Vec<AlertRule> {
        let namespace = &self.namespace;

        vec![
            AlertRule {
                alert: "WardenMetricsDown".to_owned(),
                expr: format!(
                    "up{{namespace=\"{namespace}\", service=\"{METRICS_SERVICE_NAME}\"}} == 0"
                ),
                for_: Some("5m".to_owned()),
                labels: Some(severity("warning")),
                annotations: Some(annotation(
                    "The warden metrics endpoint has not been scraped for 5 minutes.",
                )),
            },
            AlertRule {
                alert: "WardenAgentRestartsHigh".to_owned(),
                expr: format!(
                    "sum(rate(kube_pod_container_status_restarts_total{{namespace=\"{namespace}\", \
                     pod=~\"k8s-warden-agent-.*\"}}[15m])) > 0"
                ),
                for_: Some("15m".to_owned()),
                labels: Some(severity("critical")),
                annotations: Some(annotation(
                    "The warden agent is restarting repeatedly and may be crash-looping.",
                )),
            },
        ]
    }
}

fn severity(level: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("severity".to_owned(), level.to_owned())])
}

fn annotation(summary: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("summary".to_owned(), summary.to_owned())])
}

impl ManagedResource for PrometheusRule {
    fn spec_differs(&self, desired: &Self) -> bool {
        self.spec != desired.spec
    }

    fn overwrite_spec(&mut self, desired: &Self) {
        self.spec = desired.spec.clone();
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        mock::{test_parent, test_release},
        resources::labels::get_monitoring_labels,
    };

    use super::{PROMETHEUS_RULE_NAME, RULE_GROUP_NAME};

    #[test]
    fn generated_rule_carries_identity_and_alert_group() {
        let release = test_release();
        let parent = test_parent();

        let rule = release.generate_prometheus_rule(&parent);

        assert_eq!(rule.metadata.name.as_deref(), Some(PROMETHEUS_RULE_NAME));
        assert_eq!(rule.metadata.labels, Some(get_monitoring_labels()));
        assert_eq!(rule.metadata.owner_references, Some(vec![parent.owner_ref()]));

        let groups = rule.spec.groups.expect("rule groups must be populated");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, RULE_GROUP_NAME);
        assert!(!groups[0].rules.is_empty());
    }

    #[test]
    fn alert_expressions_are_scoped_to_the_release_namespace() {
        let release = test_release();
        let rule = release.generate_prometheus_rule(&test_parent());

        let groups = rule.spec.groups.expect("rule groups must be populated");
        for alert in &groups[0].rules {
            assert!(
                alert.expr.contains(&format!("namespace=\"{}\"", release.namespace)),
                "alert '{}' is not namespace-scoped: {}",
                alert.alert,
                alert.expr
            );
        }
    }
}
