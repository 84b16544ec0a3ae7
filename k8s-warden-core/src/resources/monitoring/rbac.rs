use k8s_openapi::api::rbac::v1::{PolicyRule, Role, RoleBinding, RoleRef, Subject};

use crate::resources::{release::WardenRelease, ParentRef};

use super::{ManagedResource, METRICS_ROLE_NAME};

/// Service account the cluster scrape stack runs under.
pub const PROMETHEUS_SERVICE_ACCOUNT: &str = "prometheus-k8s";

impl WardenRelease {
    pub fn generate_metrics_role(&self, parent: &ParentRef) -> Role {
        Role {
            metadata: self.generate_monitoring_metadata(METRICS_ROLE_NAME, parent.owner_ref()),
            rules: Some(vec![PolicyRule {
                api_groups: Some(vec!["".to_owned()]),
                resources: Some(vec![
                    "services".to_owned(),
                    "endpoints".to_owned(),
                    "pods".to_owned(),
                ]),
                verbs: vec!["get".to_owned(), "list".to_owned(), "watch".to_owned()],
                ..Default::default()
            }]),
        }
    }

    pub fn generate_metrics_role_binding(&self, parent: &ParentRef) -> RoleBinding {
        RoleBinding {
            metadata: self.generate_monitoring_metadata(METRICS_ROLE_NAME, parent.owner_ref()),
            role_ref: RoleRef {
                api_group: "rbac.authorization.k8s.io".to_owned(),
                kind: "Role".to_owned(),
                name: METRICS_ROLE_NAME.to_owned(),
            },
            subjects: Some(vec![Subject {
                kind: "ServiceAccount".to_owned(),
                name: PROMETHEUS_SERVICE_ACCOUNT.to_owned(),
                namespace: Some(self.monitoring_namespace.to_owned()),
                ..Default::default()
            }]),
        }
    }
}

impl ManagedResource for Role {
    fn spec_differs(&self, desired: &Self) -> bool {
        self.rules != desired.rules
    }

    fn overwrite_spec(&mut self, desired: &Self) {
        self.rules = desired.rules.clone();
    }
}

impl ManagedResource for RoleBinding {
    fn spec_differs(&self, desired: &Self) -> bool {
        self.role_ref != desired.role_ref || self.subjects != desired.subjects
    }

    fn overwrite_spec(&mut self, desired: &Self) {
        self.role_ref = desired.role_ref.clone();
        self.subjects = desired.subjects.clone();
    }
}

#[cfg(test)]
mod tests {
    use crate::mock::{test_parent, test_release};

    use super::{METRICS_ROLE_NAME, PROMETHEUS_SERVICE_ACCOUNT};

    #[test]
    fn role_grants_read_access_to_scrape_targets() {
        let role = test_release().generate_metrics_role(&test_parent());

        let rules = role.rules.expect("role rules must be populated");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].api_groups, Some(vec!["".to_owned()]));
        assert_eq!(
            rules[0].resources,
            Some(vec![
                "services".to_owned(),
                "endpoints".to_owned(),
                "pods".to_owned(),
            ])
        );
        assert_eq!(
            rules[0].verbs,
            vec!["get".to_owned(), "list".to_owned(), "watch".to_owned()]
        );
    }

    #[test]
    fn role_binding_grants_the_role_to_the_prometheus_account() {
        let release = test_release();
        let binding = release.generate_metrics_role_binding(&test_parent());

        assert_eq!(binding.role_ref.kind, "Role");
        assert_eq!(binding.role_ref.name, METRICS_ROLE_NAME);

        let subjects = binding.subjects.expect("binding subjects must be populated");
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].kind, "ServiceAccount");
        assert_eq!(subjects[0].name, PROMETHEUS_SERVICE_ACCOUNT);
        assert_eq!(
            subjects[0].namespace.as_deref(),
            Some(release.monitoring_namespace.as_str())
        );
    }

    #[test]
    fn role_and_binding_share_one_name() {
        let release = test_release();
        let parent = test_parent();

        assert_eq!(
            release.generate_metrics_role(&parent).metadata.name,
            release.generate_metrics_role_binding(&parent).metadata.name,
        );
    }
}
