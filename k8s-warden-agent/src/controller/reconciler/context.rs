use k8s_openapi::NamespaceResourceScope;
use k8s_warden_core::resources::release::WardenRelease;
use kube::{Api, Client, Resource};

pub struct ReconcilerContext {
    pub release: WardenRelease,
    pub client: Client,
}

impl ReconcilerContext {
    /// Api scoped to the release namespace, where the parent objects and all
    /// of their managed resources live.
    pub fn namespaced_api<K>(&self) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), &self.release.namespace)
    }
}
