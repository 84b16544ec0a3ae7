use std::fmt::Debug;

use async_trait::async_trait;
use kube::{
    api::{ListParams, Patch, PatchParams, PostParams},
    core::{ClusterResourceScope, NamespaceResourceScope},
    Api, Client, Resource,
};
use serde::{de::DeserializeOwned, Serialize};

/// Namespaced object types the store can read and write.
pub trait StoreObject:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Serialize
    + DeserializeOwned
    + Clone
    + Debug
    + Send
    + Sync
{
}

impl<K> StoreObject for K where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + DeserializeOwned
        + Clone
        + Debug
        + Send
        + Sync
{
}

/// Cluster-scoped object types the store can list.
pub trait ClusterObject:
    Resource<Scope = ClusterResourceScope, DynamicType = ()>
    + Serialize
    + DeserializeOwned
    + Clone
    + Debug
    + Send
    + Sync
{
}

impl<K> ClusterObject for K where
    K: Resource<Scope = ClusterResourceScope, DynamicType = ()>
        + Serialize
        + DeserializeOwned
        + Clone
        + Debug
        + Send
        + Sync
{
}

/// The cluster read/write surface the reconcilers run against.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get<K: StoreObject>(&self, namespace: &str, name: &str) -> Result<K, kube::Error>;

    /// Creates the object under the name and namespace set in its metadata.
    async fn create<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error>;

    /// Replaces the stored object with the passed one.
    async fn update<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error>;

    async fn patch_json<K: StoreObject>(
        &self,
        namespace: &str,
        name: &str,
        patch: &json_patch::Patch,
    ) -> Result<(), kube::Error>;

    async fn list<K: StoreObject>(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error>;

    async fn list_cluster<K: ClusterObject>(
        &self,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error>;
}

/// Live store backed by the cluster API.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn namespaced_api<K: StoreObject>(&self, namespace: &str) -> Api<K> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    async fn get<K: StoreObject>(&self, namespace: &str, name: &str) -> Result<K, kube::Error> {
        self.namespaced_api::<K>(namespace).get(name).await
    }

    async fn create<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error> {
        // generated resources always carry a namespace
        let namespace = object.meta().namespace.as_ref().unwrap();

        self.namespaced_api::<K>(namespace)
            .create(&PostParams::default(), object)
            .await?;

        Ok(())
    }

    async fn update<K: StoreObject>(&self, object: &K) -> Result<(), kube::Error> {
        let name = object.meta().name.as_ref().unwrap();
        let namespace = object.meta().namespace.as_ref().unwrap();

        self.namespaced_api::<K>(namespace)
            .replace(name, &PostParams::default(), object)
            .await?;

        Ok(())
    }

    async fn patch_json<K: StoreObject>(
        &self,
        namespace: &str,
        name: &str,
        patch: &json_patch::Patch,
    ) -> Result<(), kube::Error> {
        self.namespaced_api::<K>(namespace)
            .patch(
                name,
                &PatchParams::default(),
                &Patch::<()>::Json(patch.clone()),
            )
            .await?;

        Ok(())
    }

    async fn list<K: StoreObject>(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error> {
        let list = self
            .namespaced_api::<K>(namespace)
            .list(&ListParams::default().labels(label_selector))
            .await?;

        Ok(list.items)
    }

    async fn list_cluster<K: ClusterObject>(
        &self,
        label_selector: &str,
    ) -> Result<Vec<K>, kube::Error> {
        let list = Api::<K>::all(self.client.clone())
            .list(&ListParams::default().labels(label_selector))
            .await?;

        Ok(list.items)
    }
}
