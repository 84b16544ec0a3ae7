use std::fmt::Debug;

use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{Patch, PatchParams},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config, Resource,
};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::helpers::pretty_type_name;

pub async fn create_local_client(
    config_path: &Option<String>,
    context_name: &Option<String>,
) -> anyhow::Result<Client> {
    let config_options = KubeConfigOptions {
        context: context_name.to_owned(),
        ..Default::default()
    };

    let config = match config_path {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &config_options).await?
        }
        None => Config::from_kubeconfig(&config_options).await?,
    };

    let client = Client::try_from(config)?;

    Ok(client)
}

pub async fn apply_resource_status<T, S>(
    client: &Client,
    status: S,
    name: &str,
    namespace: &str,
    patch_params: &PatchParams,
) -> Result<(), kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
    S: Serialize,
{
    debug!(
        "Patching the status of '{name}' {} resource...",
        pretty_type_name::<T>()
    );

    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);
    resource_api
        .patch_status(name, patch_params, &Patch::Merge(json!({ "status": status })))
        .await?;

    Ok(())
}
