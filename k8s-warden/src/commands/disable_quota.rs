use std::time::Duration;

use k8s_warden_core::{
    featuregate::{TenantQuotaGate, TenantQuotaGateBuilder},
    kubernetes::store::KubeStore,
};
use kube::Client;
use log::info;

use crate::cli::{GlobalArgs, QuotaArgs};

pub async fn disable_quota(
    global_args: &GlobalArgs,
    args: &QuotaArgs,
    client: &Client,
) -> anyhow::Result<()> {
    info!(
        "Disabling the tenant quota subsystem for '{}' in '{}' namespace...",
        args.name, global_args.namespace
    );

    let gate: TenantQuotaGate<KubeStore> = TenantQuotaGateBuilder::default()
        .store(KubeStore::new(client.clone()))
        .namespace(global_args.namespace.clone())
        .parent_name(args.name.clone())
        .timeout(Duration::from_secs(args.wait_timeout))
        .build()?;

    gate.set_feature_gate(false).await?;

    info!("Successfully disabled the tenant quota subsystem!");

    Ok(())
}
