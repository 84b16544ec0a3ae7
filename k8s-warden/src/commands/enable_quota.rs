use std::time::Duration;

use k8s_warden_core::{
    featuregate::{TenantQuotaGate, TenantQuotaGateBuilder},
    kubernetes::store::KubeStore,
};
use kube::Client;
use log::info;

use crate::cli::{GlobalArgs, QuotaArgs};

pub async fn enable_quota(
    global_args: &GlobalArgs,
    args: &QuotaArgs,
    client: &Client,
) -> anyhow::Result<()> {
    info!(
        "Enabling the tenant quota subsystem for '{}' in '{}' namespace...",
        args.name, global_args.namespace
    );

    let gate: TenantQuotaGate<KubeStore> = TenantQuotaGateBuilder::default()
        .store(KubeStore::new(client.clone()))
        .namespace(global_args.namespace.clone())
        .parent_name(args.name.clone())
        .timeout(Duration::from_secs(args.wait_timeout))
        .build()?;

    gate.set_feature_gate(true).await?;

    let workloads = gate.quota_workloads().await?;
    info!(
        "Successfully enabled the tenant quota subsystem ({} workloads running)!",
        workloads.len()
    );

    Ok(())
}
