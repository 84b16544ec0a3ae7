use k8s_warden_core::resources::crd::v1alpha1::v1alpha1_crds;

/// Writes the CRD manifests to stdout as a multi-document YAML stream,
/// ready to be piped into kubectl apply.
pub fn export_crds() -> anyhow::Result<()> {
    for crd in v1alpha1_crds() {
        println!("---");
        print!("{}", serde_yaml::to_string(&crd)?);
    }

    Ok(())
}
