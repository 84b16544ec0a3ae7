use std::{process::exit, sync::Arc};

use k8s_warden_core::resources::release::WardenRelease;
use kube::Client;

use crate::controller::reconciler::context::ReconcilerContext;

use self::warden::start_warden_controller;

pub mod reconciler;
pub mod warden;

pub const CONTROLLER_FIELD_MANAGER: &str = "k8s-warden-agent";

pub async fn main_controller(client: Client) {
    let reconciler_context = Arc::new(ReconcilerContext {
        release: get_warden_release(),
        client,
    });

    start_warden_controller(&reconciler_context).await;
}

fn get_warden_release() -> WardenRelease {
    match WardenRelease::from_env() {
        Ok(release) => release,
        Err(error) => {
            log::error!("Couldn't retrieve release info! {error:?}");
            exit(7)
        }
    }
}
