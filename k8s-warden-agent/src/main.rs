use std::process::exit;

use kube::Client;

use crate::controller::main_controller;

mod controller;

#[tokio::main]
async fn main() {
    configure_logger();

    let client = create_client().await;

    main_controller(client).await;
}

async fn create_client() -> Client {
    match Client::try_default().await {
        Ok(client) => client,
        Err(error) => {
            log::error!("Couldn't create client! {error:?}");
            exit(6)
        }
    }
}

fn configure_logger() {
    env_logger::builder()
        .default_format()
        .format_module_path(false)
        .filter_level(log::LevelFilter::Info)
        .init()
}
