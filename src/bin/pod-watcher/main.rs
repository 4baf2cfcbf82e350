// Third Party
use anyhow::Context;
use tracing::{error, info};

// Local
use kube_pod_watcher::{resolve, utils::init_tracing, KubeCredentials, PodApi, Settings, WatchLoop};

#[tokio::main]
async fn main() {
    init_tracing("info");
    info!("Starting Kubernetes Pod Watcher...");
    let settings = Settings::from_env();

    let client = match resolve(&KubeCredentials, &settings)
        .await
        .context("Failed to create Kubernetes client")
    {
        Ok(client) => client,
        Err(e) => {
            // `{:#}` renders the whole cause chain on one line.
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    // Never returns; the process is stopped from outside.
    let watch_loop = WatchLoop::new(PodApi::new(client), &settings.namespace);
    match watch_loop.run().await {}
}
