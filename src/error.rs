// System
use std::path::PathBuf;

// Third Party
use kube::config::KubeconfigError;
use thiserror::Error;

/// Failure to obtain a connection to the cluster. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("in-cluster configuration unavailable: {0}")]
    InCluster(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("cannot locate a kubeconfig: neither KUBECONFIG nor HOME is set")]
    NoHomeDirectory,

    #[error("failed to load kubeconfig from {}: {source}", path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to create Kubernetes client: {0}")]
    Client(#[source] kube::Error),
}

/// Failure to open or keep a pod watch. Always retried by the watch loop.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("failed to watch pods in namespace {namespace}: {source}")]
    Open {
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("watch stream failed: {0}")]
    Stream(#[source] kube::Error),
}
