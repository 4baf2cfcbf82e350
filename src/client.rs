// System
use std::path::Path;

// Third Party
use async_trait::async_trait;
use kube::{
    config::{KubeConfigOptions, Kubeconfig, KubeconfigError},
    Client, Config,
};
use tracing::{debug, info};

// Local
use crate::{config::Settings, error::ConfigError};

/// Where cluster credentials come from. Resolved once at startup.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Credentials of the service account this process runs as, if it runs in a cluster.
    async fn in_cluster(&self) -> Result<Config, ConfigError>;

    async fn load_kubeconfig(&self, path: &Path) -> Result<Config, ConfigError>;
}

/// Credentials discovered through the kube client's own config loaders.
#[derive(Clone, Copy, Debug, Default)]
pub struct KubeCredentials;

#[async_trait]
impl CredentialSource for KubeCredentials {
    async fn in_cluster(&self) -> Result<Config, ConfigError> {
        Config::incluster().map_err(|error| ConfigError::InCluster(Box::new(error)))
    }

    async fn load_kubeconfig(&self, path: &Path) -> Result<Config, ConfigError> {
        let to_error = |source: KubeconfigError| ConfigError::Kubeconfig {
            path: path.to_path_buf(),
            source,
        };
        let kubeconfig = Kubeconfig::read_from(path).map_err(to_error)?;
        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(to_error)
    }
}

/// Try in-cluster credentials first, then the kubeconfig named by `settings`.
pub async fn resolve_config<C>(source: &C, settings: &Settings) -> Result<Config, ConfigError>
where
    C: CredentialSource + ?Sized,
{
    match source.in_cluster().await {
        Ok(config) => {
            info!("Using in-cluster configuration");
            Ok(config)
        }
        Err(error) => {
            debug!("Falling back to kubeconfig: {}", error);
            let path = settings.kubeconfig_path()?;
            info!("Using kubeconfig at {}", path.display());
            source.load_kubeconfig(&path).await
        }
    }
}

pub async fn resolve<C>(source: &C, settings: &Settings) -> Result<Client, ConfigError>
where
    C: CredentialSource + ?Sized,
{
    let config = resolve_config(source, settings).await?;
    Client::try_from(config).map_err(ConfigError::Client)
}
