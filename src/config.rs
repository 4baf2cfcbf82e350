// System
use std::path::PathBuf;

// Local
use crate::error::ConfigError;

/// Namespace watched when `NAMESPACE` is not set.
pub const DEFAULT_NAMESPACE: &str = "k8s-assignment";

pub const NAMESPACE_ENV: &str = "NAMESPACE";
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const HOME_ENV: &str = "HOME";

/// Process settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub namespace: String,
    /// Explicit kubeconfig override from `KUBECONFIG`.
    pub kubeconfig: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let namespace = get(NAMESPACE_ENV).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        // KUBECONFIG may hold a path list; only the first entry is used.
        let kubeconfig = get(KUBECONFIG_ENV)
            .and_then(|paths| std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty()));
        let home = get(HOME_ENV).map(PathBuf::from);

        Self {
            namespace,
            kubeconfig,
            home,
        }
    }

    /// The kubeconfig file to fall back to when in-cluster credentials are unavailable.
    pub fn kubeconfig_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.kubeconfig {
            return Ok(path.clone());
        }
        self.home
            .as_ref()
            .map(|home| home.join(".kube").join("config"))
            .ok_or(ConfigError::NoHomeDirectory)
    }
}
