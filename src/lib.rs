//! Watches the pods of a single namespace and logs every create, update and
//! delete, reopening the watch whenever it drops.

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod utils;
pub mod watcher;

#[cfg(test)]
mod testing;

pub use client::{resolve, CredentialSource, KubeCredentials};
pub use config::Settings;
pub use error::{ConfigError, SubscriptionError};
pub use event::{PodEvent, PodRef};
pub use watcher::{PodApi, WatchLoop};
