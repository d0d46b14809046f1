//! Storage configuration parsed from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::{FileStorage, MemoryStorage, Storage};

pub const DEFAULT_STATE_DIR: &str = ".client-state";

/// Error returned while reading configuration or opening storage.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown CLIENT_STATE_BACKEND: {0}")]
    UnknownBackend(String),
    #[error("invalid CLIENT_STATE_QUOTA_BYTES: {0}")]
    InvalidQuota(String),
    /// The browser backend was requested in a build without `hydrate`.
    #[error("browser storage requires the `hydrate` feature")]
    BrowserUnavailable,
}

/// Which durable store backs persistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Browser,
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    pub backend: BackendKind,
    pub dir: PathBuf,
    pub quota_bytes: Option<usize>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self { backend: default_backend(), dir: PathBuf::from(DEFAULT_STATE_DIR), quota_bytes: None }
    }
}

impl StateConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CLIENT_STATE_BACKEND`: `browser`, `file`, or `memory`
    ///   (default `browser` with `hydrate`, else `file`)
    /// - `CLIENT_STATE_DIR`: file backend directory, default `.client-state`
    /// - `CLIENT_STATE_QUOTA_BYTES`: byte limit for the memory backend
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match std::env::var("CLIENT_STATE_BACKEND").ok() {
            Some(raw) => parse_backend(&raw)?,
            None => default_backend(),
        };
        let dir = std::env::var("CLIENT_STATE_DIR").map_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);
        let quota_bytes = match std::env::var("CLIENT_STATE_QUOTA_BYTES").ok() {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidQuota(raw.clone()))?),
            None => None,
        };

        Ok(Self { backend, dir, quota_bytes })
    }

    /// Open the configured backend.
    pub fn open_storage(&self) -> Result<Arc<dyn Storage>, ConfigError> {
        match self.backend {
            BackendKind::Browser => open_browser(),
            BackendKind::File => Ok(Arc::new(FileStorage::new(self.dir.clone()))),
            BackendKind::Memory => {
                let storage = match self.quota_bytes {
                    Some(bytes) => MemoryStorage::with_quota(bytes),
                    None => MemoryStorage::new(),
                };
                Ok(Arc::new(storage))
            }
        }
    }
}

fn parse_backend(raw: &str) -> Result<BackendKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "browser" | "local_storage" => Ok(BackendKind::Browser),
        "file" => Ok(BackendKind::File),
        "memory" => Ok(BackendKind::Memory),
        _ => Err(ConfigError::UnknownBackend(raw.to_owned())),
    }
}

fn default_backend() -> BackendKind {
    if cfg!(feature = "hydrate") { BackendKind::Browser } else { BackendKind::File }
}

#[cfg(feature = "hydrate")]
fn open_browser() -> Result<Arc<dyn Storage>, ConfigError> {
    Ok(Arc::new(crate::storage::BrowserStorage::new()))
}

#[cfg(not(feature = "hydrate"))]
fn open_browser() -> Result<Arc<dyn Storage>, ConfigError> {
    Err(ConfigError::BrowserUnavailable)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
