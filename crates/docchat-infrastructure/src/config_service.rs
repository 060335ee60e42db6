//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies the environment and
//! command-line overrides on top of it.

use crate::paths::DocchatPaths;
use crate::storage::AtomicFile;
use docchat_core::config::{BASE_URL_ENV, ClientConfig};
use docchat_core::error::{DocchatError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicFile<ClientConfig>>,
    /// Cached configuration; `None` until first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::toml(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_paths(paths: &DocchatPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Gets the stored configuration, loading it from file if not cached.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.file.load() {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Ignoring unreadable config {:?}: {}",
                    self.file.path(),
                    e
                );
                ClientConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Effective configuration: `flag` > `DOCCHAT_BASE_URL` > file > default.
    pub fn resolve(&self, base_url_flag: Option<&str>) -> ClientConfig {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        self.resolve_with(env_value.as_deref(), base_url_flag)
    }

    fn resolve_with(&self, env_value: Option<&str>, base_url_flag: Option<&str>) -> ClientConfig {
        let mut config = self.get_config();
        let override_url = base_url_flag
            .or(env_value)
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = override_url {
            tracing::debug!("[ConfigService] base_url overridden to {}", url);
            config.base_url = url.to_string();
        }
        config
    }

    /// Persists a new backend origin.
    pub fn set_base_url(&self, base_url: &str) -> Result<ClientConfig> {
        let base_url = base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DocchatError::invalid_input(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let mut updated = ClientConfig::default();
        self.file.update(ClientConfig::default(), |config| {
            config.base_url = base_url.trim_end_matches('/').to_string();
            updated = config.clone();
            Ok(())
        })?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(updated.clone());
        tracing::info!("[ConfigService] base_url set to {}", updated.base_url);
        Ok(updated)
    }
}
