use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "DOCCHAT_BASE_URL";

/// Client configuration stored in `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without the `/api/v1` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset means transport defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Where session and notebook slots are kept (defaults to the config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Full URL of the API root, e.g. `http://localhost:8000/api/v1`.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), API_PREFIX)
    }
}
