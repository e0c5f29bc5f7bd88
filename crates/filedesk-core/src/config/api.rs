//! Remote API configuration.

use serde::{Deserialize, Serialize};

/// Where and how the remote folder/file service is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API; resource paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Applies to uploads and downloads too.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// The base URL with exactly one trailing slash.
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("filedesk/{}", env!("CARGO_PKG_VERSION"))
}
