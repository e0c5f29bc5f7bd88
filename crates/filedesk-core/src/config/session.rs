//! Persisted session configuration.

use serde::{Deserialize, Serialize};

/// Where the credential bundle and user identity are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the two persisted session keys.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

fn default_state_dir() -> String {
    directories::ProjectDirs::from("", "", "filedesk")
        .map(|dirs| dirs.data_dir().join("session").to_string_lossy().into_owned())
        .unwrap_or_else(|| "./data/session".to_string())
}
