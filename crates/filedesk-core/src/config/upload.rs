//! Upload orchestration configuration.

use serde::{Deserialize, Serialize};

/// Upload behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// MIME type sent when a file's type cannot be determined.
    #[serde(default = "default_unknown_mime")]
    pub unknown_mime_type: String,
    /// Whether directory traversal follows symbolic links.
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Maximum directory nesting depth visited during traversal.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            unknown_mime_type: default_unknown_mime(),
            follow_symlinks: false,
            max_depth: default_max_depth(),
        }
    }
}

fn default_unknown_mime() -> String {
    "Unknown".to_string()
}

fn default_max_depth() -> usize {
    64
}
