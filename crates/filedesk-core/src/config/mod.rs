//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults so the client
//! runs without any configuration file at all.

pub mod api;
pub mod logging;
pub mod preview;
pub mod session;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::preview::PreviewConfig;
pub use self::session::SessionConfig;
pub use self::upload::UploadConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `FILEDESK__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Persisted session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Upload orchestration settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Preview engine settings.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory of the working
    /// directory.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `FILEDESK__`
    /// (sections separated by `__`, e.g. `FILEDESK__API__BASE_URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Same as [`AppConfig::load`] with an explicit configuration directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let dir = dir.trim_end_matches('/');
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
