//! # exam-config
//!
//! Layered configuration loading for examdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EXAMDESK_*` prefix, `__` as separator)
//! 2. Project-level `.examdesk/config.toml`
//! 3. User-level `~/.config/examdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EXAMDESK_API__BASE_URL` -> `api.base_url`,
//! `EXAMDESK_SESSION__BACKEND` -> `session.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use exam_config::DeskConfig;
//!
//! let config = DeskConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.resolved_base_url());
//! ```

mod api;
mod error;
mod general;
mod session;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::{SessionBackendKind, SessionConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "EXAMDESK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DeskConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`DeskConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`DeskConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".examdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero (omit it to disable the timeout)".into(),
            });
        }
        if self.session.backend == SessionBackendKind::Keyring
            && self.session.keyring_service.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "session.keyring_service".into(),
                reason: "must not be empty when the keyring backend is selected".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("examdesk").join("config.toml"))
    }

    fn load_dotenv() {
        // Missing .env is fine: the environment may already be populated.
        let _ = dotenvy::dotenv();
    }
}
