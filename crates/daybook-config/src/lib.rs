//! # daybook-config
//!
//! Layered configuration loading for Daybook using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DAYBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.daybook/config.toml`
//! 3. User-level `~/.config/daybook/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DAYBOOK_API__BASE_URL` -> `api.base_url`,
//! `DAYBOOK_IMAGES__ACCESS_KEY` -> `images.access_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use daybook_config::DaybookConfig;
//!
//! let config = DaybookConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod general;
mod images;
mod quotes;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::{CredentialStoreKind, GeneralConfig};
pub use images::ImagesConfig;
pub use quotes::QuotesConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DaybookConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DaybookConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".daybook/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("DAYBOOK_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("daybook").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = DaybookConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.quotes.url, "https://zenquotes.io/api/today");
        assert!(!config.images.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = DaybookConfig::from_figment(&DaybookConfig::figment())
                .expect("should extract defaults");
            assert_eq!(config.api.timeout_secs, 30);
            assert_eq!(config.general.dashboard_days, 30);
            Ok(())
        });
    }
}
