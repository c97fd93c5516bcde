//! # sleuth-config
//!
//! Layered configuration loading for Sleuth using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SLEUTH_*` prefix, `__` as separator)
//! 2. Project-level `.sleuth/config.toml`
//! 3. User-level `~/.config/sleuth/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SLEUTH_GENERAL__CATALOG_PATH` -> `general.catalog_path`,
//! `SLEUTH_ENGINE__TEMPORAL_WINDOW_SECS` -> `engine.temporal_window_secs`,
//! etc. The `__` (double underscore) separates nested config sections.

mod engine;
mod error;
mod general;

pub use engine::EngineConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SleuthConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl SleuthConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`SleuthConfig::load_with_dotenv`] if
    /// you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse or a
    /// value cannot be deserialized into its field.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`SleuthConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer extra
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".sleuth/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SLEUTH_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sleuth").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SleuthConfig::default();
        assert!(!config.general.is_configured());
        assert_eq!(config.engine.max_temporal_clusters, 10);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: SleuthConfig = SleuthConfig::figment().extract()?;
            assert_eq!(config.general.default_time_window, "24h");
            Ok(())
        });
    }
}
