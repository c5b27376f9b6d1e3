//! Layered configuration for the Kanban board.
//!
//! Sources, highest priority first:
//! 1. `KANBAN_*` environment variables, `__` separating sections
//!    (`KANBAN_PLATFORM__API_KEY` -> `platform.api_key`)
//! 2. Legacy `NEXT_PUBLIC_*` platform variables
//! 3. `kanban.toml` in the working directory
//! 4. Built-in defaults
//!
//! [`KanbanConfig::load_with_dotenv`] additionally reads a `.env` file first.

mod error;
mod platform;
mod storage;
mod sync;

pub use error::ConfigError;
pub use platform::PlatformConfig;
pub use storage::StorageConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File consulted for project-level settings.
pub const CONFIG_FILE: &str = "kanban.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "KANBAN_";

/// Platform variables under their `NEXT_PUBLIC_` names.
const LEGACY_PLATFORM_KEYS: [(&str, &str); 7] = [
    ("NEXT_PUBLIC_API_KEY", "platform.api_key"),
    ("NEXT_PUBLIC_DOMAIN", "platform.auth_domain"),
    ("NEXT_PUBLIC_PROJECT_ID", "platform.project_id"),
    ("NEXT_PUBLIC_STORAGE_BUCKET", "platform.storage_bucket"),
    ("NEXT_PUBLIC_MESSAGE_SENDER_ID", "platform.messaging_sender_id"),
    ("NEXT_PUBLIC_APP_ID", "platform.app_id"),
    ("NEXT_PUBLIC_MEASUREMENT_ID", "platform.measurement_id"),
];

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KanbanConfig {
    /// Identity provider and document store connection settings.
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Task synchronisation tuning.
    #[serde(default)]
    pub sync: SyncConfig,
    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl KanbanConfig {
    /// Loads configuration from the file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Loads a `.env` file, if present, then the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        Self::load()
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }

        figment
            .merge(legacy_platform_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks that every setting required for core operation is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first missing
    /// required platform field, or [`ConfigError::InvalidValue`] for an
    /// unusable sync setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.platform.validate()?;
        self.sync.validate()
    }
}

fn legacy_platform_env() -> Env {
    Env::raw().filter_map(|key| {
        LEGACY_PLATFORM_KEYS
            .iter()
            .find(|(legacy, _)| key.as_str().eq_ignore_ascii_case(legacy))
            .map(|(_, field)| (*field).into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_configured() {
        let config = KanbanConfig::default();
        assert!(!config.platform.is_configured());
        assert_eq!(config.sync.bootstrap_max_retries, 1);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn figment_extracts_defaults_without_sources() {
        figment::Jail::expect_with(|_jail| {
            let config: KanbanConfig = KanbanConfig::figment().extract()?;
            assert_eq!(config, KanbanConfig::default());
            Ok(())
        });
    }
}
