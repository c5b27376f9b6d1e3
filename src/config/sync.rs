//! Task synchronisation settings.

use super::ConfigError;
use crate::board::services::BootstrapPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_bootstrap_retry_delay_ms() -> u64 {
    1000
}

const fn default_bootstrap_max_retries() -> u32 {
    1
}

/// How a missing task document is bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Wait before re-reading a freshly created document, in milliseconds.
    #[serde(default = "default_bootstrap_retry_delay_ms")]
    pub bootstrap_retry_delay_ms: u64,

    /// Re-reads attempted before giving up on a freshly created document.
    #[serde(default = "default_bootstrap_max_retries")]
    pub bootstrap_max_retries: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            bootstrap_retry_delay_ms: default_bootstrap_retry_delay_ms(),
            bootstrap_max_retries: default_bootstrap_max_retries(),
        }
    }
}

impl SyncConfig {
    /// Returns the bootstrap policy these settings describe.
    #[must_use]
    pub fn bootstrap_policy(&self) -> BootstrapPolicy {
        BootstrapPolicy::new(
            Duration::from_millis(self.bootstrap_retry_delay_ms),
            self.bootstrap_max_retries,
        )
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when no re-read is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bootstrap_max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.bootstrap_max_retries",
                reason: "at least one re-read is required".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_retry_once_after_one_second() {
        let policy = SyncConfig::default().bootstrap_policy();
        assert_eq!(policy.retry_delay(), Duration::from_secs(1));
        assert_eq!(policy.max_retries(), 1);
    }

    #[test]
    fn zero_retries_is_rejected() {
        let config = SyncConfig {
            bootstrap_max_retries: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "sync.bootstrap_max_retries", .. })
        ));
    }
}
