//! Connection settings for the hosted identity and document platform.

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Project credentials shared by the identity provider and document store.
///
/// `storage_bucket`, `messaging_sender_id` and `measurement_id` only feed
/// optional platform features; leaving them empty never blocks the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Public API key.
    #[serde(default)]
    pub api_key: String,
    /// Domain serving the interactive sign-in flow.
    #[serde(default)]
    pub auth_domain: String,
    /// Project identifier; scopes the document store.
    #[serde(default)]
    pub project_id: String,
    /// Object storage bucket.
    #[serde(default)]
    pub storage_bucket: String,
    /// Messaging sender identifier.
    #[serde(default)]
    pub messaging_sender_id: String,
    /// Application identifier.
    #[serde(default)]
    pub app_id: String,
    /// Analytics measurement identifier.
    #[serde(default)]
    pub measurement_id: String,
}

impl PlatformConfig {
    /// Check if every required field is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check if analytics can be enabled.
    #[must_use]
    pub fn analytics_enabled(&self) -> bool {
        !self.measurement_id.trim().is_empty()
    }

    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first empty
    /// required field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("platform.api_key", &self.api_key),
            ("platform.auth_domain", &self.auth_domain),
            ("platform.project_id", &self.project_id),
            ("platform.app_id", &self.app_id),
        ];
        match required
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            Some((field, _)) => Err(ConfigError::MissingField(field)),
            None => Ok(()),
        }
    }
}
