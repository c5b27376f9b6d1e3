//! Local storage settings.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Where the file-backed document store keeps its documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for per-user JSON documents; unset disables the file store.
    #[serde(default)]
    pub data_dir: Option<Utf8PathBuf>,
}
