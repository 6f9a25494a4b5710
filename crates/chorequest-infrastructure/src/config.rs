//! Application configuration.
//!
//! `ChoreQuestConfig` is read from `config.toml` under the platform config
//! directory. Every field has a default, so a missing file yields a working
//! configuration: in-memory ledger, template narrator.

use serde::{Deserialize, Serialize};

use crate::paths::ChoreQuestPaths;
use crate::storage::AtomicTomlFile;
use chorequest_core::error::Result;

/// Ledger persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceSettings {
    /// Whether to snapshot the ledger to disk after each mutation.
    #[serde(default)]
    pub enabled: bool,
    /// Override for the snapshot file path. Defaults to
    /// `<data_dir>/ledger.toml` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<String>,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ledger_file: None,
        }
    }
}

/// Quest narrative collaborator settings.
///
/// When `endpoint` is unset, the deterministic template narrator is used;
/// otherwise quest narration is delegated to the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSettings {
    /// HTTP endpoint of the remote narrative service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model identifier forwarded to the remote service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_narrative_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_narrative_timeout_secs() -> u64 {
    20
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: None,
            timeout_secs: default_narrative_timeout_secs(),
        }
    }
}

/// Root configuration structure for config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoreQuestConfig {
    #[serde(default)]
    pub persistence: PersistenceSettings,
    #[serde(default)]
    pub narrative: NarrativeSettings,
}

/// Loads and saves the application configuration.
pub struct ConfigService {
    file: AtomicTomlFile<ChoreQuestConfig>,
}

impl ConfigService {
    /// Creates a service bound to the default config path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            file: AtomicTomlFile::new(ChoreQuestPaths::config_file()?),
        })
    }

    /// Creates a service bound to an explicit path (used by tests).
    pub fn with_path(path: std::path::PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// absent or empty.
    pub fn load(&self) -> Result<ChoreQuestConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            persistence = config.persistence.enabled,
            remote_narrative = config.narrative.endpoint.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Writes the configuration back atomically.
    pub fn save(&self, config: &ChoreQuestConfig) -> Result<()> {
        self.file.save(config)
    }
}
