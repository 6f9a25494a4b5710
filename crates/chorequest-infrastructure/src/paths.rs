//! Unified path management for ChoreQuest files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/chorequest/        # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/chorequest/   # Data directory
//! └── ledger.toml              # Ledger snapshot (when persistence is enabled)
//! ```

use std::path::PathBuf;

use chorequest_core::error::{ChoreError, Result};

const APP_DIR: &str = "chorequest";

/// Unified path management for ChoreQuest.
pub struct ChoreQuestPaths;

impl ChoreQuestPaths {
    /// Returns the configuration directory (e.g. `~/.config/chorequest/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChoreError::config("Cannot determine config directory"))
    }

    /// Returns the data directory (e.g. `~/.local/share/chorequest/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChoreError::config("Cannot determine data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the ledger snapshot file.
    pub fn ledger_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("ledger.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_end_with_expected_names() {
        let config = ChoreQuestPaths::config_file().unwrap();
        assert!(config.ends_with("chorequest/config.toml"));

        let ledger = ChoreQuestPaths::ledger_file().unwrap();
        assert!(ledger.ends_with("chorequest/ledger.toml"));
    }
}
