//! Ledger snapshot repositories.
//!
//! `TomlLedgerRepository` persists the whole ledger snapshot to a single
//! TOML file via atomic writes. `EphemeralLedgerRepository` persists nothing
//! and is the default when persistence is disabled (and for tests).

use std::path::PathBuf;

use async_trait::async_trait;

use crate::storage::AtomicTomlFile;
use chorequest_core::error::Result;
use chorequest_core::ledger::LedgerSnapshot;
use chorequest_core::repository::LedgerSnapshotRepository;

/// TOML-file-backed snapshot repository.
pub struct TomlLedgerRepository {
    file: AtomicTomlFile<LedgerSnapshot>,
}

impl TomlLedgerRepository {
    /// Creates a repository writing to the given file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

#[async_trait]
impl LedgerSnapshotRepository for TomlLedgerRepository {
    async fn load(&self) -> Result<Option<LedgerSnapshot>> {
        self.file.load()
    }

    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.file.save(snapshot)?;
        tracing::debug!(path = %self.file.path().display(), "ledger snapshot written");
        Ok(())
    }
}

/// A repository that never persists anything.
///
/// `load` always reports an empty store, `save` is a no-op. Used when
/// persistence is disabled and throughout the test suites.
#[derive(Debug, Clone, Default)]
pub struct EphemeralLedgerRepository;

#[async_trait]
impl LedgerSnapshotRepository for EphemeralLedgerRepository {
    async fn load(&self) -> Result<Option<LedgerSnapshot>> {
        Ok(None)
    }

    async fn save(&self, _snapshot: &LedgerSnapshot) -> Result<()> {
        Ok(())
    }
}
