//! Ledger snapshot repository trait.
//!
//! Defines the interface for persisting the ledger aggregate, decoupling the
//! domain from the storage mechanism (TOML file, nothing at all, etc.). The
//! live state stays in memory; persistence is a write-behind snapshot taken
//! after each committed mutation.

use async_trait::async_trait;

use crate::error::Result;
use crate::ledger::LedgerSnapshot;

/// An abstract store for ledger snapshots.
#[async_trait]
pub trait LedgerSnapshotRepository: Send + Sync {
    /// Loads the most recent snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LedgerSnapshot))`: a snapshot exists
    /// - `Ok(None)`: nothing persisted yet
    /// - `Err(_)`: error occurred during retrieval
    async fn load(&self) -> Result<Option<LedgerSnapshot>>;

    /// Persists a snapshot, replacing any previous one.
    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}
