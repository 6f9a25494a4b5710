//! Shared, lock-guarded access to the ledger aggregate.
//!
//! Many concurrent callers, one logical data store: `SharedLedger` wraps the
//! in-memory [`Ledger`] in a `tokio::sync::RwLock` and funnels every mutation
//! through one exclusive critical section. Reads take the shared guard and
//! clone projections out.

use std::sync::Arc;

use tokio::sync::RwLock;

use chorequest_core::Ledger;
use chorequest_core::error::Result;
use chorequest_core::repository::LedgerSnapshotRepository;

/// Thread-safe handle to the household ledger.
///
/// Cloning is cheap; all clones share the same state and lock.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
    repository: Arc<dyn LedgerSnapshotRepository>,
}

impl SharedLedger {
    /// Creates a ledger restored from the repository's snapshot, or empty
    /// when nothing has been persisted yet.
    pub async fn load(repository: Arc<dyn LedgerSnapshotRepository>) -> Result<Self> {
        let ledger = match repository.load().await? {
            Some(snapshot) => {
                tracing::info!("ledger restored from snapshot");
                Ledger::from_snapshot(snapshot)
            }
            None => Ledger::new(),
        };
        Ok(Self {
            inner: Arc::new(RwLock::new(ledger)),
            repository,
        })
    }

    /// Creates an empty ledger with no persistence.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Ledger::new())),
            repository: Arc::new(crate::toml_ledger_repository::EphemeralLedgerRepository),
        }
    }

    /// Runs a read-only closure under the shared guard.
    pub async fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Runs a mutating closure under the exclusive guard.
    ///
    /// The closure is one atomic check-and-update: if it fails, nothing is
    /// persisted and the error is returned untouched. On success a snapshot
    /// is written while the guard is still held, so snapshots can never be
    /// persisted out of order.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut Ledger) -> Result<R>) -> Result<R> {
        let mut guard = self.inner.write().await;
        let value = f(&mut guard)?;
        if let Err(err) = self.repository.save(&guard.to_snapshot()).await {
            // The in-memory commit stands; the snapshot is stale until the
            // next successful save.
            tracing::error!(error = %err, "failed to persist ledger snapshot");
            return Err(err);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml_ledger_repository::TomlLedgerRepository;
    use chorequest_core::CallerId;
    use chorequest_core::profile::{AgeBracket, UserRole};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mutation_visible_to_readers() {
        let ledger = SharedLedger::in_memory();
        let caller = CallerId::new("principal-1");

        let id = ledger
            .mutate(|l| {
                l.register_profile(
                    &caller,
                    "Ana",
                    UserRole::User,
                    "avatar-1",
                    AgeBracket::Ages9To12,
                    "Fantasy",
                )
            })
            .await
            .unwrap();

        let found = ledger.read(|l| l.profile_id_of(&caller)).await;
        assert_eq!(found, Some(id));
    }

    #[tokio::test]
    async fn test_failed_mutation_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.toml");
        let repo = Arc::new(TomlLedgerRepository::with_path(path.clone()));
        let ledger = SharedLedger::load(repo).await.unwrap();

        let err = ledger
            .mutate(|l| l.claim_task(42, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_snapshot_restores_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.toml");
        let caller = CallerId::new("principal-1");

        {
            let repo = Arc::new(TomlLedgerRepository::with_path(path.clone()));
            let ledger = SharedLedger::load(repo).await.unwrap();
            ledger
                .mutate(|l| {
                    l.register_profile(
                        &caller,
                        "Ana",
                        UserRole::User,
                        "avatar-1",
                        AgeBracket::Adult,
                        "Space",
                    )
                })
                .await
                .unwrap();
        }

        let repo = Arc::new(TomlLedgerRepository::with_path(path));
        let restored = SharedLedger::load(repo).await.unwrap();
        let profile = restored
            .read(|l| l.caller_profile(&caller).cloned())
            .await
            .unwrap();
        assert_eq!(profile.name, "Ana");
    }
}
