pub mod config;
pub mod paths;
pub mod shared_ledger;
pub mod storage;
pub mod toml_ledger_repository;

pub use crate::config::{ChoreQuestConfig, ConfigService, NarrativeSettings, PersistenceSettings};
pub use crate::shared_ledger::SharedLedger;
pub use crate::toml_ledger_repository::{EphemeralLedgerRepository, TomlLedgerRepository};
