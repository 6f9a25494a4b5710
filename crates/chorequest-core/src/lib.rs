pub mod error;
pub mod identity;
pub mod ledger;
pub mod profile;
pub mod quest;
pub mod repository;
pub mod reward;
pub mod settings;
pub mod task;
pub mod theme;

// Re-export common error type
pub use error::ChoreError;
pub use identity::{AuthContext, CallerId};
pub use ledger::Ledger;
