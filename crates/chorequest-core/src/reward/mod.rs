//! Reward domain module.
//!
//! # Module Structure
//!
//! - `model`: reward catalog and history models (`Reward`, `RewardType`,
//!   `RewardHistoryEntry`, `LedgerAction`)

mod model;

// Re-export public API
pub use model::{LedgerAction, Reward, RewardHistoryEntry, RewardType};
