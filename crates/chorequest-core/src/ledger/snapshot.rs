//! Serializable snapshot of the ledger aggregate.
//!
//! The live [`Ledger`](super::Ledger) keeps indexed maps for lookups; the
//! snapshot flattens everything into plain lists so it can be written to a
//! TOML file and read back on startup.

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::reward::{Reward, RewardHistoryEntry};
use crate::settings::SystemSettings;
use crate::task::Task;

/// Binding between an authenticated principal and its profile id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// The caller's principal string.
    pub principal: String,
    /// The profile registered for that principal.
    pub profile_id: u64,
}

/// The full persisted state of the ledger.
///
/// Scalar fields come first so the TOML rendering keeps top-level values
/// ahead of the entity tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub next_profile_id: u64,
    #[serde(default)]
    pub next_task_id: u64,
    #[serde(default)]
    pub next_reward_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SystemSettings>,
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub history: Vec<RewardHistoryEntry>,
}
