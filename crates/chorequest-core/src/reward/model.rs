//! Reward catalog and redemption history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency flavor tag.
///
/// Appears both on individual rewards (`Reward::reward_type`) and as the
/// account-wide setting (`SystemSettings::reward_system`). The two are
/// independent presentation tags: every redemption debits the single points
/// balance regardless of either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Money,
    Gems,
    Points,
}

/// A redeemable catalog entry.
///
/// Name and cost are immutable after creation. `is_available` may be toggled
/// to withdraw a reward from the catalog; history entries keep referencing
/// the id of a withdrawn reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Stable identifier, assigned at creation.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Redemption cost in points. Positive, fixed at creation.
    pub cost: u64,
    /// Presentation flavor of this reward.
    pub reward_type: RewardType,
    /// Whether the reward is currently offered in the catalog.
    pub is_available: bool,
}

impl Reward {
    /// Creates a new, available reward.
    pub fn new(id: u64, name: impl Into<String>, cost: u64, reward_type: RewardType) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            reward_type,
            is_available: true,
        }
    }
}

/// What a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerAction {
    /// Points credited for completing a task.
    #[serde(rename = "questCompleted")]
    QuestCompleted,
    /// Points debited for buying a reward.
    #[serde(rename = "rewardBought")]
    RewardBought,
}

/// An immutable, append-only audit record of a credit or debit.
///
/// `reward_id` is meaningful only for `RewardBought` entries; quest
/// completions record `0` there, matching the published wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardHistoryEntry {
    /// Profile the entry belongs to.
    pub redeemed_by: u64,
    /// Whether this records a task credit or a reward debit.
    pub action_type: LedgerAction,
    /// The redeemed reward's id, or 0 for quest completions.
    pub reward_id: u64,
    /// When the entry was appended. Ordering is by insertion, not timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl RewardHistoryEntry {
    /// Records a task-completion credit for `profile_id`.
    pub fn quest_completed(profile_id: u64) -> Self {
        Self {
            redeemed_by: profile_id,
            action_type: LedgerAction::QuestCompleted,
            reward_id: 0,
            recorded_at: Utc::now(),
        }
    }

    /// Records a reward purchase by `profile_id`.
    pub fn reward_bought(profile_id: u64, reward_id: u64) -> Self {
        Self {
            redeemed_by: profile_id,
            action_type: LedgerAction::RewardBought,
            reward_id,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reward_is_available() {
        let reward = Reward::new(1, "Movie night", 50, RewardType::Points);
        assert!(reward.is_available);
        assert_eq!(reward.cost, 50);
    }

    #[test]
    fn test_action_serialization_matches_wire_values() {
        assert_eq!(
            serde_json::to_string(&LedgerAction::QuestCompleted).unwrap(),
            "\"questCompleted\""
        );
        assert_eq!(
            serde_json::to_string(&LedgerAction::RewardBought).unwrap(),
            "\"rewardBought\""
        );
    }
}
