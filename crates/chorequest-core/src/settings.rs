//! System settings domain model.
//!
//! A single mutable record shared by the whole household. Absent until the
//! first admin writes it; `get` returns `None` until then.

use serde::{Deserialize, Serialize};

use crate::reward::RewardType;

/// Account-wide settings, writable only by admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    /// UI theme name.
    pub theme: String,
    /// The currency model advertised account-wide.
    ///
    /// A presentation label only; redemption always debits points. See the
    /// reconciliation note on [`RewardType`].
    pub reward_system: RewardType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let settings = SystemSettings {
            theme: "dark".to_string(),
            reward_system: RewardType::Gems,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"rewardSystem\":\"gems\""));
    }
}
