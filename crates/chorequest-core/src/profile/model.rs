//! UserProfile domain model.
//!
//! Represents a household member: display name, role, avatar, age bracket,
//! chosen world theme, and the points balance owned by the ledger.

use serde::{Deserialize, Serialize};

/// Role of a profile within the household.
///
/// Authorization checks match exhaustively on this enum; there is no
/// open-ended role string anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access: task/reward creation, settings, roles.
    Admin,
    /// A regular household member.
    User,
    /// Read-mostly participant; also the reported role of unregistered callers.
    Guest,
}

impl UserRole {
    /// Returns true for the admin role.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Age bracket used to pick presentation mode and narrative tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "ages4To8")]
    Ages4To8,
    #[serde(rename = "ages9To12")]
    Ages9To12,
    #[serde(rename = "ages13To17")]
    Ages13To17,
    #[serde(rename = "adult")]
    Adult,
}

/// A household member's profile.
///
/// `id` is assigned once at registration and never reused. `points` is a
/// non-negative balance owned exclusively by the ledger: it is credited on
/// task completion and debited on reward redemption, never written by the
/// profile owner directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable numeric identifier, assigned at registration.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Role within the household.
    pub role: UserRole,
    /// Identifier of the chosen avatar asset.
    pub avatar_id: String,
    /// Age bracket for presentation and narrative tone.
    pub age_bracket: AgeBracket,
    /// Free-form world theme name chosen during onboarding.
    pub world_theme: String,
    /// Current points balance. Never negative.
    pub points: u64,
}

impl UserProfile {
    /// Returns true if this profile holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Applies the cosmetic fields of `update` to this profile.
    ///
    /// Only the owner-editable fields are taken: name, avatar, age bracket,
    /// and world theme. `id`, `role`, and `points` are protected and keep
    /// their stored values no matter what the update carries.
    pub fn apply_cosmetic_update(&mut self, update: &UserProfile) {
        self.name = update.name.clone();
        self.avatar_id = update.avatar_id.clone();
        self.age_bracket = update.age_bracket;
        self.world_theme = update.world_theme.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64, role: UserRole, points: u64) -> UserProfile {
        UserProfile {
            id,
            name: "Robin".to_string(),
            role,
            avatar_id: "avatar-1".to_string(),
            age_bracket: AgeBracket::Ages9To12,
            world_theme: "Fantasy".to_string(),
            points,
        }
    }

    #[test]
    fn test_cosmetic_update_preserves_protected_fields() {
        let mut stored = profile(7, UserRole::User, 42);
        let mut update = profile(99, UserRole::Admin, 9000);
        update.name = "Sam".to_string();
        update.world_theme = "Space".to_string();

        stored.apply_cosmetic_update(&update);

        assert_eq!(stored.name, "Sam");
        assert_eq!(stored.world_theme, "Space");
        // Protected fields keep the stored values.
        assert_eq!(stored.id, 7);
        assert_eq!(stored.role, UserRole::User);
        assert_eq!(stored.points, 42);
    }

    #[test]
    fn test_role_serialization_matches_wire_values() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&AgeBracket::Ages4To8).unwrap(),
            "\"ages4To8\""
        );
    }
}
