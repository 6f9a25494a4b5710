//! Board use case implementation.
//!
//! `BoardUseCase` is the full operation surface of the chore board: profile
//! registration and roles, the task state machine, reward redemption,
//! history, settings, and quest narration. It resolves each request's
//! [`AuthContext`] to a profile, enforces the role gate, and delegates every
//! mutation to a single exclusive critical section on the shared ledger —
//! caller resolution, the rule check, and the state change all happen under
//! one guard, so no interleaving can split a check from its update.
//!
//! The quest narrator is the one external collaborator: it is awaited with
//! no ledger guard held, and its failures never touch ledger state.

use std::sync::Arc;

use chorequest_core::error::{ChoreError, Result};
use chorequest_core::identity::{AuthContext, CallerId};
use chorequest_core::ledger::Ledger;
use chorequest_core::profile::{AgeBracket, UserProfile, UserRole};
use chorequest_core::quest::{QuestBrief, QuestNarrator, QuestRequest};
use chorequest_core::reward::{Reward, RewardHistoryEntry, RewardType};
use chorequest_core::settings::SystemSettings;
use chorequest_core::task::{ChoreType, Task};
use chorequest_core::theme::{WorldTheme, builtin_world_themes};
use chorequest_infrastructure::SharedLedger;

/// Resolves the caller to a registered profile id.
fn registered_profile_id(ledger: &Ledger, caller: &CallerId) -> Result<u64> {
    ledger
        .profile_id_of(caller)
        .ok_or(ChoreError::NotRegistered)
}

/// Resolves the caller and checks for the admin role.
///
/// Denials are logged with the operation name before surfacing `Forbidden`.
fn require_admin(ledger: &Ledger, caller: &CallerId, op: &'static str) -> Result<u64> {
    let profile_id = registered_profile_id(ledger, caller)?;
    let is_admin = ledger.profile(profile_id).is_some_and(|p| p.is_admin());
    if !is_admin {
        tracing::warn!(%caller, op, "admin operation denied");
        return Err(ChoreError::forbidden(format!("{op} requires the admin role")));
    }
    Ok(profile_id)
}

/// Use case exposing the household chore board to authenticated callers.
///
/// Cloning is cheap; all clones share the same ledger and narrator.
#[derive(Clone)]
pub struct BoardUseCase {
    /// Shared, lock-guarded ledger state.
    ledger: SharedLedger,
    /// External narrative collaborator.
    narrator: Arc<dyn QuestNarrator>,
}

impl BoardUseCase {
    /// Creates a new `BoardUseCase` over the given ledger and narrator.
    pub fn new(ledger: SharedLedger, narrator: Arc<dyn QuestNarrator>) -> Self {
        Self { ledger, narrator }
    }

    // ========================================================================
    // Profiles & registration
    // ========================================================================

    /// Registers a profile for the caller and returns the new profile id.
    pub async fn register_profile(
        &self,
        auth: &AuthContext,
        name: &str,
        role: UserRole,
        avatar_id: &str,
        age_bracket: AgeBracket,
        world_theme: &str,
    ) -> Result<u64> {
        let caller = auth.caller()?.clone();
        let name = name.to_string();
        let avatar_id = avatar_id.to_string();
        let world_theme = world_theme.to_string();
        let id = self
            .ledger
            .mutate(move |l| {
                l.register_profile(&caller, name, role, avatar_id, age_bracket, world_theme)
            })
            .await?;
        tracing::info!(profile_id = id, "profile registered");
        Ok(id)
    }

    /// Returns the caller's profile, or `None` if not registered yet.
    pub async fn get_caller_user_profile(&self, auth: &AuthContext) -> Result<Option<UserProfile>> {
        let caller = auth.caller()?.clone();
        Ok(self.ledger.read(move |l| l.caller_profile(&caller).cloned()).await)
    }

    /// Applies the caller's cosmetic profile changes.
    ///
    /// `id`, `role`, and `points` in `profile` are ignored; the stored values
    /// always win. Those fields belong to the ledger and the role gate.
    pub async fn save_caller_user_profile(
        &self,
        auth: &AuthContext,
        profile: UserProfile,
    ) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                let profile_id = registered_profile_id(l, &caller)?;
                l.save_profile(profile_id, &profile)
            })
            .await
    }

    /// Returns true when the caller holds the admin role.
    pub async fn is_caller_admin(&self, auth: &AuthContext) -> Result<bool> {
        let caller = auth.caller()?.clone();
        Ok(self
            .ledger
            .read(move |l| l.caller_profile(&caller).is_some_and(|p| p.is_admin()))
            .await)
    }

    /// Returns the caller's role; unregistered callers report `Guest`.
    pub async fn get_caller_role(&self, auth: &AuthContext) -> Result<UserRole> {
        let caller = auth.caller()?.clone();
        Ok(self
            .ledger
            .read(move |l| {
                l.caller_profile(&caller)
                    .map(|p| p.role)
                    .unwrap_or(UserRole::Guest)
            })
            .await)
    }

    /// Returns the profile with the given id.
    pub async fn get_profile(&self, auth: &AuthContext, profile_id: u64) -> Result<UserProfile> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                l.profile(profile_id)
                    .cloned()
                    .ok_or_else(|| ChoreError::not_found("profile", profile_id))
            })
            .await
    }

    /// Returns all profiles in ascending id order.
    pub async fn get_all_profiles(&self, auth: &AuthContext) -> Result<Vec<UserProfile>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                Ok(l.all_profiles())
            })
            .await
    }

    /// Returns all profiles ordered by points descending, ties broken by
    /// ascending id.
    pub async fn get_leader_board(&self, auth: &AuthContext) -> Result<Vec<UserProfile>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                Ok(l.leaderboard())
            })
            .await
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Promotes the caller to admin, exactly once globally.
    ///
    /// The existence check and the promotion are one atomic check-and-set
    /// under the exclusive guard: with N concurrent callers exactly one wins
    /// and the rest fail `AdminAlreadyExists`.
    pub async fn become_first_admin(&self, auth: &AuthContext) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                let profile_id = registered_profile_id(l, &caller)?;
                l.become_first_admin(profile_id)?;
                tracing::info!(profile_id, "bootstrap admin promoted");
                Ok(())
            })
            .await
    }

    /// Assigns a role to the profile registered for `target`.
    pub async fn assign_user_role(
        &self,
        auth: &AuthContext,
        target: &CallerId,
        role: UserRole,
    ) -> Result<()> {
        let caller = auth.caller()?.clone();
        let target = target.clone();
        self.ledger
            .mutate(move |l| {
                require_admin(l, &caller, "assign_user_role")?;
                let target_id = l
                    .profile_id_of(&target)
                    .ok_or_else(|| ChoreError::not_found("profile", &target))?;
                l.assign_role(target_id, role)?;
                tracing::info!(profile_id = target_id, ?role, "role assigned");
                Ok(())
            })
            .await
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Creates a task and returns its id. Admin only.
    pub async fn create_task(
        &self,
        auth: &AuthContext,
        title: &str,
        description: &str,
        chore_type: ChoreType,
        points: u64,
    ) -> Result<u64> {
        let caller = auth.caller()?.clone();
        let title = title.to_string();
        let description = description.to_string();
        let id = self
            .ledger
            .mutate(move |l| {
                require_admin(l, &caller, "create_task")?;
                l.create_task(title, description, chore_type, points)
            })
            .await?;
        tracing::info!(task_id = id, points, "task created");
        Ok(id)
    }

    /// Returns all tasks in ascending id order.
    pub async fn get_all_tasks(&self, auth: &AuthContext) -> Result<Vec<Task>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                Ok(l.all_tasks())
            })
            .await
    }

    /// Returns the tasks assigned to `profile_id`.
    pub async fn get_tasks(&self, auth: &AuthContext, profile_id: u64) -> Result<Vec<Task>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                Ok(l.tasks_for(profile_id))
            })
            .await
    }

    /// Claims a task for the caller.
    ///
    /// Two concurrent claims on the same task serialize on the exclusive
    /// guard: one observes `todo` and wins, the other fails
    /// `InvalidTransition`.
    pub async fn claim_task(&self, auth: &AuthContext, task_id: u64) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                let profile_id = registered_profile_id(l, &caller)?;
                l.claim_task(task_id, profile_id)?;
                tracing::info!(task_id, profile_id, "task claimed");
                Ok(())
            })
            .await
    }

    /// Completes a task the caller has claimed, crediting its points.
    pub async fn complete_task(&self, auth: &AuthContext, task_id: u64) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                let profile_id = registered_profile_id(l, &caller)?;
                let points = l.complete_task(task_id, profile_id)?;
                tracing::info!(task_id, profile_id, points, "task completed");
                Ok(())
            })
            .await
    }

    // ========================================================================
    // Rewards & redemption
    // ========================================================================

    /// Creates a reward and returns its id. Admin only.
    pub async fn create_reward(
        &self,
        auth: &AuthContext,
        name: &str,
        cost: u64,
        reward_type: RewardType,
    ) -> Result<u64> {
        let caller = auth.caller()?.clone();
        let name = name.to_string();
        let id = self
            .ledger
            .mutate(move |l| {
                require_admin(l, &caller, "create_reward")?;
                l.create_reward(name, cost, reward_type)
            })
            .await?;
        tracing::info!(reward_id = id, cost, "reward created");
        Ok(id)
    }

    /// Toggles a reward's catalog availability. Admin only.
    pub async fn set_reward_availability(
        &self,
        auth: &AuthContext,
        reward_id: u64,
        available: bool,
    ) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                require_admin(l, &caller, "set_reward_availability")?;
                l.set_reward_availability(reward_id, available)?;
                tracing::info!(reward_id, available, "reward availability changed");
                Ok(())
            })
            .await
    }

    /// Returns the rewards currently offered in the catalog.
    pub async fn get_available_rewards(&self, auth: &AuthContext) -> Result<Vec<Reward>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                Ok(l.available_rewards())
            })
            .await
    }

    /// Redeems a reward against the caller's balance.
    ///
    /// The balance check and the debit are one critical section; concurrent
    /// redemptions can never drive the balance negative.
    pub async fn redeem_reward(&self, auth: &AuthContext, reward_id: u64) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                let profile_id = registered_profile_id(l, &caller)?;
                l.redeem_reward(reward_id, profile_id)?;
                tracing::info!(reward_id, profile_id, "reward redeemed");
                Ok(())
            })
            .await
    }

    /// Returns the history entries for `profile_id`, oldest first.
    ///
    /// Callers may read their own history; admins may read anyone's.
    pub async fn get_reward_history(
        &self,
        auth: &AuthContext,
        profile_id: u64,
    ) -> Result<Vec<RewardHistoryEntry>> {
        let caller = auth.caller()?.clone();
        self.ledger
            .read(move |l| {
                let caller_id = registered_profile_id(l, &caller)?;
                let is_admin = l.profile(caller_id).is_some_and(|p| p.is_admin());
                if caller_id != profile_id && !is_admin {
                    tracing::warn!(%caller, profile_id, "history access denied");
                    return Err(ChoreError::forbidden(
                        "only admins may view another profile's history",
                    ));
                }
                Ok(l.history_for(profile_id))
            })
            .await
    }

    // ========================================================================
    // Settings & themes
    // ========================================================================

    /// Returns the system settings, or `None` until an admin has set them.
    pub async fn get_system_settings(&self, auth: &AuthContext) -> Result<Option<SystemSettings>> {
        auth.caller()?;
        Ok(self.ledger.read(|l| l.settings().cloned()).await)
    }

    /// Replaces the system settings. Admin only.
    pub async fn set_system_settings(
        &self,
        auth: &AuthContext,
        settings: SystemSettings,
    ) -> Result<()> {
        let caller = auth.caller()?.clone();
        self.ledger
            .mutate(move |l| {
                require_admin(l, &caller, "set_system_settings")?;
                l.set_settings(settings);
                tracing::info!("system settings updated");
                Ok(())
            })
            .await
    }

    /// Returns the selectable world themes.
    pub async fn get_available_world_themes(&self, auth: &AuthContext) -> Result<Vec<WorldTheme>> {
        auth.caller()?;
        Ok(builtin_world_themes().to_vec())
    }

    // ========================================================================
    // Quest narration
    // ========================================================================

    /// Produces a narrative briefing for a task.
    ///
    /// Task data is copied out under a read guard; the narrator is awaited
    /// with no guard held, so a slow or failing collaborator never blocks or
    /// corrupts ledger operations.
    pub async fn generate_quest(
        &self,
        auth: &AuthContext,
        quest_type: &str,
        task_id: u64,
        age_bracket: AgeBracket,
        theme: &str,
    ) -> Result<QuestBrief> {
        let caller = auth.caller()?.clone();
        let quest_type = quest_type.to_string();
        let theme = theme.to_string();

        let request = self
            .ledger
            .read(move |l| {
                registered_profile_id(l, &caller)?;
                let task = l
                    .task(task_id)
                    .ok_or_else(|| ChoreError::not_found("task", task_id))?;
                Ok::<QuestRequest, ChoreError>(QuestRequest {
                    quest_type,
                    task_id,
                    title: task.title.clone(),
                    description: task.description.clone(),
                    chore_type: task.chore_type,
                    age_bracket,
                    theme,
                })
            })
            .await?;

        match self.narrator.narrate(&request).await {
            Ok(narration) => Ok(narration.into_brief(task_id)),
            Err(err) => {
                tracing::error!(task_id, error = %err, "quest narration failed");
                Err(err)
            }
        }
    }
}
