//! Task domain model.
//!
//! A task (a "quest" in kids mode) moves through a one-way state machine:
//! `todo -> inProgress -> done`. `done` is terminal and the `todo -> done`
//! shortcut is disallowed. Tasks are never edited or deleted after creation;
//! `assigned_to` is set exactly once, on claim, and retained as history.

use serde::{Deserialize, Serialize};

use crate::error::{ChoreError, Result};

/// Represents the current status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not yet claimed by anyone.
    #[serde(rename = "todo")]
    Todo,
    /// Claimed by a profile and underway.
    #[serde(rename = "inProgress")]
    InProgress,
    /// Completed. Terminal.
    #[serde(rename = "done")]
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "inProgress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// Category of household chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoreType {
    Cleaning,
    Misc,
    Homework,
    Outdoor,
}

/// A household task with its point value and assignment state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier, assigned at creation, immutable thereafter.
    pub id: u64,
    /// Short title shown in both UI modes.
    pub title: String,
    /// Longer description of what needs doing.
    pub description: String,
    /// Chore category.
    pub chore_type: ChoreType,
    /// Points credited to the assignee on completion. Positive, fixed at creation.
    pub points: u64,
    /// Current state-machine position.
    pub status: TaskStatus,
    /// Profile that claimed the task. Set on claim, never cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<u64>,
}

impl Task {
    /// Creates a new unclaimed task in `todo`.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        chore_type: ChoreType,
        points: u64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            chore_type,
            points,
            status: TaskStatus::Todo,
            assigned_to: None,
        }
    }

    /// Claims the task for `profile_id`.
    ///
    /// Only a `todo` task can be claimed; a task already claimed by someone
    /// else fails with `InvalidTransition` rather than being reassigned.
    pub fn claim(&mut self, profile_id: u64) -> Result<()> {
        if self.status != TaskStatus::Todo {
            return Err(ChoreError::invalid_transition(format!(
                "task {} cannot be claimed from status '{}'",
                self.id, self.status
            )));
        }
        self.status = TaskStatus::InProgress;
        self.assigned_to = Some(profile_id);
        Ok(())
    }

    /// Completes the task on behalf of `profile_id`.
    ///
    /// Only the assignee may complete, and only from `inProgress`. Returns
    /// the point value to credit; the caller couples the credit with this
    /// transition in a single critical section.
    pub fn complete(&mut self, profile_id: u64) -> Result<u64> {
        if self.status != TaskStatus::InProgress {
            return Err(ChoreError::invalid_transition(format!(
                "task {} cannot be completed from status '{}'",
                self.id, self.status
            )));
        }
        if self.assigned_to != Some(profile_id) {
            return Err(ChoreError::forbidden(format!(
                "task {} is not assigned to profile {}",
                self.id, profile_id
            )));
        }
        self.status = TaskStatus::Done;
        Ok(self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_from_todo() {
        let mut task = Task::new(1, "Clean room", "Tidy up and vacuum", ChoreType::Cleaning, 10);
        task.claim(5).unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.assigned_to, Some(5));
    }

    #[test]
    fn test_reclaim_fails_without_reassigning() {
        let mut task = Task::new(1, "Clean room", "", ChoreType::Cleaning, 10);
        task.claim(5).unwrap();

        let err = task.claim(6).unwrap_err();
        assert!(err.is_invalid_transition());
        // The original claimant is untouched.
        assert_eq!(task.assigned_to, Some(5));
    }

    #[test]
    fn test_complete_requires_assignee() {
        let mut task = Task::new(1, "Rake leaves", "", ChoreType::Outdoor, 15);
        task.claim(5).unwrap();

        let err = task.complete(6).unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(task.status, TaskStatus::InProgress);

        let points = task.complete(5).unwrap();
        assert_eq!(points, 15);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_todo_to_done_shortcut_is_disallowed() {
        let mut task = Task::new(1, "Homework", "", ChoreType::Homework, 20);
        let err = task.complete(5).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut task = Task::new(1, "Dishes", "", ChoreType::Cleaning, 5);
        task.claim(5).unwrap();
        task.complete(5).unwrap();

        assert!(task.claim(5).unwrap_err().is_invalid_transition());
        assert!(task.complete(5).unwrap_err().is_invalid_transition());
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_status_serialization_matches_wire_values() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(
            serde_json::to_string(&ChoreType::Homework).unwrap(),
            "\"homework\""
        );
    }
}
