//! Quest narrative models.
//!
//! A "quest" is a task as perceived through the kids-mode presentation
//! layer. The narrative generator dresses a task up as a mission briefing;
//! it reads ledger data but never writes any.

use serde::{Deserialize, Serialize};

use crate::profile::AgeBracket;
use crate::task::ChoreType;

/// The narrative briefing returned to the caller for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestBrief {
    /// The narrated task's id.
    pub id: u64,
    /// The mission text shown on the quest card.
    pub mission_text: String,
    /// A short encouragement line.
    pub encouragement: String,
    /// Practical tips for getting the chore done.
    pub tips: Vec<String>,
}

/// Everything a narrator needs to know about the task being narrated.
///
/// Built from ledger data under a read guard and handed to the narrator
/// after the guard is released, so a slow collaborator never holds a lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRequest {
    /// Free-form quest flavor requested by the caller (e.g. "daily").
    pub quest_type: String,
    /// The task being narrated.
    pub task_id: u64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Chore category, for tone and tip selection.
    pub chore_type: ChoreType,
    /// Age bracket of the reader.
    pub age_bracket: AgeBracket,
    /// World theme the narration should be set in.
    pub theme: String,
}

/// The text produced by a narrator, before it is bound to a task id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestNarration {
    pub mission_text: String,
    pub encouragement: String,
    pub tips: Vec<String>,
}

impl QuestNarration {
    /// Binds this narration to the task it describes.
    pub fn into_brief(self, task_id: u64) -> QuestBrief {
        QuestBrief {
            id: task_id,
            mission_text: self.mission_text,
            encouragement: self.encouragement,
            tips: self.tips,
        }
    }
}
