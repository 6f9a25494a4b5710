//! Quest narrative domain module.
//!
//! # Module Structure
//!
//! - `model`: narrative models (`QuestBrief`, `QuestRequest`, `QuestNarration`)
//! - `narrator`: the `QuestNarrator` collaborator trait

mod model;
mod narrator;

// Re-export public API
pub use model::{QuestBrief, QuestNarration, QuestRequest};
pub use narrator::QuestNarrator;
