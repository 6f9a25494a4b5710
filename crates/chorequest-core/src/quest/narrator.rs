//! Quest narrator trait.
//!
//! Defines the interface for the external narrative collaborator. From the
//! ledger's perspective this is a pure function of its inputs: a failure here
//! surfaces as `NarrativeUnavailable` and can be retried freely without any
//! effect on task, profile, or reward state.

use async_trait::async_trait;

use super::model::{QuestNarration, QuestRequest};
use crate::error::Result;

/// An abstract generator of quest narrative text.
///
/// Implementations may call out to a remote text-generation service or render
/// locally from templates. They must not touch ledger state.
#[async_trait]
pub trait QuestNarrator: Send + Sync {
    /// Produces narrative text for the given request.
    ///
    /// # Returns
    ///
    /// - `Ok(QuestNarration)`: narration produced
    /// - `Err(ChoreError::NarrativeUnavailable)`: the collaborator failed
    async fn narrate(&self, request: &QuestRequest) -> Result<QuestNarration>;
}
