//! Quest narrators.
//!
//! Implementations of the [`QuestNarrator`](chorequest_core::quest::QuestNarrator)
//! collaborator trait: a deterministic template narrator for offline use and
//! a remote HTTP narrator for delegating to a text-generation service.

pub mod remote_narrator;
pub mod template_narrator;

pub use remote_narrator::RemoteNarrator;
pub use template_narrator::TemplateNarrator;

use std::sync::Arc;

use chorequest_core::error::Result;
use chorequest_core::quest::QuestNarrator;
use chorequest_infrastructure::NarrativeSettings;

/// Builds the narrator selected by configuration.
///
/// A configured endpoint selects the remote narrator; otherwise the template
/// narrator is used.
pub fn narrator_from_settings(settings: &NarrativeSettings) -> Result<Arc<dyn QuestNarrator>> {
    match settings.endpoint {
        Some(_) => Ok(Arc::new(RemoteNarrator::from_settings(settings)?)),
        None => Ok(Arc::new(TemplateNarrator::new()?)),
    }
}
