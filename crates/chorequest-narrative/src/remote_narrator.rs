//! RemoteNarrator - HTTP implementation of the quest narrator.
//!
//! Delegates narration to a configured text-generation service. The call is
//! side-effect-free with respect to ledger data: any transport, status, or
//! decode failure surfaces as `NarrativeUnavailable` and can be retried
//! freely by the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use chorequest_core::error::{ChoreError, Result};
use chorequest_core::quest::{QuestNarration, QuestNarrator, QuestRequest};
use chorequest_infrastructure::NarrativeSettings;

/// Narrator that talks to a remote narrative service over HTTP.
#[derive(Clone, Debug)]
pub struct RemoteNarrator {
    client: Client,
    endpoint: String,
    model: Option<String>,
}

impl RemoteNarrator {
    /// Creates a narrator with an explicit endpoint and timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChoreError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: None,
        })
    }

    /// Creates a narrator from configuration.
    ///
    /// Fails with a configuration error when no endpoint is set.
    pub fn from_settings(settings: &NarrativeSettings) -> Result<Self> {
        let endpoint = settings
            .endpoint
            .clone()
            .ok_or_else(|| ChoreError::config("narrative endpoint is not configured"))?;
        let mut narrator = Self::new(endpoint, Duration::from_secs(settings.timeout_secs))?;
        narrator.model = settings.model.clone();
        Ok(narrator)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[async_trait]
impl QuestNarrator for RemoteNarrator {
    async fn narrate(&self, request: &QuestRequest) -> Result<QuestNarration> {
        let body = NarrateHttpRequest {
            request,
            model: self.model.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "narrative service request failed");
                ChoreError::narrative_unavailable(format!("request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "narrative service returned an error status");
            return Err(ChoreError::narrative_unavailable(format!(
                "service responded with status {status}"
            )));
        }

        let parsed: NarrateHttpResponse = response.json().await.map_err(|err| {
            ChoreError::narrative_unavailable(format!("failed to parse response: {err}"))
        })?;

        Ok(QuestNarration {
            mission_text: parsed.mission_text,
            encouragement: parsed.encouragement,
            tips: parsed.tips,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NarrateHttpRequest<'a> {
    #[serde(flatten)]
    request: &'a QuestRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NarrateHttpResponse {
    mission_text: String,
    encouragement: String,
    #[serde(default)]
    tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorequest_core::profile::AgeBracket;
    use chorequest_core::task::ChoreType;

    fn request() -> QuestRequest {
        QuestRequest {
            quest_type: "daily".to_string(),
            task_id: 1,
            title: "Clean room".to_string(),
            description: "Tidy up".to_string(),
            chore_type: ChoreType::Cleaning,
            age_bracket: AgeBracket::Ages4To8,
            theme: "Fantasy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_narrative_unavailable() {
        // Port 9 (discard) is not listening; the request must fail fast and
        // map to the isolated narrative error, not to a transport panic.
        let narrator =
            RemoteNarrator::new("http://127.0.0.1:9/narrate", Duration::from_millis(250)).unwrap();
        let err = narrator.narrate(&request()).await.unwrap_err();
        assert!(err.is_narrative_unavailable());
    }

    #[test]
    fn test_from_settings_requires_endpoint() {
        let settings = NarrativeSettings::default();
        let err = RemoteNarrator::from_settings(&settings).unwrap_err();
        assert!(matches!(err, ChoreError::Config(_)));
    }
}
