//! Board assembly from configuration.

use std::sync::Arc;

use chorequest_core::error::Result;
use chorequest_core::repository::LedgerSnapshotRepository;
use chorequest_infrastructure::paths::ChoreQuestPaths;
use chorequest_infrastructure::{
    ChoreQuestConfig, EphemeralLedgerRepository, SharedLedger, TomlLedgerRepository,
};
use chorequest_narrative::narrator_from_settings;

use crate::board_usecase::BoardUseCase;

/// Builds a fully wired `BoardUseCase` from configuration.
///
/// Persistence and narrator selection both follow the config: a disabled
/// persistence section yields an ephemeral in-memory ledger, an unset
/// narrative endpoint yields the template narrator.
pub async fn build_board(config: &ChoreQuestConfig) -> Result<BoardUseCase> {
    let repository: Arc<dyn LedgerSnapshotRepository> = if config.persistence.enabled {
        let path = match &config.persistence.ledger_file {
            Some(path) => path.into(),
            None => ChoreQuestPaths::ledger_file()?,
        };
        tracing::info!(path = %path.display(), "ledger persistence enabled");
        Arc::new(TomlLedgerRepository::with_path(path))
    } else {
        Arc::new(EphemeralLedgerRepository)
    };

    let ledger = SharedLedger::load(repository).await?;
    let narrator = narrator_from_settings(&config.narrative)?;
    Ok(BoardUseCase::new(ledger, narrator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_builds_in_memory_board() {
        let board = build_board(&ChoreQuestConfig::default()).await.unwrap();
        let auth = chorequest_core::AuthContext::authenticated("principal-1");
        assert_eq!(board.get_caller_user_profile(&auth).await.unwrap(), None);
    }
}
