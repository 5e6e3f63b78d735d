//! Query handlers for the Session context.
//!
//! Read-only views over stored adventures.

use chrono::{DateTime, Utc};
use gamemaster_core::error::DomainError;
use gamemaster_core::message::Turn;
use gamemaster_core::record::{AdventureSummary, validate_adventure_name};
use gamemaster_core::repository::AdventureRepository;
use gamemaster_core::sheet::{CharacterSheet, RuleSystem};
use serde::Serialize;

/// Read-only view of a stored adventure.
#[derive(Debug, Serialize)]
pub struct AdventureView {
    /// Adventure name.
    pub adventure_name: String,
    /// Rule system the adventure is played under.
    pub rules: RuleSystem,
    /// The player character.
    pub player_sheet: CharacterSheet,
    /// Companion sheets.
    pub npcs: Vec<CharacterSheet>,
    /// Number of transcript turns, system turn included.
    pub turn_count: usize,
    /// Full transcript.
    pub messages: Vec<Turn>,
    /// Time of the last write.
    pub saved_at: Option<DateTime<Utc>>,
}

/// Lists stored adventures, sorted by name.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store cannot be read.
pub async fn list_adventures(
    repo: &dyn AdventureRepository,
) -> Result<Vec<AdventureSummary>, DomainError> {
    let mut summaries = repo.list().await?;
    summaries.sort_by(|a, b| a.adventure_name.cmp(&b.adventure_name));
    Ok(summaries)
}

/// Retrieves a stored adventure by name.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed name,
/// `DomainError::NotFound` if nothing is stored under it, and
/// `DomainError::Infrastructure` if the record cannot be read.
pub async fn get_adventure(
    adventure_name: &str,
    repo: &dyn AdventureRepository,
) -> Result<AdventureView, DomainError> {
    validate_adventure_name(adventure_name)?;
    let record = repo.load(adventure_name).await?;
    Ok(AdventureView {
        turn_count: record.messages.len(),
        adventure_name: record.adventure_name,
        rules: record.rules,
        player_sheet: record.player_sheet,
        npcs: record.npcs,
        messages: record.messages,
        saved_at: record.saved_at,
    })
}

#[cfg(test)]
mod tests {
    use gamemaster_content::domain::presets::d20;
    use gamemaster_core::error::DomainError;
    use gamemaster_core::message::Turn;
    use gamemaster_core::record::AdventureRecord;
    use gamemaster_core::sheet::{CharacterSheet, SheetRole};

    use crate::application::query_handlers::{get_adventure, list_adventures};
    use gamemaster_test_support::{FailingAdventureRepository, InMemoryAdventureRepository};

    fn record(name: &str, player: &str) -> AdventureRecord {
        AdventureRecord {
            adventure_name: name.to_owned(),
            rules: d20(),
            player_sheet: CharacterSheet::named(player, SheetRole::Player),
            npcs: vec![CharacterSheet::named("Bram", SheetRole::Companion)],
            messages: vec![Turn::system("Be the GM."), Turn::user("I wait.")],
            saved_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_adventures_returns_summaries_by_name() {
        // Arrange
        let repo = InMemoryAdventureRepository::with_records([
            record("Zeta", "Zed"),
            record("Alpha", "Aria"),
        ]);

        // Act
        let summaries = list_adventures(&repo).await.unwrap();

        // Assert
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].adventure_name, "Alpha");
        assert_eq!(summaries[0].player_name, "Aria");
        assert_eq!(summaries[1].adventure_name, "Zeta");
    }

    #[tokio::test]
    async fn test_get_adventure_returns_view_with_turn_count() {
        // Arrange
        let repo = InMemoryAdventureRepository::with_records([record("Alpha", "Aria")]);

        // Act
        let view = get_adventure("Alpha", &repo).await.unwrap();

        // Assert
        assert_eq!(view.adventure_name, "Alpha");
        assert_eq!(view.turn_count, 2);
        assert_eq!(view.npcs.len(), 1);
        assert_eq!(view.player_sheet.name, "Aria");
    }

    #[tokio::test]
    async fn test_get_adventure_returns_not_found_for_unknown_name() {
        // Arrange
        let repo = InMemoryAdventureRepository::new();

        // Act
        let result = get_adventure("Nowhere", &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::NotFound(name) => assert_eq!(name, "Nowhere"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_adventure_rejects_malformed_name() {
        let result = get_adventure("../secrets", &InMemoryAdventureRepository::new()).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_adventures_propagates_store_failure() {
        let result = list_adventures(&FailingAdventureRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
