//! The persisted adventure record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::message::Turn;
use crate::sheet::{CharacterSheet, RuleSystem};

/// Everything needed to resume an adventure. Always written as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventureRecord {
    /// Adventure name; also the storage key.
    pub adventure_name: String,
    /// Rule system chosen at setup.
    pub rules: RuleSystem,
    /// The player character.
    pub player_sheet: CharacterSheet,
    /// Companion sheets, in creation order.
    #[serde(default)]
    pub npcs: Vec<CharacterSheet>,
    /// Full transcript. Empty until the first play turn seeds it.
    #[serde(default)]
    pub messages: Vec<Turn>,
    /// Time of the last write, stamped by the caller before saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Listing entry for a stored adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdventureSummary {
    /// Adventure name.
    pub adventure_name: String,
    /// Name of the player character.
    pub player_name: String,
    /// Time of the last write, if recorded.
    pub saved_at: Option<DateTime<Utc>>,
}

impl From<&AdventureRecord> for AdventureSummary {
    fn from(record: &AdventureRecord) -> Self {
        Self {
            adventure_name: record.adventure_name.clone(),
            player_name: record.player_sheet.name.clone(),
            saved_at: record.saved_at,
        }
    }
}

/// Checks that an adventure name is non-empty and made only of ASCII
/// alphanumerics, `_` and `-`. The name doubles as a file name, so nothing
/// else is allowed through.
///
/// # Errors
///
/// Returns `DomainError::Validation` describing the first problem found.
pub fn validate_adventure_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::Validation(
            "adventure name must not be empty".to_owned(),
        ));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(DomainError::Validation(format!(
            "adventure name may only contain letters, digits, '_' and '-' (found {bad:?})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_pass() {
        assert!(validate_adventure_name("MyQuest").is_ok());
        assert!(validate_adventure_name("dark_woods-2").is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(
            validate_adventure_name(""),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_path_like_names_are_rejected() {
        assert!(validate_adventure_name("../etc").is_err());
        assert!(validate_adventure_name("my quest").is_err());
        assert!(validate_adventure_name("búsqueda").is_err());
    }
}
