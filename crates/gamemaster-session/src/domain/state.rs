//! Session state: where the player is in onboarding or play.
//!
//! The state is serialized whole into the opaque token handed back to the
//! client and must be fully reconstructible from it.

use gamemaster_character::domain::draft::SheetDraft;
use gamemaster_core::error::DomainError;
use gamemaster_core::sheet::{CharacterSheet, RuleSystem, SheetRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Onboarding steps, in the order they are normally visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Nothing has happened yet.
    Start,
    /// Waiting for load-or-new.
    ChoosePath,
    /// Waiting for a pick from the listed saves.
    SelectSave {
        /// Adventure names shown to the player, in menu order.
        saves: Vec<String>,
    },
    /// Waiting for the new adventure's name.
    NameAdventure,
    /// The chosen name exists; waiting for overwrite confirmation.
    ConfirmOverwrite,
    /// Waiting for a rule system.
    ChooseRules,
    /// Waiting for an optional campaign module.
    AttachModule,
    /// Waiting for the player character's name.
    PlayerName,
    /// Waiting for the player character's class.
    PlayerClass,
    /// Waiting for the value of `rules.attributes[index]`.
    PlayerAttribute {
        /// Position in the rule system's attribute list.
        index: usize,
    },
    /// Waiting for the player character's backstory.
    PlayerHistory,
    /// Waiting for the number of companions.
    CompanionCount,
    /// Waiting for the name of companion `index`.
    CompanionName {
        /// Zero-based companion position.
        index: usize,
    },
}

impl Step {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ChoosePath => "choose_path",
            Self::SelectSave { .. } => "select_save",
            Self::NameAdventure => "name_adventure",
            Self::ConfirmOverwrite => "confirm_overwrite",
            Self::ChooseRules => "choose_rules",
            Self::AttachModule => "attach_module",
            Self::PlayerName => "player_name",
            Self::PlayerClass => "player_class",
            Self::PlayerAttribute { .. } => "player_attribute",
            Self::PlayerHistory => "player_history",
            Self::CompanionCount => "companion_count",
            Self::CompanionName { .. } => "companion_name",
        }
    }
}

/// Everything collected during onboarding so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureDraft {
    /// Name of the adventure being created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventure_name: Option<String>,
    /// Rule system, once chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleSystem>,
    /// The player character, filled step by step.
    #[serde(default)]
    pub player: SheetDraft,
    /// Companions created so far.
    #[serde(default)]
    pub npcs: Vec<CharacterSheet>,
    /// Number of companions requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_npcs: Option<usize>,
    /// The player agreed to replace a stored adventure of the same name.
    #[serde(default)]
    pub overwrite_confirmed: bool,
}

impl AdventureDraft {
    /// The adventure name chosen so far.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptState` if no name was chosen.
    pub fn adventure_name(&self) -> Result<&str, DomainError> {
        self.adventure_name
            .as_deref()
            .ok_or_else(|| missing("adventure_name"))
    }

    /// The rule system chosen so far.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptState` if no rules were chosen.
    pub fn rules(&self) -> Result<&RuleSystem, DomainError> {
        self.rules.as_ref().ok_or_else(|| missing("rules"))
    }

    /// The finished player sheet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptState` while name, class or history is
    /// still missing.
    pub fn player_sheet(&self) -> Result<CharacterSheet, DomainError> {
        self.player
            .finish(SheetRole::Player)
            .ok_or_else(|| missing("player sheet fields"))
    }

    /// Whether the player sheet and every requested companion are in place,
    /// leaving only the write.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.player.finish(SheetRole::Player).is_some() && self.n_npcs == Some(self.npcs.len())
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::CorruptState(format!("draft is missing {field}"))
}

/// The session state carried by the opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionState {
    /// Creating or choosing an adventure.
    Onboarding {
        /// Current step.
        step: Step,
        /// Data collected so far.
        #[serde(default)]
        draft: AdventureDraft,
    },
    /// Playing a stored adventure.
    Playing {
        /// Key of the adventure's persisted record.
        adventure_name: String,
    },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::at(Step::Start, AdventureDraft::default())
    }
}

impl SessionState {
    /// An onboarding state at `step`.
    #[must_use]
    pub fn at(step: Step, draft: AdventureDraft) -> Self {
        Self::Onboarding { step, draft }
    }

    /// Short name of the current step, for logs and hints.
    #[must_use]
    pub fn step_name(&self) -> &'static str {
        match self {
            Self::Onboarding { step, .. } => step.name(),
            Self::Playing { .. } => "playing",
        }
    }

    /// Decodes a state token. A missing or `null` token is a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptState` when the token is not a known
    /// state or the draft lacks what its step needs.
    pub fn from_token(token: Option<&Value>) -> Result<Self, DomainError> {
        let state = match token {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(value) => Self::deserialize(value)
                .map_err(|e| DomainError::CorruptState(format!("undecodable state token: {e}")))?,
        };
        state.check()?;
        Ok(state)
    }

    /// Verifies that the draft holds every field the current step relies on.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptState` naming the first missing field or
    /// out-of-range index.
    pub fn check(&self) -> Result<(), DomainError> {
        let (step, draft) = match self {
            Self::Playing { adventure_name } if adventure_name.is_empty() => {
                return Err(missing("adventure_name"));
            }
            Self::Playing { .. } => return Ok(()),
            Self::Onboarding { step, draft } => (step, draft),
        };

        match step {
            Step::Start | Step::ChoosePath | Step::SelectSave { .. } | Step::NameAdventure => {}
            Step::ConfirmOverwrite | Step::ChooseRules => {
                draft.adventure_name()?;
            }
            Step::AttachModule | Step::PlayerName => {
                draft.adventure_name()?;
                draft.rules()?;
            }
            Step::PlayerClass => {
                draft.rules()?;
                draft.player.name.as_ref().ok_or_else(|| missing("player.name"))?;
            }
            Step::PlayerAttribute { index } => {
                let rules = draft.rules()?;
                draft.player.class.as_ref().ok_or_else(|| missing("player.class"))?;
                if *index >= rules.attributes.len() {
                    return Err(DomainError::CorruptState(format!(
                        "attribute index {index} out of range for {} attributes",
                        rules.attributes.len()
                    )));
                }
            }
            Step::PlayerHistory => {
                draft.rules()?;
                draft.player.class.as_ref().ok_or_else(|| missing("player.class"))?;
            }
            Step::CompanionCount => {
                draft.adventure_name()?;
                draft.rules()?;
                draft.player_sheet()?;
            }
            Step::CompanionName { index } => {
                draft.adventure_name()?;
                draft.rules()?;
                draft.player_sheet()?;
                let expected = draft.n_npcs.ok_or_else(|| missing("n_npcs"))?;
                if *index >= expected || draft.npcs.len() != *index {
                    return Err(DomainError::CorruptState(format!(
                        "companion index {index} inconsistent with {} of {expected} created",
                        draft.npcs.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn d20() -> RuleSystem {
        RuleSystem {
            name: "D20".to_owned(),
            attributes: vec!["STR".to_owned(), "DEX".to_owned()],
            campaign_text: None,
            source_hash: None,
        }
    }

    #[test]
    fn test_missing_or_null_token_is_a_fresh_session() {
        assert_eq!(SessionState::from_token(None).unwrap(), SessionState::default());
        assert_eq!(
            SessionState::from_token(Some(&Value::Null)).unwrap(),
            SessionState::default()
        );
    }

    #[test]
    fn test_token_survives_serialization() {
        // Arrange
        let state = SessionState::at(
            Step::PlayerAttribute { index: 1 },
            AdventureDraft {
                adventure_name: Some("MyQuest".to_owned()),
                rules: Some(d20()),
                player: SheetDraft {
                    name: Some("Aria".to_owned()),
                    class: Some("Rogue".to_owned()),
                    ..SheetDraft::default()
                },
                ..AdventureDraft::default()
            },
        );

        // Act
        let token = serde_json::to_value(&state).unwrap();
        let decoded = SessionState::from_token(Some(&token)).unwrap();

        // Assert
        assert_eq!(token["phase"], "onboarding");
        assert_eq!(token["step"]["kind"], "player_attribute");
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_unknown_step_is_corrupt() {
        let token = json!({"phase": "onboarding", "step": {"kind": "elige_sistema"}});

        let result = SessionState::from_token(Some(&token));

        assert!(matches!(result, Err(DomainError::CorruptState(_))));
    }

    #[test]
    fn test_step_without_its_draft_fields_is_corrupt() {
        let token = json!({"phase": "onboarding", "step": {"kind": "player_name"}, "draft": {}});

        let result = SessionState::from_token(Some(&token));

        assert!(matches!(result, Err(DomainError::CorruptState(_))));
    }

    #[test]
    fn test_attribute_index_past_the_list_is_corrupt() {
        let state = SessionState::at(
            Step::PlayerAttribute { index: 2 },
            AdventureDraft {
                rules: Some(d20()),
                player: SheetDraft {
                    name: Some("Aria".to_owned()),
                    class: Some("Rogue".to_owned()),
                    ..SheetDraft::default()
                },
                ..AdventureDraft::default()
            },
        );

        assert!(matches!(state.check(), Err(DomainError::CorruptState(_))));
    }

    #[test]
    fn test_companion_index_must_match_created_companions() {
        let state = SessionState::at(
            Step::CompanionName { index: 1 },
            AdventureDraft {
                adventure_name: Some("MyQuest".to_owned()),
                rules: Some(d20()),
                n_npcs: Some(2),
                ..AdventureDraft::default()
            },
        );

        assert!(matches!(state.check(), Err(DomainError::CorruptState(_))));
    }

    #[test]
    fn test_playing_token_decodes() {
        let token = json!({"phase": "playing", "adventure_name": "MyQuest"});

        let state = SessionState::from_token(Some(&token)).unwrap();

        assert_eq!(
            state,
            SessionState::Playing {
                adventure_name: "MyQuest".to_owned()
            }
        );
        assert_eq!(state.step_name(), "playing");
    }
}
