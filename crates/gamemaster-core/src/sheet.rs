//! Rule systems and character sheets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The rule system an adventure is played under. Fixed once onboarding ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSystem {
    /// Display name, e.g. `D20`.
    pub name: String,
    /// Attribute names collected for every character, in prompt order.
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Full text of an attached campaign document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_text: Option<String>,
    /// SHA-256 of the imported module source, if the rules came from a module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// An attribute value: numeric when the player typed a number, free text
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric score.
    Number(i64),
    /// Anything that is not a plain integer.
    Text(String),
}

impl AttributeValue {
    /// Interprets raw player input as an attribute value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_owned()),
        }
    }
}

/// Attribute scores keyed by attribute name, in rule-system order.
pub type Attributes = IndexMap<String, AttributeValue>;

/// Whether a sheet belongs to the player or to a companion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetRole {
    /// The player character.
    Player,
    /// A model-driven companion.
    #[default]
    Companion,
}

impl SheetRole {
    /// Human-readable label used in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "player character",
            Self::Companion => "companion",
        }
    }
}

/// A character sheet. Created during onboarding; never mutated during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Player or companion.
    #[serde(default)]
    pub role: SheetRole,
    /// Character class.
    #[serde(default)]
    pub class: String,
    /// Attribute scores keyed by attribute name.
    #[serde(default)]
    pub attributes: Attributes,
    /// Backstory.
    #[serde(default)]
    pub history: String,
}

impl CharacterSheet {
    /// A sheet carrying only a name; used when nothing else is known.
    #[must_use]
    pub fn named(name: impl Into<String>, role: SheetRole) -> Self {
        Self {
            name: name.into(),
            role,
            class: String::new(),
            attributes: Attributes::new(),
            history: String::new(),
        }
    }
}
