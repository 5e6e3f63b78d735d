//! A character sheet under construction.

use gamemaster_core::sheet::{Attributes, CharacterSheet, SheetRole};
use serde::{Deserialize, Serialize};

/// The player's sheet as collected so far. Each field is filled by one
/// onboarding step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDraft {
    /// Set by the name step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Set by the class step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Filled one attribute at a time.
    #[serde(default)]
    pub attributes: Attributes,
    /// Set by the history step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}

impl SheetDraft {
    /// Turns the draft into a sheet. Returns `None` until name, class and
    /// history are all present.
    #[must_use]
    pub fn finish(&self, role: SheetRole) -> Option<CharacterSheet> {
        Some(CharacterSheet {
            name: self.name.clone()?,
            role,
            class: self.class.clone()?,
            attributes: self.attributes.clone(),
            history: self.history.clone()?,
        })
    }
}
