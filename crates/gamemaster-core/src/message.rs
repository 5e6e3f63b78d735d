//! Transcript turns.

use serde::{Deserialize, Serialize};

/// Speaker of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Setup instruction for the narrator.
    System,
    /// The player.
    User,
    /// The narrator (model output).
    Assistant,
}

/// One role-tagged utterance. Turns are never edited once appended to a
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke.
    pub role: Role,
    /// What was said.
    pub content: String,
}

impl Turn {
    /// Builds a system turn.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Builds a user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Builds an assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_serializes_with_role_and_content() {
        let turn = Turn::assistant("The door creaks open.");

        let json = serde_json::to_value(&turn).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "role": "assistant", "content": "The door creaks open." })
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Turn, _> =
            serde_json::from_value(serde_json::json!({ "role": "narrator", "content": "x" }));

        assert!(result.is_err());
    }
}
