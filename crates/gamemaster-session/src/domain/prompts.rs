//! What the player is asked at each step, and the words each step accepts.

use std::fmt::Write as _;

use gamemaster_content::domain::presets::RULES_MENU;

use crate::domain::state::{AdventureDraft, Step};

/// Shown when a session starts.
pub const WELCOME: &str = "Welcome to GameMaster AI! Play role-playing adventures narrated \
by an AI Game Master. Keep several saved adventures, create your own campaign or attach a \
module, and build sheets for your character and companions. Progress is saved after every \
turn so you can resume any adventure.";

/// Accepted for loading a saved adventure.
pub const LOAD_WORDS: &[&str] = &["load", "cargar", "1"];
/// Accepted for starting a new adventure.
pub const NEW_WORDS: &[&str] = &["new", "nueva", "nuevo", "2"];
/// Accepted as a yes.
pub const YES_WORDS: &[&str] = &["y", "yes", "s", "si", "sí"];
/// Accepted as a no.
pub const NO_WORDS: &[&str] = &["n", "no"];
/// End a play session.
pub const QUIT_WORDS: &[&str] = &["quit", "salir", "exit"];

/// Case-insensitive match of trimmed input against a word list.
#[must_use]
pub fn is_one_of(input: &str, words: &[&str]) -> bool {
    let input = input.trim().to_lowercase();
    words.iter().any(|w| *w == input)
}

/// The question asked at `step`.
#[must_use]
pub fn prompt(step: &Step, draft: &AdventureDraft) -> String {
    match step {
        Step::Start | Step::ChoosePath => {
            "What do you want to do?\n  1) Load a saved adventure\n  2) Start a new adventure"
                .to_owned()
        }
        Step::SelectSave { saves } => {
            let mut menu = String::from("Saved adventures:\n");
            for (i, name) in saves.iter().enumerate() {
                let _ = writeln!(menu, "  {}) {name}", i + 1);
            }
            menu.push_str("  N) Start a new adventure\nPick an adventure to continue.");
            menu
        }
        Step::NameAdventure => {
            "Name your adventure (letters, digits, '_' and '-' only).".to_owned()
        }
        Step::ConfirmOverwrite => format!(
            "An adventure called '{}' already exists. Overwrite it? (y/n)",
            draft.adventure_name.as_deref().unwrap_or_default()
        ),
        Step::ChooseRules => format!("Choose a game system:\n {RULES_MENU}"),
        Step::AttachModule => {
            "Attach a campaign module (JSON, YAML or Markdown) now, or answer 'no'.".to_owned()
        }
        Step::PlayerName => "Name of your player character:".to_owned(),
        Step::PlayerClass => "Class of your player character:".to_owned(),
        Step::PlayerAttribute { index } => {
            let attribute = draft
                .rules
                .as_ref()
                .and_then(|r| r.attributes.get(*index))
                .map_or("attribute", String::as_str);
            format!("Value for {attribute}:")
        }
        Step::PlayerHistory => "Short backstory of your character:".to_owned(),
        Step::CompanionCount => "Number of AI companions (0 for none):".to_owned(),
        Step::CompanionName { index } => format!("Name of companion {}:", index + 1),
    }
}

/// Describes the input expected at `step`.
#[must_use]
pub fn hint(step: &Step) -> &'static str {
    match step {
        Step::Start => "any message",
        Step::ChoosePath => "'load' or 'new'",
        Step::SelectSave { .. } => "a save number, or 'n' for a new adventure",
        Step::NameAdventure => "adventure name",
        Step::ConfirmOverwrite => "'y' or 'n'",
        Step::ChooseRules => "'1'",
        Step::AttachModule => "a module attachment, or 'no'",
        Step::PlayerName | Step::CompanionName { .. } => "character name",
        Step::PlayerClass => "character class",
        Step::PlayerAttribute { .. } => "number or short text",
        Step::PlayerHistory => "backstory",
        Step::CompanionCount => "whole number, 0 or more",
    }
}

/// Shown when play begins or resumes.
#[must_use]
pub fn play_banner(adventure_name: &str) -> String {
    format!(
        "Adventure '{adventure_name}' is ready! Describe your actions to begin \
(or 'quit' to stop)."
    )
}

/// Hint while playing.
pub const PLAY_HINT: &str = "your next action, or 'quit'";
