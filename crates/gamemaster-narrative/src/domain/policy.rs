//! Narrator policy text and the reply-completeness rule.
//!
//! The wording here is data; the shaping logic only depends on where each
//! piece is placed.

use gamemaster_core::sheet::{CharacterSheet, RuleSystem};
use serde::Serialize;

/// Prepended to the player's latest turn before every play completion.
pub const NARRATOR_PREAMBLE: &str = "You are an experienced Game Master who keeps players \
involved in the story. Do not repeat the player's question or the words they just said. \
Answer according to the current situation of the adventure and finish your reply with a \
complete sentence, but never advance the story or make decisions for the player characters. \
Do not narrate what happens next unless the player explicitly asks for it. Always wait for \
the player's next decision. ";

/// Follow-up sent when a reply was cut off.
pub const CLOSING_REQUEST: &str = "Finish your previous answer clearly and briefly.";

/// Instruction used to summarise an adventure on resume.
pub const RECAP_REQUEST: &str = "You are an experienced and concise Game Master. In a single \
short, clear paragraph, summarise the current situation of the adventure so the player \
remembers the context: where the characters are, what just happened and which options or \
threads are open. Do not invent anything beyond the story already written; only summarise \
what has been played so far.";

/// Longest campaign text embedded in the narrator instruction, in characters.
pub const CAMPAIGN_TEXT_LIMIT: usize = 8_000;

/// Returns whether `reply` ends a sentence once surrounding whitespace is
/// ignored.
#[must_use]
pub fn is_terminated(reply: &str) -> bool {
    reply.trim_end().ends_with(['.', '!', '?'])
}

/// Prefixes a player turn with the narrator preamble.
#[must_use]
pub fn with_preamble(player_text: &str) -> String {
    format!("{NARRATOR_PREAMBLE}{player_text}")
}

#[derive(Serialize)]
struct Party<'a> {
    player: &'a CharacterSheet,
    npcs: &'a [CharacterSheet],
}

/// Builds the narrator instruction that opens every transcript.
#[must_use]
pub fn narrator_instruction(
    rules: &RuleSystem,
    player: &CharacterSheet,
    npcs: &[CharacterSheet],
) -> String {
    let mut text = format!(
        "You are the Game Master running a {} game. Manage the session by creating scenes, \
NPCs, monsters and maps according to the players' actions. Never advance the story or make \
decisions for the players. After answering, wait for the player's next action unless you \
are explicitly told otherwise.",
        rules.name
    );

    if let Some(campaign) = rules.campaign_text.as_deref().filter(|t| !t.trim().is_empty()) {
        text.push_str("\n\nCampaign module:\n");
        text.extend(campaign.chars().take(CAMPAIGN_TEXT_LIMIT));
    }

    let party = Party { player, npcs };
    if let Ok(sheets) = serde_json::to_string(&party) {
        text.push_str("\n\nCharacter sheets: ");
        text.push_str(&sheets);
    }
    text
}
