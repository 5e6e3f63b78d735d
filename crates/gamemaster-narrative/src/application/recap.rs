//! Resume recap.

use gamemaster_core::gateway::{CompletionRequest, ModelGateway};
use gamemaster_core::message::Turn;
use tracing::warn;

use crate::domain::policy::RECAP_REQUEST;
use crate::domain::window::{RECAP_WINDOW_TURNS, window};

const RECAP_MAX_TOKENS: u32 = 100;
const RECAP_TEMPERATURE: f32 = 0.7;

/// Summarises the adventure so far for a returning player.
///
/// Never fails: a gateway error becomes a bracketed notice so that loading an
/// adventure does not depend on the model being reachable.
pub async fn recap(transcript: &[Turn], gateway: &dyn ModelGateway) -> String {
    if transcript.is_empty() {
        return "No turns have been played yet.".to_owned();
    }

    let mut messages = window(transcript, RECAP_WINDOW_TURNS);
    messages.push(Turn::user(RECAP_REQUEST));

    let request = CompletionRequest {
        messages,
        max_tokens: RECAP_MAX_TOKENS,
        temperature: RECAP_TEMPERATURE,
    };
    match gateway.complete(&request).await {
        Ok(summary) => summary.trim().to_owned(),
        Err(e) => {
            warn!(error = %e, "recap generation failed");
            format!("[Automatic recap unavailable: {e}]")
        }
    }
}
