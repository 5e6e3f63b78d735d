//! Response shaping: narrator discipline plus one bounded closing retry.

use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::{CompletionRequest, ModelGateway};
use gamemaster_core::message::{Role, Turn};
use tracing::{debug, info};

use crate::domain::policy::{CLOSING_REQUEST, is_terminated, with_preamble};

/// Token budgets and sampling temperature for a shaped reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaperSettings {
    /// Budget for the main reply.
    pub primary_max_tokens: u32,
    /// Budget for the closing continuation.
    pub closing_max_tokens: u32,
    /// Sampling temperature for both calls.
    pub temperature: f32,
}

impl Default for ShaperSettings {
    fn default() -> Self {
        Self {
            primary_max_tokens: 190,
            closing_max_tokens: 60,
            temperature: 0.7,
        }
    }
}

/// Produces the narrator's reply to the bounded history `history`, whose last
/// entry is the player's turn.
///
/// The player's turn is prefixed with the narrator preamble for this call
/// only. When the reply does not end a sentence the model is asked once to
/// close it, and both parts are joined with a single space. No more than two
/// gateway calls are made, whatever the second reply looks like.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `history` does not end with a user
/// turn, and propagates `DomainError::Gateway` from either call.
pub async fn shape_reply(
    history: &[Turn],
    settings: &ShaperSettings,
    gateway: &dyn ModelGateway,
) -> Result<String, DomainError> {
    let mut messages = history.to_vec();
    match messages.last_mut() {
        Some(last) if last.role == Role::User => {
            last.content = with_preamble(&last.content);
        }
        _ => {
            return Err(DomainError::Validation(
                "history must end with a player turn".to_owned(),
            ));
        }
    }

    let reply = gateway
        .complete(&CompletionRequest {
            messages: messages.clone(),
            max_tokens: settings.primary_max_tokens,
            temperature: settings.temperature,
        })
        .await?;

    if is_terminated(&reply) {
        debug!("reply closed on first call");
        return Ok(reply);
    }

    info!(chars = reply.len(), "reply cut off; requesting a closing sentence");
    let partial = reply.trim();
    if !partial.is_empty() {
        messages.push(Turn::assistant(partial));
    }
    messages.push(Turn::user(CLOSING_REQUEST));
    let closing = gateway
        .complete(&CompletionRequest {
            messages,
            max_tokens: settings.closing_max_tokens,
            temperature: settings.temperature,
        })
        .await?;

    let parts: Vec<&str> = [partial, closing.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    Ok(parts.join(" "))
}
