//! Model gateway abstraction.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;
use crate::message::Turn;

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Bounded, chronological message sequence.
    pub messages: Vec<Turn>,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Sends a message sequence to a language model and returns one completion.
///
/// Implementations are stateless per call and never retry; retry policy
/// belongs to the caller. Failures surface as `DomainError::Gateway`.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Requests a single text completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError>;
}
