//! Hosted OpenAI-compatible backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::{CompletionRequest, ModelGateway};

use crate::error::GatewayError;
use crate::wire::{self, ChatRequest};

/// Client for a hosted chat-completions API.
#[derive(Clone)]
pub struct HostedGateway {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for HostedGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedGateway")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HostedGateway {
    /// Create a client for `base_url` (e.g. `https://api.openai.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if the key is empty or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        if api_key.trim().is_empty() {
            return Err(GatewayError::Config("API key not configured".to_owned()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30).min(timeout))
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }
}

#[async_trait]
impl ModelGateway for HostedGateway {
    #[instrument(skip(self, request), fields(backend = "hosted", model = %self.model, messages = request.messages.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        let body = ChatRequest {
            model: Some(&self.model),
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        let text = wire::send(builder).await?;
        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}
