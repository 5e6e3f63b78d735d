//! Local model server backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::{CompletionRequest, ModelGateway};

use crate::error::GatewayError;
use crate::wire::{self, ChatRequest};

/// Client for a local model server that takes
/// `{messages, max_tokens, temperature}` and answers in chat-completions shape.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    client: Client,
    url: String,
}

impl LocalGateway {
    /// Create a client for `url` with the given per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl ModelGateway for LocalGateway {
    #[instrument(skip(self, request), fields(backend = "local", messages = request.messages.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        let body = ChatRequest {
            model: None,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let text = wire::send(self.client.post(&self.url).json(&body)).await?;
        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use gamemaster_core::message::Turn;
    use serde_json::{Value, json};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/predict")
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![Turn::system("Be the GM."), Turn::user("I open the door.")],
            max_tokens: 190,
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn test_complete_posts_messages_and_returns_content() {
        // Arrange
        let app = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["max_tokens"], 190);
                assert_eq!(body["messages"][1]["content"], "I open the door.");
                Json(json!({ "choices": [{ "message": { "content": "It creaks." } }] }))
            }),
        );
        let url = serve(app).await;
        let gateway = LocalGateway::new(&url, Duration::from_secs(5)).unwrap();

        // Act
        let text = gateway.complete(&request()).await.unwrap();

        // Assert
        assert_eq!(text, "It creaks.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_gateway_error() {
        let app = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        );
        let url = serve(app).await;
        let gateway = LocalGateway::new(&url, Duration::from_secs(5)).unwrap();

        let result = gateway.complete(&request()).await;

        match result {
            Err(DomainError::Gateway(message)) => {
                assert!(message.contains("503"));
                assert!(message.contains("model loading"));
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_gateway_error() {
        let app = Router::new().route(
            "/predict",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "choices": [{ "message": { "content": "late" } }] }))
            }),
        );
        let url = serve(app).await;
        let gateway = LocalGateway::new(&url, Duration::from_millis(100)).unwrap();

        let result = gateway.complete(&request()).await;

        assert!(matches!(result, Err(DomainError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_gateway_error() {
        let app = Router::new().route("/predict", post(|| async { "not json" }));
        let url = serve(app).await;
        let gateway = LocalGateway::new(&url, Duration::from_secs(5)).unwrap();

        let result = gateway.complete(&request()).await;

        assert!(matches!(result, Err(DomainError::Gateway(m)) if m.contains("invalid response")));
    }
}
