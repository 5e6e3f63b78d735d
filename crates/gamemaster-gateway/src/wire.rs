//! Chat-completions wire types shared by both backends.

use gamemaster_core::message::Turn;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: &'a [Turn],
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts `choices[0].message.content`.
pub(crate) fn first_content(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("no choices in response".to_owned()))?
        .message
        .content
        .ok_or_else(|| GatewayError::InvalidResponse("choice has no content".to_owned()))
}

/// Sends a prepared request and reads the completion text out of the reply.
pub(crate) async fn send(builder: RequestBuilder) -> Result<String, GatewayError> {
    let response = builder.send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Status { status, body });
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    first_content(parsed)
}
