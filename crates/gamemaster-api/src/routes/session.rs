//! Routes for the Session context.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use gamemaster_content::domain::module::ModuleSource;
use gamemaster_session::application::command_handlers::{self, StepOutcome};
use gamemaster_session::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// What the player typed.
    pub message: String,
    /// State token from the previous response; absent on the first message.
    #[serde(default)]
    pub state: Option<Value>,
    /// Campaign module attached to this message.
    #[serde(default)]
    pub module: Option<ModuleSource>,
}

/// POST /message
#[instrument(
    skip(state, request),
    fields(has_state = request.state.is_some(), has_module = request.module.is_some())
)]
async fn submit_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<StepOutcome>, ApiError> {
    let command = commands::SubmitMessage {
        correlation_id: Uuid::new_v4(),
        text: request.message,
        module: request.module,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_message command");

    let outcome = command_handlers::handle_submit_message(
        &command,
        request.state.as_ref(),
        &state.session_context(),
    )
    .await?;

    Ok(Json(outcome))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new().route("/message", post(submit_message))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use gamemaster_core::gateway::ModelGateway;
    use gamemaster_core::message::Turn;
    use gamemaster_core::record::AdventureRecord;
    use gamemaster_core::repository::AdventureRepository;
    use gamemaster_core::sheet::{CharacterSheet, SheetRole};
    use gamemaster_test_support::{
        FailingGateway, FixedClock, InMemoryAdventureRepository, ScriptedGateway,
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn app_state_with(
        gateway: Arc<dyn ModelGateway>,
        repository: Arc<dyn AdventureRepository>,
    ) -> AppState {
        AppState::new(Arc::new(FixedClock::standard()), gateway, repository)
    }

    fn playing_repository() -> Arc<InMemoryAdventureRepository> {
        Arc::new(InMemoryAdventureRepository::with_records([AdventureRecord {
            adventure_name: "MyQuest".to_owned(),
            rules: gamemaster_content::domain::presets::d20(),
            player_sheet: CharacterSheet::named("Aria", SheetRole::Player),
            npcs: Vec::new(),
            messages: vec![Turn::system("Be the GM.")],
            saved_at: None,
        }]))
    }

    fn message_request(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/message")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn json_of(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_first_message_returns_welcome_and_token() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGateway::new(Vec::<String>::new())),
            Arc::new(InMemoryAdventureRepository::new()),
        ));

        // Act
        let response = app
            .oneshot(message_request(&json!({ "message": "" })))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert!(json["reply"].as_str().unwrap().starts_with("Welcome to GameMaster AI!"));
        assert_eq!(json["prompt_hint"], "'load' or 'new'");
        assert_eq!(json["state"]["phase"], "onboarding");
        assert_eq!(json["state"]["step"]["kind"], "choose_path");
    }

    #[tokio::test]
    async fn test_play_message_returns_reply() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGateway::new(["The door creaks open."])),
            playing_repository(),
        ));
        let body = json!({
            "message": "I push the door.",
            "state": { "phase": "playing", "adventure_name": "MyQuest" }
        });

        // Act
        let response = app.oneshot(message_request(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["reply"], "The door creaks open.");
        assert_eq!(json["state"]["adventure_name"], "MyQuest");
    }

    #[tokio::test]
    async fn test_play_message_returns_502_when_gateway_fails() {
        // Arrange
        let repository = playing_repository();
        let app = router().with_state(app_state_with(Arc::new(FailingGateway), repository.clone()));
        let body = json!({
            "message": "I push the door.",
            "state": { "phase": "playing", "adventure_name": "MyQuest" }
        });

        // Act
        let response = app.oneshot(message_request(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = json_of(response).await;
        assert_eq!(json["error"], "gateway_error");
        assert_eq!(repository.save_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_adventure_returns_404() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGateway::new(["unused."])),
            Arc::new(InMemoryAdventureRepository::new()),
        ));
        let body = json!({
            "message": "I push the door.",
            "state": { "phase": "playing", "adventure_name": "Gone" }
        });

        // Act
        let response = app.oneshot(message_request(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_corrupt_token_resets_with_200() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGateway::new(Vec::<String>::new())),
            Arc::new(InMemoryAdventureRepository::new()),
        ));
        let body = json!({ "message": "hello", "state": "not-a-state" });

        // Act
        let response = app.oneshot(message_request(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["state"]["step"]["kind"], "start");
    }

    #[tokio::test]
    async fn test_missing_message_returns_422() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGateway::new(Vec::<String>::new())),
            Arc::new(InMemoryAdventureRepository::new()),
        ));

        // Act
        let response = app.oneshot(message_request(&json!({}))).await.unwrap();

        // Assert: Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
