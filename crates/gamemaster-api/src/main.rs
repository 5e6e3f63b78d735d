//! GameMaster API server entry point.

use std::error::Error;
use std::sync::Arc;

use gamemaster_api::config::Config;
use gamemaster_api::error::AppError;
use gamemaster_api::routes;
use gamemaster_api::state::AppState;
use gamemaster_core::clock::SystemClock;
use gamemaster_gateway::build_gateway;
use gamemaster_store::JsonFileRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting GameMaster API server");

    let config = Config::from_env()?;
    tracing::info!(
        backend = config.gateway.backend_name(),
        saves_dir = %config.saves_dir.display(),
        history_max_turns = config.history_max_turns,
        "configuration loaded"
    );

    let repository = JsonFileRepository::open(&config.saves_dir)
        .await
        .map_err(AppError::from)?;
    let gateway = build_gateway(&config.gateway).map_err(AppError::from)?;

    let app_state = AppState::new(Arc::new(SystemClock), gateway, Arc::new(repository))
        .with_history_max_turns(config.history_max_turns);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app).await.map_err(AppError::from)?;

    Ok(())
}
