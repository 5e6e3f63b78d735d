//! GameMaster Gateway — language-model backends.
//!
//! Two backends implement [`ModelGateway`]: a local HTTP endpoint and a
//! hosted OpenAI-compatible API. Exactly one is built at process start from a
//! [`GatewayConfig`] and kept for the lifetime of the process.

use std::sync::Arc;

use gamemaster_core::gateway::ModelGateway;

pub mod config;
pub mod error;
pub mod hosted;
pub mod local;
mod wire;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use hosted::HostedGateway;
pub use local::LocalGateway;

/// Builds the backend selected by `config`.
///
/// # Errors
///
/// Returns `GatewayError::Config` if the HTTP client cannot be built.
pub fn build_gateway(config: &GatewayConfig) -> Result<Arc<dyn ModelGateway>, GatewayError> {
    Ok(match config {
        GatewayConfig::Local { url, timeout } => Arc::new(LocalGateway::new(url, *timeout)?),
        GatewayConfig::Hosted {
            base_url,
            api_key,
            model,
            timeout,
        } => Arc::new(HostedGateway::new(base_url, api_key, model, *timeout)?),
    })
}
