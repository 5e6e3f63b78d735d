//! Process configuration, read once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use gamemaster_gateway::GatewayConfig;
use gamemaster_gateway::config::{
    DEFAULT_HOSTED_BASE_URL, DEFAULT_HOSTED_MODEL, DEFAULT_LOCAL_URL, DEFAULT_TIMEOUT,
};
use gamemaster_narrative::domain::window::PLAY_WINDOW_TURNS;

use crate::error::AppError;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding one JSON document per adventure.
    pub saves_dir: PathBuf,
    /// Model backend.
    pub gateway: GatewayConfig,
    /// Most recent turns sent to the model alongside the system turn.
    pub history_max_turns: usize,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for missing or malformed values.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for missing or malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = parse(&var, "PORT", 3000_u16)?;
        let saves_dir = var("SAVES_DIR").map_or_else(|| PathBuf::from("saves"), PathBuf::from);
        let timeout_secs = parse(&var, "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
        let timeout = Duration::from_secs(timeout_secs);
        let history_max_turns = parse(&var, "HISTORY_MAX_TURNS", PLAY_WINDOW_TURNS)?;
        if history_max_turns == 0 {
            return Err(AppError::Config(
                "HISTORY_MAX_TURNS must be at least 1".to_owned(),
            ));
        }

        let use_local = var("USE_LOCAL_LLM")
            .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"));
        let gateway = if use_local {
            GatewayConfig::Local {
                url: var("LOCAL_LLM_URL").unwrap_or_else(|| DEFAULT_LOCAL_URL.to_owned()),
                timeout,
            }
        } else {
            GatewayConfig::Hosted {
                base_url: var("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_HOSTED_BASE_URL.to_owned()),
                api_key: var("OPENAI_API_KEY").ok_or_else(|| {
                    AppError::Config(
                        "OPENAI_API_KEY must be set unless USE_LOCAL_LLM=1".to_owned(),
                    )
                })?,
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_HOSTED_MODEL.to_owned()),
                timeout,
            }
        };

        Ok(Self {
            host,
            port,
            saves_dir,
            gateway,
            history_max_turns,
        })
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}
