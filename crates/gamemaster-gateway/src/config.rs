//! Backend selection.

use std::fmt;
use std::time::Duration;

/// Default endpoint of the local model server.
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8000/predict";

/// Default base URL of the hosted API.
pub const DEFAULT_HOSTED_BASE_URL: &str = "https://api.openai.com/v1";

/// Default hosted model.
pub const DEFAULT_HOSTED_MODEL: &str = "gpt-3.5-turbo";

/// Default transport timeout for a single completion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Which backend serves completions, and how to reach it.
#[derive(Clone, PartialEq, Eq)]
pub enum GatewayConfig {
    /// A local HTTP endpoint accepting `{messages, max_tokens, temperature}`.
    Local {
        /// Full URL of the completion endpoint.
        url: String,
        /// Transport timeout per call.
        timeout: Duration,
    },
    /// A hosted OpenAI-compatible chat completions API.
    Hosted {
        /// API base URL, without the `/chat/completions` suffix.
        base_url: String,
        /// Bearer token.
        api_key: String,
        /// Model name.
        model: String,
        /// Transport timeout per call.
        timeout: Duration,
    },
}

// Keeps the API key out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { url, timeout } => f
                .debug_struct("Local")
                .field("url", url)
                .field("timeout", timeout)
                .finish(),
            Self::Hosted {
                base_url,
                model,
                timeout,
                ..
            } => f
                .debug_struct("Hosted")
                .field("base_url", base_url)
                .field("api_key", &"<redacted>")
                .field("model", model)
                .field("timeout", timeout)
                .finish(),
        }
    }
}

impl GatewayConfig {
    /// Short backend name for log fields.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Hosted { .. } => "hosted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = GatewayConfig::Hosted {
            base_url: DEFAULT_HOSTED_BASE_URL.to_owned(),
            api_key: "sk-secret".to_owned(),
            model: DEFAULT_HOSTED_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        };

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(config.backend_name(), "hosted");
    }
}
