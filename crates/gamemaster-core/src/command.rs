//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every inbound command handled by the engine.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable command name, used as a log field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID that ties the command to its log lines and model calls.
    fn correlation_id(&self) -> Uuid;
}
