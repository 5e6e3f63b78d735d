//! Commands for the Session context.

use gamemaster_content::domain::module::ModuleSource;
use gamemaster_core::command::Command;
use uuid::Uuid;

/// Command carrying one inbound player message.
#[derive(Debug, Clone)]
pub struct SubmitMessage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What the player typed.
    pub text: String,
    /// Campaign module attached to the message, if any.
    pub module: Option<ModuleSource>,
}

impl SubmitMessage {
    /// A plain text message with a fresh correlation ID.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            text: text.into(),
            module: None,
        }
    }
}

impl Command for SubmitMessage {
    fn command_type(&self) -> &'static str {
        "session.submit_message"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
