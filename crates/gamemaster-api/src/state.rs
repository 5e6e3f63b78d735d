//! Shared application state.

use std::sync::Arc;

use gamemaster_core::clock::Clock;
use gamemaster_core::gateway::ModelGateway;
use gamemaster_core::repository::AdventureRepository;
use gamemaster_narrative::application::shaper::ShaperSettings;
use gamemaster_narrative::domain::window::PLAY_WINDOW_TURNS;
use gamemaster_session::application::command_handlers::SessionContext;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp saves.
    pub clock: Arc<dyn Clock>,
    /// The model backend chosen at startup.
    pub gateway: Arc<dyn ModelGateway>,
    /// Adventure store.
    pub adventure_repository: Arc<dyn AdventureRepository>,
    /// Budgets for shaped play replies.
    pub shaper: ShaperSettings,
    /// Most recent turns sent to the model alongside the system turn.
    pub history_max_turns: usize,
}

impl AppState {
    /// Create new application state with default shaping and windowing.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn ModelGateway>,
        adventure_repository: Arc<dyn AdventureRepository>,
    ) -> Self {
        Self {
            clock,
            gateway,
            adventure_repository,
            shaper: ShaperSettings::default(),
            history_max_turns: PLAY_WINDOW_TURNS,
        }
    }

    /// Overrides the play window size.
    #[must_use]
    pub fn with_history_max_turns(mut self, history_max_turns: usize) -> Self {
        self.history_max_turns = history_max_turns;
        self
    }

    /// Borrows the collaborators the session handlers need.
    #[must_use]
    pub fn session_context(&self) -> SessionContext<'_> {
        SessionContext {
            clock: self.clock.as_ref(),
            gateway: self.gateway.as_ref(),
            repository: self.adventure_repository.as_ref(),
            shaper: self.shaper,
            max_turns: self.history_max_turns,
        }
    }
}
