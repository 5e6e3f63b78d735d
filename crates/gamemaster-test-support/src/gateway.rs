//! Test gateways — mock `ModelGateway` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::{CompletionRequest, ModelGateway};

/// A gateway that answers from a fixed script of replies, in order, and
/// records every request it receives. Once the script is exhausted every
/// call fails with `DomainError::Gateway`.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    /// Create a gateway that will return `replies` one per call.
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DomainError::Gateway("scripted replies exhausted".into()))
    }
}

/// A gateway that always fails with a gateway error.
#[derive(Debug)]
pub struct FailingGateway;

#[async_trait]
impl ModelGateway for FailingGateway {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, DomainError> {
        Err(DomainError::Gateway("connection refused".into()))
    }
}
