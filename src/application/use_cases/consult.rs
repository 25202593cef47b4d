use std::sync::Arc;

use crate::application::DivinationSource;
use crate::domain::{Divination, DomainError};

/// Fixed prompt sent when the caller does not supply one.
pub const DEFAULT_PROMPT: &str =
    "Generate a Serer cosmology divination with four sections: heart, head, soul, and flesh";

/// Display state of one consultation cycle.
///
/// Transitions are `Loading → Result | Error`, one shot per invocation of
/// [`ConsultUseCase::execute`]; the cycle is re-entered only by invoking it
/// again, never by timer or background retry.
#[derive(Debug, Clone)]
pub enum ConsultState {
    Idle,
    Loading,
    Result(Divination),
    Error(String),
}

impl ConsultState {
    pub fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// The client request/display cycle: issue one request against a
/// [`DivinationSource`] and resolve the display state from the outcome.
pub struct ConsultUseCase {
    source: Arc<dyn DivinationSource>,
    state: ConsultState,
}

impl ConsultUseCase {
    pub fn new(source: Arc<dyn DivinationSource>) -> Self {
        Self {
            source,
            state: ConsultState::Idle,
        }
    }

    pub fn state(&self) -> &ConsultState {
        &self.state
    }

    /// Run one cycle and return the resolved state. A failure replaces any
    /// earlier result: two invocations ending success-then-failure leave the
    /// display in the error state, never a stale result.
    pub async fn execute(&mut self, prompt: &str) -> &ConsultState {
        self.state = ConsultState::Loading;
        self.state = match self.source.fetch(prompt).await {
            Ok(divination) => ConsultState::Result(divination),
            Err(e) => ConsultState::Error(guidance_for(&e)),
        };
        &self.state
    }
}

/// Map a failure onto user-facing guidance by matching known phrases.
/// Best-effort classification: unrecognized failures fall back to their own
/// message rather than being hidden behind a generic line.
pub fn guidance_for(error: &DomainError) -> String {
    let message = error.to_string();

    if message.contains("network error") || message.contains("connect") {
        "Network error. Please check your connection and try again.".to_string()
    } else if message.contains("failed with status") {
        "The divination service is currently unavailable. Please try again later.".to_string()
    } else if !message.is_empty() {
        message
    } else {
        "An unexpected error occurred. Please try again.".to_string()
    }
}
