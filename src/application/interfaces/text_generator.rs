use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

/// An interface for sending a prompt to a language-model endpoint and
/// receiving its reply body.
///
/// The reply is untyped JSON: different vendors place the generated text in
/// different fields, so the shape is not known ahead of time. Callers
/// normalize it with the probe table in
/// [`crate::application::use_cases::extract_generated_text`].
/// Implementors encapsulate transport, serialization, and credential details.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` upstream and return the reply body as untyped JSON.
    async fn generate(&self, prompt: &str) -> Result<Value, DomainError>;
}
