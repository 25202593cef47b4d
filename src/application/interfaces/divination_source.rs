use async_trait::async_trait;

use crate::domain::{Divination, DomainError};

/// An interface the client cycle uses to obtain a validated divination.
///
/// Implementors perform the round trip to the divination endpoint and
/// validate the four-field structure; the consult cycle stays decoupled from
/// transport details.
#[async_trait]
pub trait DivinationSource: Send + Sync {
    /// Request a divination for `prompt` and return the validated record.
    async fn fetch(&self, prompt: &str) -> Result<Divination, DomainError>;
}
