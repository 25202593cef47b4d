use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The model replied, but its generated text could not be parsed as JSON.
    /// `raw` preserves the unparsed text so the boundary can surface it for
    /// diagnosis instead of discarding it.
    #[error("Unparseable model output: {reason}")]
    Unparseable { reason: String, raw: String },

    #[error("Invalid divination structure: {0}")]
    InvalidStructure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn unparseable(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Unparseable {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn invalid_structure(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable { .. })
    }

    pub fn is_invalid_structure(&self) -> bool {
        matches!(self, Self::InvalidStructure(_))
    }
}
