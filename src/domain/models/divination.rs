use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

use super::Section;

/// A complete divination: four non-empty text sections produced by the model
/// for a single request. Immutable once constructed: there is no identity,
/// persistence, or mutation; the record is created, displayed once, and
/// discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divination {
    heart: String,
    head: String,
    soul: String,
    flesh: String,
}

impl Divination {
    /// Construct a divination, rejecting any empty section.
    pub fn new(
        heart: impl Into<String>,
        head: impl Into<String>,
        soul: impl Into<String>,
        flesh: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let divination = Self {
            heart: heart.into(),
            head: head.into(),
            soul: soul.into(),
            flesh: flesh.into(),
        };

        for section in Section::ALL {
            if divination.section(section).is_empty() {
                return Err(DomainError::invalid_structure(
                    "Invalid divination structure received from model",
                ));
            }
        }

        Ok(divination)
    }

    /// Validate an untyped JSON value into a divination.
    ///
    /// All four sections must be present as non-empty strings; anything less
    /// is a validation failure, never a partial record.
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let field = |section: Section| -> Option<&str> {
            value
                .get(section.name())
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        };

        match (
            field(Section::Heart),
            field(Section::Head),
            field(Section::Soul),
            field(Section::Flesh),
        ) {
            (Some(heart), Some(head), Some(soul), Some(flesh)) => Ok(Self {
                heart: heart.to_string(),
                head: head.to_string(),
                soul: soul.to_string(),
                flesh: flesh.to_string(),
            }),
            _ => Err(DomainError::invalid_structure(
                "Invalid divination structure received from model",
            )),
        }
    }

    pub fn heart(&self) -> &str {
        &self.heart
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn soul(&self) -> &str {
        &self.soul
    }

    pub fn flesh(&self) -> &str {
        &self.flesh
    }

    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Heart => &self.heart,
            Section::Head => &self.head,
            Section::Soul => &self.soul,
            Section::Flesh => &self.flesh,
        }
    }
}
