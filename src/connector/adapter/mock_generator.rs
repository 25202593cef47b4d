use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::application::TextGenerator;
use crate::domain::DomainError;

const MOCK_HEART: &str = "The threads of connection weave through your days. A relationship \
that has been dormant calls for attention. Love is not passive; it requires tending, like a \
garden requires water.";
const MOCK_HEAD: &str = "Clarity comes not from thinking more, but from thinking differently. \
The problem you have been circling has a solution that lies outside your current perspective. \
Trust the insight that arrives sideways.";
const MOCK_SOUL: &str = "Your spirit seeks renewal. There is a practice you have abandoned \
that once brought you peace; return to it. The path inward is the path forward.";
const MOCK_FLESH: &str = "Your body carries messages you have not yet heard. Pay attention to \
the subtle signals. Health is not only the absence of illness, but the presence of vitality.";

/// Offline [`TextGenerator`] returning a canned divination.
///
/// The canned record is emitted as generated text inside a `response` field,
/// so it exercises the same probe, fence-stripping, parse, and validation
/// path as a real upstream. Selected with `pangool serve --mock`.
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<Value, DomainError> {
        debug!("mock generation for prompt of {} chars", prompt.len());

        let divination = json!({
            "heart": MOCK_HEART,
            "head": MOCK_HEAD,
            "soul": MOCK_SOUL,
            "flesh": MOCK_FLESH,
        });

        Ok(json!({ "response": divination.to_string() }))
    }
}
