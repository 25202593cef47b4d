use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{extract_generated_text, strip_code_fences, TextGenerator};
use crate::domain::{Divination, DomainError};

/// Configuration failure message, surfaced verbatim to callers.
pub const ENDPOINT_NOT_CONFIGURED: &str =
    "API endpoint not configured. Please set MODEL_API_ENDPOINT environment variable.";

/// System instruction prepended to every caller prompt, directing the model
/// to produce exactly the four named sections as JSON.
const SYSTEM_PROMPT: &str = "\
You are a diviner working within the Serer cosmology tradition. Generate divinations that \
are thoughtful, meaningful, and rooted in themes of connection, wisdom, spirituality, and \
embodiment.

You must respond with a JSON object containing exactly four sections: heart, head, soul, \
and flesh. Each section should be 2-4 sentences long.

- heart: Matters of love, relationships, the threads that bind us, the acts that untether us
- head: Matters of thought, clarity, decision-making, and perspective
- soul: Matters of spirit, inner peace, purpose, and connection to the sacred
- flesh: Matters of the body, health, vitality, and physical presence

Your response must be valid JSON in this exact format:
{
  \"heart\": \"...\",
  \"head\": \"...\",
  \"soul\": \"...\",
  \"flesh\": \"...\"
}";

/// The proxy pipeline: validate the caller's prompt, forward it upstream
/// under the fixed system instruction, and normalize the reply into a
/// [`Divination`].
///
/// The generator is absent when no upstream endpoint is configured; that is
/// a per-request configuration error, never a startup failure.
pub struct DivineUseCase {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DivineUseCase {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, prompt: &str) -> Result<Divination, DomainError> {
        // Prompt is checked before configuration: a caller error stays a
        // caller error even on a misconfigured deployment.
        if prompt.is_empty() {
            return Err(DomainError::invalid_input("Prompt is required"));
        }

        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| DomainError::configuration(ENDPOINT_NOT_CONFIGURED))?;

        let full_prompt =
            format!("{SYSTEM_PROMPT}\n\nUser request: {prompt}\n\nGenerate a divination:");
        let body = generator.generate(&full_prompt).await?;

        let (probe, text) = extract_generated_text(&body).ok_or_else(|| {
            warn!("no generated text found in upstream response");
            DomainError::unparseable(
                "no generated text found in upstream response",
                body.to_string(),
            )
        })?;
        debug!("generated text located via {probe} probe");

        let cleaned = strip_code_fences(text);
        let value: Value = serde_json::from_str(cleaned).map_err(|e| {
            warn!("failed to parse model output as JSON: {e}");
            DomainError::unparseable(e.to_string(), text.to_string())
        })?;

        Divination::from_value(&value)
    }
}
