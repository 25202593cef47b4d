use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::application::{extract_generated_text, TextGenerator, ENDPOINT_NOT_CONFIGURED};
use crate::domain::{Divination, DomainError, Section};

/// Shown in place of a section whose generation failed or came back empty.
pub const SILENT_SPIRITS: &str = "The spirits are silent on this matter. Ask again.";

/// Themed generation: one upstream call per section, each prompted with a
/// theme drawn at random from that section's pool. A failed or empty section
/// degrades to [`SILENT_SPIRITS`] instead of failing the whole record.
///
/// Calls are sequential; there is at most one outstanding upstream request.
pub struct DivineAllUseCase {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DivineAllUseCase {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self) -> Result<Divination, DomainError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| DomainError::configuration(ENDPOINT_NOT_CONFIGURED))?;

        let mut proverbs = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL {
            let theme = section
                .themes()
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(section.name());
            debug!("divining {section} on theme {theme}");

            let proverb = match generator.generate(theme).await {
                Ok(body) => extract_generated_text(&body)
                    .map(|(_, text)| text.trim().to_string())
                    .unwrap_or_default(),
                Err(e) => {
                    warn!("generation failed for {section} (theme {theme}): {e}");
                    String::new()
                }
            };

            proverbs.push(if proverb.is_empty() {
                SILENT_SPIRITS.to_string()
            } else {
                proverb
            });
        }

        let [heart, head, soul, flesh]: [String; 4] = proverbs
            .try_into()
            .map_err(|_| DomainError::internal("section count mismatch"))?;
        Divination::new(heart, head, soul, flesh)
    }
}
