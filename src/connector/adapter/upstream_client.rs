use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::application::TextGenerator;
use crate::domain::DomainError;

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.8;

/// Generation request in the generic text-completion format. Vendors differ
/// on the reply side, not on this request shape; the reply is returned
/// untyped and normalized by the probe table.
#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

/// HTTP client for the upstream model endpoint.
///
/// Implements [`TextGenerator`] so the divination pipeline stays decoupled
/// from transport and vendor details. The optional bearer credential is
/// attached only when configured; no client-side timeout is set, so the
/// transport defaults apply.
pub struct UpstreamModelClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl UpstreamModelClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for UpstreamModelClient {
    async fn generate(&self, prompt: &str) -> Result<Value, DomainError> {
        let request = GenerateRequest {
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("model API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("model API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "model API returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("model API reply was not JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_generation_parameters() {
        let request = GenerateRequest {
            prompt: "a theme",
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["prompt"], "a theme");
        assert_eq!(json["max_tokens"], 800);
        assert!((json["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }
}
