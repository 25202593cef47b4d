use async_trait::async_trait;
use serde_json::Value;

use crate::application::DivinationSource;
use crate::domain::{Divination, DomainError};

#[derive(serde::Serialize)]
struct DivinationRequest<'a> {
    prompt: &'a str,
}

/// [`DivinationSource`] backed by the proxy's `/divination` endpoint.
///
/// Failure messages carry stable phrases ("network error", "failed with
/// status") that the consult cycle matches when selecting user guidance.
pub struct HttpDivinationSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDivinationSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DivinationSource for HttpDivinationSource {
    async fn fetch(&self, prompt: &str) -> Result<Divination, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&DivinationRequest { prompt })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("network error: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "divination request failed with status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            DomainError::upstream(format!("divination reply was not JSON: {e}"))
        })?;

        Divination::from_value(&body)
    }
}
