use std::sync::Arc;

use tracing::debug;

use crate::application::{DivineAllUseCase, DivineUseCase, TextGenerator};
use crate::connector::adapter::{MockGenerator, UpstreamModelClient};

pub struct ContainerConfig {
    /// Upstream model endpoint URL. Absence is a per-request configuration
    /// error, not a startup failure.
    pub endpoint: Option<String>,
    /// Optional bearer credential passed through to the upstream.
    pub api_key: Option<String>,
    /// Serve canned divinations without an upstream.
    pub mock: bool,
}

impl ContainerConfig {
    /// Read configuration from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            endpoint: read("MODEL_API_ENDPOINT"),
            api_key: read("MODEL_API_KEY"),
            mock: false,
        }
    }
}

/// Wires the configured generator into the use cases. Stateless across
/// requests: the container is shared immutably and each request gets its own
/// use-case value.
pub struct Container {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let generator: Option<Arc<dyn TextGenerator>> = if config.mock {
            debug!("Using mock generator");
            Some(Arc::new(MockGenerator::new()))
        } else {
            config.endpoint.as_deref().map(|endpoint| {
                debug!("Using upstream model endpoint {endpoint}");
                Arc::new(UpstreamModelClient::new(endpoint, config.api_key.clone()))
                    as Arc<dyn TextGenerator>
            })
        };

        Self { generator }
    }

    /// Wire a container around an explicit generator.
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn divine_use_case(&self) -> DivineUseCase {
        DivineUseCase::new(self.generator.clone())
    }

    pub fn divine_all_use_case(&self) -> DivineAllUseCase {
        DivineAllUseCase::new(self.generator.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }
}
