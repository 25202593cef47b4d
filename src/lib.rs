pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    extract_generated_text, guidance_for, strip_code_fences, ConsultState, ConsultUseCase,
    DivinationSource, DivineAllUseCase, DivineUseCase, TextGenerator, DEFAULT_PROMPT,
    ENDPOINT_NOT_CONFIGURED, SILENT_SPIRITS,
};

pub use connector::{
    router, serve, Container, ContainerConfig, HttpDivinationSource, MockGenerator,
    UpstreamModelClient,
};

pub use domain::{Divination, DomainError, Section};
