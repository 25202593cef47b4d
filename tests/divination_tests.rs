//! Integration tests for the divination pipeline.
//!
//! These exercise the use cases end to end against stub generators standing
//! in for the upstream model endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use pangool::{
    DivineAllUseCase, DivineUseCase, DomainError, MockGenerator, TextGenerator, DEFAULT_PROMPT,
    SILENT_SPIRITS,
};

/// Returns a fixed upstream body and counts how often it is called.
struct CannedGenerator {
    body: Value,
    calls: AtomicUsize,
}

impl CannedGenerator {
    fn new(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Value, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Fails every call the way a dead upstream would.
struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Value, DomainError> {
        Err(DomainError::upstream(
            "model API returned 503 Service Unavailable",
        ))
    }
}

fn complete_body() -> Value {
    json!({"response": r#"{"heart":"a","head":"b","soul":"c","flesh":"d"}"#})
}

// --- DivineUseCase ---

#[tokio::test]
async fn well_behaved_upstream_yields_the_four_field_record() {
    let generator = CannedGenerator::new(complete_body());
    let use_case = DivineUseCase::new(Some(generator.clone()));

    let divination = use_case.execute("tell me").await.expect("should divine");

    assert_eq!(divination.heart(), "a");
    assert_eq!(divination.head(), "b");
    assert_eq!(divination.soul(), "c");
    assert_eq!(divination.flesh(), "d");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn fenced_output_is_stripped_before_parsing() {
    let body = json!({
        "response": "```json\n{\"heart\":\"a\",\"head\":\"b\",\"soul\":\"c\",\"flesh\":\"d\"}\n```"
    });
    let use_case = DivineUseCase::new(Some(CannedGenerator::new(body)));

    let divination = use_case.execute("tell me").await.expect("should divine");
    assert_eq!(divination.heart(), "a");
    assert_eq!(divination.flesh(), "d");
}

#[tokio::test]
async fn empty_prompt_is_rejected_without_calling_upstream() {
    let generator = CannedGenerator::new(complete_body());
    let use_case = DivineUseCase::new(Some(generator.clone()));

    let err = use_case.execute("").await.unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn missing_endpoint_is_a_configuration_error() {
    let use_case = DivineUseCase::new(None);

    let err = use_case.execute("tell me").await.unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("MODEL_API_ENDPOINT"));
}

#[tokio::test]
async fn upstream_failure_propagates_status_text() {
    let use_case = DivineUseCase::new(Some(Arc::new(FailingGenerator)));

    let err = use_case.execute("tell me").await.unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn unparseable_output_preserves_the_raw_text() {
    let body = json!({"response": "the spirits defy JSON"});
    let use_case = DivineUseCase::new(Some(CannedGenerator::new(body)));

    let err = use_case.execute("tell me").await.unwrap_err();
    match err {
        DomainError::Unparseable { raw, .. } => assert_eq!(raw, "the spirits defy JSON"),
        other => panic!("expected Unparseable, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_section_is_an_invalid_structure_error() {
    let body = json!({"response": r#"{"heart":"a","head":"b","soul":"c"}"#});
    let use_case = DivineUseCase::new(Some(CannedGenerator::new(body)));

    let err = use_case.execute("tell me").await.unwrap_err();
    assert!(err.is_invalid_structure());
}

#[tokio::test]
async fn direct_fields_win_over_choices() {
    let body = json!({
        "response": r#"{"heart":"direct","head":"b","soul":"c","flesh":"d"}"#,
        "choices": [{"message": {"content": r#"{"heart":"nested","head":"b","soul":"c","flesh":"d"}"#}}]
    });
    let use_case = DivineUseCase::new(Some(CannedGenerator::new(body)));

    let divination = use_case.execute("tell me").await.expect("should divine");
    assert_eq!(divination.heart(), "direct");
}

#[tokio::test]
async fn openai_style_choices_are_normalized() {
    let body = json!({
        "choices": [{"message": {"content": r#"{"heart":"a","head":"b","soul":"c","flesh":"d"}"#}}]
    });
    let use_case = DivineUseCase::new(Some(CannedGenerator::new(body)));

    let divination = use_case.execute("tell me").await.expect("should divine");
    assert_eq!(divination.soul(), "c");
}

#[tokio::test]
async fn mock_generator_serves_a_valid_divination() {
    let use_case = DivineUseCase::new(Some(Arc::new(MockGenerator::new())));

    let divination = use_case.execute(DEFAULT_PROMPT).await.expect("should divine");
    assert!(!divination.heart().is_empty());
    assert!(!divination.head().is_empty());
    assert!(!divination.soul().is_empty());
    assert!(!divination.flesh().is_empty());
}

// --- DivineAllUseCase ---

#[tokio::test]
async fn divine_all_draws_one_proverb_per_section() {
    let generator = CannedGenerator::new(json!({"response": "A proverb."}));
    let use_case = DivineAllUseCase::new(Some(generator.clone()));

    let divination = use_case.execute().await.expect("should divine");

    assert_eq!(generator.calls(), 4);
    assert_eq!(divination.heart(), "A proverb.");
    assert_eq!(divination.flesh(), "A proverb.");
}

#[tokio::test]
async fn divine_all_substitutes_silence_for_failed_sections() {
    let use_case = DivineAllUseCase::new(Some(Arc::new(FailingGenerator)));

    let divination = use_case.execute().await.expect("should degrade, not fail");

    assert_eq!(divination.heart(), SILENT_SPIRITS);
    assert_eq!(divination.head(), SILENT_SPIRITS);
    assert_eq!(divination.soul(), SILENT_SPIRITS);
    assert_eq!(divination.flesh(), SILENT_SPIRITS);
}

#[tokio::test]
async fn divine_all_substitutes_silence_for_empty_replies() {
    let use_case = DivineAllUseCase::new(Some(CannedGenerator::new(json!({"response": ""}))));

    let divination = use_case.execute().await.expect("should degrade, not fail");
    assert_eq!(divination.soul(), SILENT_SPIRITS);
}

#[tokio::test]
async fn divine_all_without_endpoint_is_a_configuration_error() {
    let use_case = DivineAllUseCase::new(None);

    let err = use_case.execute().await.unwrap_err();
    assert!(err.is_configuration());
}
