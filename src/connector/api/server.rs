use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::{Divination, DomainError};

use super::Container;

/// Build the API router.
///
/// `POST /divination` runs the proxy pipeline, `POST /divination-all` the
/// themed per-section generation. `OPTIONS` is answered with a 204 preflight
/// on every path; anything else is 404. Every response, errors included,
/// carries the CORS headers.
pub fn router(container: Arc<Container>) -> Router {
    Router::new()
        .route(
            "/divination",
            post(divination).options(preflight).fallback(not_found),
        )
        .route(
            "/divination-all",
            post(divination_all).options(preflight).fallback(not_found),
        )
        .fallback(fallback)
        .with_state(container)
}

/// Bind and serve until the process is stopped.
pub async fn serve(container: Arc<Container>, addr: &str) -> anyhow::Result<()> {
    let app = router(container);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Divination API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn divination(State(container): State<Arc<Container>>, body: String) -> Response {
    into_response(handle_divination(&container, &body).await)
}

async fn handle_divination(container: &Container, body: &str) -> Result<Divination, DomainError> {
    // The body is parsed here rather than by an extractor so a malformed
    // request still flows through the error boundary below (with the CORS
    // headers and structured payload) instead of a framework rejection.
    let request: Value = serde_json::from_str(body)
        .map_err(|e| DomainError::internal(format!("invalid request body: {e}")))?;
    let prompt = request.get("prompt").and_then(Value::as_str).unwrap_or("");

    container.divine_use_case().execute(prompt).await
}

async fn divination_all(State(container): State<Arc<Container>>) -> Response {
    into_response(container.divine_all_use_case().execute().await)
}

async fn preflight() -> Response {
    with_cors(StatusCode::NO_CONTENT.into_response())
}

async fn not_found() -> Response {
    with_cors((StatusCode::NOT_FOUND, "Not Found").into_response())
}

/// Unrouted paths: preflight is honored everywhere, everything else is 404.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await
    } else {
        not_found().await
    }
}

fn into_response(result: Result<Divination, DomainError>) -> Response {
    match result {
        Ok(divination) => json_response(StatusCode::OK, json!(divination)),
        Err(e) => error_response(&e),
    }
}

/// The single boundary converting every failure into a structured payload.
/// Client faults are 400, everything else 500; unparseable model output
/// carries the raw text for diagnosis. No error propagates past this point
/// unconverted.
fn error_response(error: &DomainError) -> Response {
    warn!("request failed: {error}");

    let (status, body) = match error {
        DomainError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        DomainError::Configuration(msg) | DomainError::Upstream(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
        }
        DomainError::Unparseable { raw, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": "Failed to parse divination response",
                "raw_response": raw,
            }),
        ),
        DomainError::InvalidStructure(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
        }
        DomainError::Internal(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Internal server error", "message": msg }),
        ),
    };

    json_response(status, body)
}

fn json_response(status: StatusCode, body: Value) -> Response {
    with_cors((status, Json(body)).into_response())
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    response
}
