//! HTTP API handlers: the signaling protocol over JSON.

pub mod clients;
pub mod debug;
pub mod status;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use rendezvous_core::SignalError;
use rendezvous_services::Signaling;

use crate::ApiError;

#[derive(Clone)]
pub struct ApiState {
    /// Signaling operations over the process-wide peer registry.
    pub signaling: Signaling,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Decode a JSON request body. Content-Type is not checked.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError(SignalError::MalformedRequest(e.to_string())))
}

/// Encode a JSON 200 response, surfacing encoding failures as their own error kind.
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)
        .map_err(|e| ApiError(SignalError::InternalSerialization(e.to_string())))?;
    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Fallback for a known path hit with the wrong verb.
pub async fn handle_unsupported_method() -> ApiError {
    ApiError(SignalError::UnsupportedMethod)
}

// Re-export handler functions for use in router setup.
pub use clients::{handle_find, handle_leave, handle_ready};
pub use debug::{handle_clients, handle_reset};
pub use status::handle_status;
