//! Signaling errors as HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use rendezvous_core::SignalError;

/// A [`SignalError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub SignalError);

impl From<SignalError> for ApiError {
    fn from(e: SignalError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            SignalError::UnsupportedMethod => StatusCode::METHOD_NOT_ALLOWED,
            SignalError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            SignalError::NameInUse(_) => StatusCode::CONFLICT,
            SignalError::PeerOffline(_) => StatusCode::NOT_FOUND,
            SignalError::InternalSerialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "signaling request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "signaling request rejected");
        }
        (status, Json(self.0.to_body())).into_response()
    }
}
