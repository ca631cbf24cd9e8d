//! Signaling error taxonomy.
//!
//! Every failure the signaling protocol can surface to a caller is one of
//! these. The server maps each kind to a distinct HTTP status; the client
//! rebuilds the same variant from the JSON error body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    #[error("unsupported method")]
    UnsupportedMethod,
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("display name `{0}` is already in use")]
    NameInUse(String),
    #[error("peer `{0}` is currently offline")]
    PeerOffline(String),
    #[error("failed to serialize response: {0}")]
    InternalSerialization(String),
}

/// Wire name of a [`SignalError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedMethod,
    MalformedRequest,
    NameInUse,
    PeerOffline,
    InternalSerializationError,
}

/// JSON body of every non-2xx signaling response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub message: String,
}

impl SignalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::UnsupportedMethod => ErrorKind::UnsupportedMethod,
            SignalError::MalformedRequest(_) => ErrorKind::MalformedRequest,
            SignalError::NameInUse(_) => ErrorKind::NameInUse,
            SignalError::PeerOffline(_) => ErrorKind::PeerOffline,
            SignalError::InternalSerialization(_) => ErrorKind::InternalSerializationError,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        }
    }

    /// Rebuild an error from a response body. The body carries the
    /// rendered message, so variant payloads hold that text.
    pub fn from_body(body: ErrorBody) -> Self {
        match body.error {
            ErrorKind::UnsupportedMethod => SignalError::UnsupportedMethod,
            ErrorKind::MalformedRequest => SignalError::MalformedRequest(body.message),
            ErrorKind::NameInUse => SignalError::NameInUse(body.message),
            ErrorKind::PeerOffline => SignalError::PeerOffline(body.message),
            ErrorKind::InternalSerializationError => {
                SignalError::InternalSerialization(body.message)
            }
        }
    }
}
