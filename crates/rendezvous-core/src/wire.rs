//! Rendezvous wire format: signaling payloads and introduction datagrams.
//!
//! Signaling payloads travel as JSON over HTTP. Their field names are
//! camelCase because existing peers already speak them.
//!
//! Introduction datagrams are JSON objects tagged by a `"type"` field and
//! carrying a `version`. A receiver seeing an unknown tag, an unknown version,
//! or bytes that are not JSON at all silently drops the datagram; there is no
//! back-channel for errors on a connectionless transport. Unknown extra
//! fields are ignored so the messages can grow.

use serde::{Deserialize, Serialize};

// ── Signaling payloads ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub result: String,
}

impl ReadyResponse {
    pub fn accepted() -> Self {
        Self {
            result: "Accepted".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRequest {
    pub peer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResponse {
    pub display_name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveResponse {
    pub result: String,
}

impl LeaveResponse {
    pub fn released() -> Self {
        Self {
            result: "Released".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub peers_online: usize,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEntry {
    pub display_name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientEntry>,
}

// ── Introduction datagrams ───────────────────────────────────────────────────

/// Current introduction message version.
pub const INTRO_VERSION: u8 = 1;

/// Receive buffer size for introduction datagrams. Larger datagrams are
/// truncated by the socket and then fail to decode.
pub const MAX_DATAGRAM: usize = 1024;

/// Unsolicited probe sent to a counterpart's introduction port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroRequest {
    pub version: u8,
    /// Display name of the sender, as registered with the signaling server.
    pub sender: String,
    /// Echoed back in the response so the sender can match it.
    pub nonce: u64,
}

/// Acknowledgement sent back to the observed source of an [`IntroRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroResponse {
    pub version: u8,
    /// Display name of the responding peer.
    pub responder: String,
    /// The nonce of the request being acknowledged.
    pub ack: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntroMessage {
    IntroRequest(IntroRequest),
    IntroResponse(IntroResponse),
}

impl IntroMessage {
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a datagram. `None` for anything not understood.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let msg: IntroMessage = serde_json::from_slice(buf).ok()?;
        let version = match &msg {
            IntroMessage::IntroRequest(r) => r.version,
            IntroMessage::IntroResponse(r) => r.version,
        };
        (version == INTRO_VERSION).then_some(msg)
    }
}

impl IntroRequest {
    pub fn new(sender: impl Into<String>, nonce: u64) -> Self {
        Self {
            version: INTRO_VERSION,
            sender: sender.into(),
            nonce,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        IntroMessage::IntroRequest(self.clone()).encode()
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        match IntroMessage::decode(buf)? {
            IntroMessage::IntroRequest(r) => Some(r),
            IntroMessage::IntroResponse(_) => None,
        }
    }

    /// Build the acknowledgement for this request.
    pub fn acknowledge(&self, responder: impl Into<String>) -> IntroResponse {
        IntroResponse {
            version: INTRO_VERSION,
            responder: responder.into(),
            ack: self.nonce,
        }
    }
}

impl IntroResponse {
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        IntroMessage::IntroResponse(self.clone()).encode()
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        match IntroMessage::decode(buf)? {
            IntroMessage::IntroResponse(r) => Some(r),
            IntroMessage::IntroRequest(_) => None,
        }
    }
}
