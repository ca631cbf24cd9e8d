//! HTTP client for the signaling server.
//!
//! One `SignalingClient` keeps one pooled connection to the server. The
//! server identifies a peer by the source address of that connection, so a
//! peer must reuse the same client for `ready`, keep-alives, and `leave`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use rendezvous_core::wire::{
    ClientsResponse, FindRequest, FindResponse, LeaveRequest, LeaveResponse, ReadyRequest,
    ReadyResponse, StatusResponse,
};
use rendezvous_core::{ErrorBody, SignalError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach signaling server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("signaling server rejected request: {0}")]
    Rejected(SignalError),
    #[error("signaling server answered with unexpected status {0}")]
    UnexpectedStatus(u16),
}

impl ClientError {
    /// The protocol error behind a rejection, if that is what this is.
    pub fn signal(&self) -> Option<&SignalError> {
        match self {
            ClientError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SignalingClient {
    http: reqwest::Client,
    base_url: String,
}

impl SignalingClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        let resp = self.http.get(self.url("/signaling/status")).send().await?;
        decode(resp).await
    }

    pub async fn ready(&self, display_name: &str) -> Result<ReadyResponse, ClientError> {
        self.post(
            "/signaling/clients/ready",
            &ReadyRequest {
                display_name: display_name.to_string(),
            },
        )
        .await
    }

    pub async fn find(&self, peer_name: &str) -> Result<FindResponse, ClientError> {
        self.post(
            "/signaling/clients/find",
            &FindRequest {
                peer_name: peer_name.to_string(),
            },
        )
        .await
    }

    pub async fn leave(&self, display_name: &str) -> Result<LeaveResponse, ClientError> {
        self.post(
            "/signaling/clients/leave",
            &LeaveRequest {
                display_name: display_name.to_string(),
            },
        )
        .await
    }

    /// Clear the server's registry. Only works against a server with debug routes.
    pub async fn reset(&self) -> Result<(), ClientError> {
        let resp = self.http.post(self.url("/debug/reset")).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(rejection(resp).await)
    }

    pub async fn clients(&self) -> Result<ClientsResponse, ClientError> {
        let resp = self.http.get(self.url("/debug/clients")).send().await?;
        decode(resp).await
    }

    async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, ClientError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }
}

async fn decode<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ClientError> {
    if resp.status().is_success() {
        return Ok(resp.json::<R>().await?);
    }
    Err(rejection(resp).await)
}

/// Turn a non-success response into an error, using the JSON error body when there is one.
async fn rejection(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    match resp.bytes().await {
        Ok(body) => match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(err) => ClientError::Rejected(SignalError::from_body(err)),
            Err(_) => ClientError::UnexpectedStatus(status),
        },
        Err(e) => ClientError::Transport(e),
    }
}
