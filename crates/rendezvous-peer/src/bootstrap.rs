//! Bootstrap sequence: what a peer does once at startup.
//!
//! 1. Resolve the signaling server via status.
//! 2. Register the display name via ready.
//! 3. Bind the introduction endpoint and spawn its loop.
//!
//! Steps run in order and are never retried. A failure in any of them is
//! fatal to startup; the caller decides how to report it.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use rendezvous_core::wire::StatusResponse;

use crate::client::{ClientError, SignalingClient};
use crate::intro::{EndpointStats, IntroEndpoint};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("can't resolve signaling server at {url}: {source}")]
    Registry {
        url: String,
        #[source]
        source: ClientError,
    },
    #[error("signaling server did not accept `{name}` as display name: {source}")]
    Ready {
        name: String,
        #[source]
        source: ClientError,
    },
    #[error("failed to bind introduction endpoint on {addr}: {source}")]
    Endpoint {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A peer that finished bootstrap: registered and listening for introductions.
pub struct Bootstrapped {
    pub display_name: String,
    /// Server status as seen in step 1.
    pub registry_status: StatusResponse,
    /// Bound address of the introduction endpoint.
    pub intro_addr: SocketAddr,
    /// The endpoint loop. Resolves with its counters after shutdown.
    pub endpoint: JoinHandle<EndpointStats>,
}

pub async fn bootstrap(
    client: &SignalingClient,
    display_name: &str,
    intro_bind: SocketAddr,
    wait_timeout: Duration,
    shutdown: broadcast::Receiver<()>,
) -> Result<Bootstrapped, BootstrapError> {
    tracing::info!(url = client.base_url(), "resolving signaling server");
    let registry_status = client
        .status()
        .await
        .map_err(|source| BootstrapError::Registry {
            url: client.base_url().to_string(),
            source,
        })?;
    tracing::info!(
        peers_online = registry_status.peers_online,
        version = %registry_status.version,
        "signaling server resolved"
    );

    tracing::info!(name = display_name, "marking myself as ready");
    client
        .ready(display_name)
        .await
        .map_err(|source| BootstrapError::Ready {
            name: display_name.to_string(),
            source,
        })?;

    let bound = IntroEndpoint::bind(intro_bind, display_name, wait_timeout, shutdown)
        .and_then(|endpoint| Ok((endpoint.local_addr()?, endpoint)));
    let (intro_addr, endpoint) = match bound {
        Ok(bound) => bound,
        Err(source) => {
            release(client, display_name).await;
            return Err(BootstrapError::Endpoint {
                addr: intro_bind,
                source,
            });
        }
    };
    let endpoint = tokio::spawn(endpoint.run());

    tracing::info!(name = display_name, %intro_addr, "bootstrap complete");

    Ok(Bootstrapped {
        display_name: display_name.to_string(),
        registry_status,
        intro_addr,
        endpoint,
    })
}

/// Undo step 2 after a later step failed, so the name is not left bound to
/// a peer that never came up.
async fn release(client: &SignalingClient, display_name: &str) {
    match client.leave(display_name).await {
        Ok(_) => tracing::info!(name = display_name, "released display name after failed bootstrap"),
        Err(e) => tracing::warn!(error = %e, name = display_name, "failed to release display name"),
    }
}
