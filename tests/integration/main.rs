//! Rendezvous integration test harness.
//!
//! Every test runs a real signaling server on 127.0.0.1 with an
//! OS-assigned port, and real peers talking to it over HTTP and UDP.
//! Nothing needs root and tests do not share state.
//!
//!   cargo test --test integration

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use rendezvous_api::ApiState;
use rendezvous_peer::SignalingClient;
use rendezvous_services::{PeerRegistry, Signaling};

mod introduction;
mod lifecycle;
mod protocol;
mod registration;

// ── Harness ───────────────────────────────────────────────────────────────────

pub const TIMEOUT: Duration = Duration::from_secs(2);
pub const WAIT: Duration = Duration::from_millis(200);

/// A signaling server running inside the test process.
pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: PeerRegistry,
    shutdown: broadcast::Sender<()>,
    task: JoinHandle<Result<()>>,
}

impl TestServer {
    pub async fn start(debug_routes: bool) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let registry = PeerRegistry::new();
        let state = ApiState {
            signaling: Signaling::new(registry.clone()),
        };

        let (shutdown, mut rx) = broadcast::channel::<()>(1);
        let task = tokio::spawn(rendezvous_api::serve(
            state,
            listener,
            debug_routes,
            async move {
                let _ = rx.recv().await;
            },
        ));

        Ok(Self {
            addr,
            registry,
            shutdown,
            task,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// A fresh client. Each client holds its own connection, so two clients
    /// look like two different callers to the server.
    pub fn client(&self) -> SignalingClient {
        SignalingClient::new(&self.url(""), TIMEOUT).expect("client should build")
    }

    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        tokio::time::timeout(TIMEOUT, self.task)
            .await
            .context("server did not shut down")??
    }
}
