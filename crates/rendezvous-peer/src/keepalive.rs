//! Staying registered after bootstrap, and leaving cleanly.
//!
//! The server identifies a peer by the address of its signaling connection,
//! so keep-alives and the final `leave` go through the same client, one
//! request at a time.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use rendezvous_core::wire::LeaveResponse;

use crate::client::{ClientError, SignalingClient};

/// Spawn a loop that re-sends ready every `every` until shutdown.
pub fn spawn(
    client: SignalingClient,
    display_name: String,
    every: Duration,
    shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(keepalive_loop(client, display_name, every, shutdown))
}

async fn keepalive_loop(
    client: SignalingClient,
    display_name: String,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);

    loop {
        tokio::select! {
            _ = shutdown.recv() => return,
            _ = interval.tick() => {
                match client.ready(&display_name).await {
                    Ok(_) => tracing::trace!(name = %display_name, "keep-alive accepted"),
                    Err(e) => tracing::warn!(error = %e, name = %display_name, "keep-alive rejected"),
                }
            }
        }
    }
}

/// Release `display_name` once the keep-alive loop has stopped.
///
/// Shutdown must already be signalled. A ready still in flight completes
/// before leave is sent, so it can neither race leave onto a second
/// connection nor re-register the name afterwards.
pub async fn leave_after(
    client: &SignalingClient,
    keepalive: Option<JoinHandle<()>>,
    display_name: &str,
) -> Result<LeaveResponse, ClientError> {
    if let Some(task) = keepalive {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "keep-alive task failed");
        }
    }
    client.leave(display_name).await
}
