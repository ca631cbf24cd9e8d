//! Signaling operations: the registry as seen by the protocol layer.
//!
//! Each method is one request's worth of work. The caller's transport
//! address is the only identity signal; it is passed in by the HTTP layer
//! and never read from a payload.

use std::net::SocketAddr;
use std::time::Instant;

use rendezvous_core::wire::{ClientEntry, FindResponse, StatusResponse};
use rendezvous_core::SignalError;

use crate::registry::{Claim, PeerRegistry};

#[derive(Clone)]
pub struct Signaling {
    registry: PeerRegistry,
    started_at: Instant,
}

impl Signaling {
    pub fn new(registry: PeerRegistry) -> Self {
        Self {
            registry,
            started_at: Instant::now(),
        }
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn status(&self) -> StatusResponse {
        let snapshot = self.registry.snapshot();
        StatusResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            peers_online: snapshot.peers_online,
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }

    /// Register `display_name` at the caller's address.
    pub fn ready(&self, display_name: &str, caller: SocketAddr) -> Result<Claim, SignalError> {
        require_name(display_name, "displayName")?;
        let address = caller.to_string();
        match self.registry.claim(display_name, &address) {
            Ok(claim) => {
                tracing::info!(name = display_name, %caller, ?claim, "display name granted");
                Ok(claim)
            }
            Err(e) => {
                tracing::info!(name = display_name, %caller, "display name already in use");
                Err(e)
            }
        }
    }

    pub fn find(&self, peer_name: &str, caller: SocketAddr) -> Result<FindResponse, SignalError> {
        require_name(peer_name, "peerName")?;
        let address = self
            .registry
            .lookup(peer_name)
            .ok_or_else(|| SignalError::PeerOffline(peer_name.to_string()))?;
        tracing::debug!(name = peer_name, address, %caller, "peer resolved");
        Ok(FindResponse {
            display_name: peer_name.to_string(),
            address,
        })
    }

    /// Give up `display_name`. Only the address that holds it may release it.
    pub fn leave(&self, display_name: &str, caller: SocketAddr) -> Result<(), SignalError> {
        require_name(display_name, "displayName")?;
        self.registry.release(display_name, &caller.to_string())?;
        tracing::info!(name = display_name, %caller, "display name released");
        Ok(())
    }

    pub fn reset(&self) -> usize {
        let cleared = self.registry.clear();
        tracing::info!(cleared, "active clients list reset");
        cleared
    }

    pub fn clients(&self) -> Vec<ClientEntry> {
        self.registry
            .list()
            .into_iter()
            .map(|r| ClientEntry {
                display_name: r.display_name,
                address: r.address,
            })
            .collect()
    }
}

fn require_name(name: &str, field: &str) -> Result<(), SignalError> {
    if name.trim().is_empty() {
        return Err(SignalError::MalformedRequest(format!("{field} must not be empty")));
    }
    Ok(())
}
