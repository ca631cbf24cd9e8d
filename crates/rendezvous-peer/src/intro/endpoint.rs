//! Introduction endpoint.
//!
//! Owns one UDP socket bound to the peer's well-known intro port and answers
//! every decodable `IntroRequest` with an `IntroResponse` sent to the source
//! address the datagram arrived from. Anything else is dropped. The loop only
//! ends on shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::sync::broadcast;

use rendezvous_core::wire::{IntroRequest, MAX_DATAGRAM};

/// Counters reported when the endpoint stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndpointStats {
    /// Requests answered.
    pub served: u64,
    /// Datagrams that did not decode as an `IntroRequest`.
    pub dropped: u64,
    /// Responses that could not be encoded or sent.
    pub send_failures: u64,
}

pub struct IntroEndpoint {
    socket: UdpSocket,
    display_name: String,
    wait_timeout: Duration,
    shutdown: broadcast::Receiver<()>,
}

impl IntroEndpoint {
    /// Bind the endpoint socket. The endpoint is listening once this returns.
    pub fn bind(
        addr: SocketAddr,
        display_name: impl Into<String>,
        wait_timeout: Duration,
        shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<Self> {
        let socket = UdpSocket::from_std(make_intro_socket(addr)?)?;
        Ok(Self {
            socket,
            display_name: display_name.into(),
            wait_timeout,
            shutdown,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive loop. Returns when shutdown is signalled or its sender is gone;
    /// the socket is closed on return.
    pub async fn run(mut self) -> EndpointStats {
        let mut stats = EndpointStats::default();
        let mut buf = vec![0u8; MAX_DATAGRAM];

        match self.socket.local_addr() {
            Ok(addr) => tracing::info!(%addr, name = %self.display_name, "intro endpoint listening"),
            Err(e) => tracing::warn!(error = %e, "intro endpoint listening on unknown address"),
        }

        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    tracing::info!(?stats, "intro endpoint shutting down");
                    return stats;
                }

                received = tokio::time::timeout(self.wait_timeout, self.socket.recv_from(&mut buf)) => {
                    let (len, peer_addr) = match received {
                        Err(_) => {
                            tracing::trace!("intro wait cycle timeout, re-iterating");
                            continue;
                        }
                        Ok(Err(e)) => {
                            tracing::warn!(error = %e, "recv_from failed");
                            continue;
                        }
                        Ok(Ok(r)) => r,
                    };

                    self.handle_datagram(&buf[..len], peer_addr, &mut stats).await;
                }
            }
        }
    }

    async fn handle_datagram(&self, data: &[u8], peer_addr: SocketAddr, stats: &mut EndpointStats) {
        let request = match IntroRequest::decode(data) {
            Some(r) => r,
            None => {
                stats.dropped += 1;
                tracing::debug!(%peer_addr, len = data.len(), "dropping undecodable datagram");
                return;
            }
        };

        tracing::info!(%peer_addr, sender = %request.sender, "intro request received");

        let response = match request.acknowledge(&self.display_name).encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                stats.send_failures += 1;
                tracing::warn!(error = %e, "failed to encode intro response");
                return;
            }
        };

        match self.socket.send_to(&response, peer_addr).await {
            Ok(_) => {
                stats.served += 1;
                tracing::debug!(%peer_addr, ack = request.nonce, "sent intro response");
            }
            Err(e) => {
                stats.send_failures += 1;
                tracing::warn!(error = %e, %peer_addr, "failed to send intro response");
            }
        }
    }
}

/// Create the non-blocking endpoint socket. IPv6 binds are dual-stack.
fn make_intro_socket(addr: SocketAddr) -> std::io::Result<std::net::UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    Ok(socket.into())
}
