//! Datagram introduction: a UDP probe/acknowledgement between two peers.
//!
//! The endpoint answers probes on a well-known port; the initiator sends one
//! probe to a counterpart resolved through the signaling server and waits for
//! the matching acknowledgement. Nothing here touches the signaling server.

use std::net::{AddrParseError, SocketAddr};

pub mod endpoint;
pub mod initiator;

pub use endpoint::{EndpointStats, IntroEndpoint};
pub use initiator::{introduce, introduce_from, IntroError, Introduction};

/// Where to send an introduction probe for a peer found at `address`.
///
/// The registry holds the source address of the peer's signaling
/// connection. Its IP is the best known reachable address; the port is an
/// ephemeral TCP port, so it is swapped for the well-known intro port.
pub fn intro_target(address: &str, intro_port: u16) -> Result<SocketAddr, AddrParseError> {
    let mut addr: SocketAddr = address.parse()?;
    addr.set_port(intro_port);
    Ok(addr)
}
