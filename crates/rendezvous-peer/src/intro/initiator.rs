//! Outbound introduction: probe a counterpart and wait for its acknowledgement.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;

use rendezvous_core::wire::{IntroRequest, IntroResponse, MAX_DATAGRAM};

#[derive(Debug, thiserror::Error)]
pub enum IntroError {
    #[error("introduction socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode intro request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no introduction response from {target} within {timeout:?}")]
    Timeout { target: SocketAddr, timeout: Duration },
}

/// A counterpart that answered our probe.
#[derive(Debug, Clone)]
pub struct Introduction {
    /// Display name the counterpart answered with.
    pub responder: String,
    /// Source address of the response.
    pub address: SocketAddr,
    pub round_trip: Duration,
}

/// Probe `target` from a fresh ephemeral socket.
pub async fn introduce(
    target: SocketAddr,
    sender: &str,
    timeout: Duration,
) -> Result<Introduction, IntroError> {
    let bind: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind).await?;
    introduce_from(&socket, target, sender, timeout).await
}

/// Probe `target` from `socket`. Datagrams that are not a response to this
/// probe are ignored until `timeout` runs out.
pub async fn introduce_from(
    socket: &UdpSocket,
    target: SocketAddr,
    sender: &str,
    timeout: Duration,
) -> Result<Introduction, IntroError> {
    let nonce: u64 = rand::random();
    let request = IntroRequest::new(sender, nonce).encode()?;

    let started = Instant::now();
    socket.send_to(&request, target).await?;
    tracing::debug!(%target, nonce, "sent intro request");

    let mut buf = vec![0u8; MAX_DATAGRAM];
    let wait = async {
        loop {
            let (len, from) = socket.recv_from(&mut buf).await?;
            match IntroResponse::decode(&buf[..len]) {
                Some(resp) if resp.ack == nonce => return Ok::<_, IntroError>((resp, from)),
                Some(resp) => {
                    tracing::debug!(%from, ack = resp.ack, "ignoring response to another probe")
                }
                None => tracing::debug!(%from, len, "ignoring undecodable datagram"),
            }
        }
    };

    match tokio::time::timeout(timeout, wait).await {
        Ok(Ok((resp, from))) => {
            let round_trip = started.elapsed();
            tracing::info!(%from, responder = %resp.responder, ?round_trip, "counterpart reachable");
            Ok(Introduction {
                responder: resp.responder,
                address: from,
                round_trip,
            })
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(IntroError::Timeout { target, timeout }),
    }
}
