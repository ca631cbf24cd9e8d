//! rendezvous-peer: the signaling client, the bootstrap sequence, and the
//! datagram introduction endpoint a peer runs.

pub mod bootstrap;
pub mod client;
pub mod intro;
pub mod keepalive;

pub use bootstrap::{bootstrap, BootstrapError, Bootstrapped};
pub use client::{ClientError, SignalingClient};
pub use intro::{introduce, intro_target, EndpointStats, IntroEndpoint, IntroError, Introduction};
