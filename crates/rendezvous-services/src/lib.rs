//! rendezvous-services: the peer registry and the signaling operations on it.

pub mod registry;
pub mod signaling;

pub use registry::{Claim, PeerRecord, PeerRegistry, RegistrySnapshot};
pub use signaling::Signaling;
