//! rendezvous-core: shared types, wire messages, and the signaling error taxonomy.
//! All other rendezvous crates depend on this one.

pub mod config;
pub mod error;
pub mod wire;

pub use error::{ErrorBody, ErrorKind, SignalError};
pub use wire::{IntroRequest, IntroResponse};
