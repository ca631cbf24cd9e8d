//! CLI command modules.

pub mod intro;
pub mod run;
pub mod signaling;
