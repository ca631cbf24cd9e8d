//! Configuration system for Rendezvous.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $RENDEZVOUS_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/rendezvous/config.toml
//!   3. ~/.config/rendezvous/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration. One file serves both the server and the peer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendezvousConfig {
    pub server: ServerConfig,
    pub peer: PeerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the signaling HTTP server binds to.
    pub bind: String,
    /// Signaling HTTP port.
    pub port: u16,
    /// Mount /debug/* routes (registry reset and listing). Never enable in production.
    pub debug_routes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Base URL of the signaling server, e.g. "http://10.0.0.1:8484".
    pub signaling_url: String,
    /// Display name this peer registers under.
    pub display_name: String,
    /// Timeout for each signaling request, in milliseconds.
    pub request_timeout_ms: u64,
    /// Address the introduction endpoint binds to.
    pub intro_bind: String,
    /// Well-known UDP port of the introduction endpoint.
    pub intro_port: u16,
    /// Bounded wait of a single introduction receive, in milliseconds.
    pub wait_timeout_ms: u64,
    /// Re-send ready every N seconds while running. 0 = never.
    pub keepalive_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_SIGNALING_PORT: u16 = 8484;
pub const DEFAULT_INTRO_PORT: u16 = 8585;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_SIGNALING_PORT,
            debug_routes: false,
        }
    }
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            signaling_url: format!("http://127.0.0.1:{}", DEFAULT_SIGNALING_PORT),
            display_name: std::env::var("USER").unwrap_or_else(|_| "peer".to_string()),
            request_timeout_ms: 5_000,
            intro_bind: "0.0.0.0".to_string(),
            intro_port: DEFAULT_INTRO_PORT,
            wait_timeout_ms: 1_000,
            keepalive_secs: 30,
        }
    }
}

impl PeerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn keepalive(&self) -> Option<Duration> {
        (self.keepalive_secs > 0).then(|| Duration::from_secs(self.keepalive_secs))
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("rendezvous")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl RendezvousConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::file_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
            Self::parse(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?
        } else {
            RendezvousConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("RENDEZVOUS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&RendezvousConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply RENDEZVOUS_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("RENDEZVOUS_SERVER__BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_SERVER__PORT") {
            if let Ok(p) = v.parse() {
                self.server.port = p;
            }
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_SERVER__DEBUG_ROUTES") {
            self.server.debug_routes = v == "true" || v == "1";
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__SIGNALING_URL") {
            self.peer.signaling_url = v;
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__DISPLAY_NAME") {
            self.peer.display_name = v;
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__INTRO_BIND") {
            self.peer.intro_bind = v;
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__INTRO_PORT") {
            if let Ok(p) = v.parse() {
                self.peer.intro_port = p;
            }
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__WAIT_TIMEOUT_MS") {
            if let Ok(ms) = v.parse() {
                self.peer.wait_timeout_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = v.parse() {
                self.peer.request_timeout_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("RENDEZVOUS_PEER__KEEPALIVE_SECS") {
            if let Ok(secs) = v.parse() {
                self.peer.keepalive_secs = secs;
            }
        }
    }
}
