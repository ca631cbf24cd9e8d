//! Peer registry: display name to last-known signaling address.
//!
//! One instance per server process, created at startup and handed to the
//! signaling layer. All records live behind a single `RwLock`: writers take
//! it exclusively, readers share it. Check-then-write operations (`claim`,
//! `release`) hold the write lock across both steps so two concurrent calls
//! for the same name cannot both pass the check.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rendezvous_core::SignalError;

/// A registered, currently reachable peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    pub display_name: String,
    /// `ip:port` the peer was observed making its last successful registration from.
    pub address: String,
}

/// Read-only summary for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub peers_online: usize,
}

/// Outcome of a successful [`PeerRegistry::claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The name was free.
    New,
    /// The name was already bound to the same address (keep-alive).
    Refreshed,
}

#[derive(Clone, Default)]
pub struct PeerRegistry {
    records: Arc<RwLock<HashMap<String, PeerRecord>>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a record half-written
    // (every mutation is a single map call), so poisoned guards are reused.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, PeerRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PeerRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or overwrite the record for `name`.
    pub fn upsert(&self, name: &str, address: &str) {
        insert_record(&mut self.write(), name, address);
    }

    /// Current address for `name`, if registered.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.read().get(name).map(|r| r.address.clone())
    }

    /// Bind `name` to `address` unless it is bound to a different address.
    pub fn claim(&self, name: &str, address: &str) -> Result<Claim, SignalError> {
        let mut records = self.write();
        let claim = match records.get(name) {
            Some(existing) if existing.address != address => {
                return Err(SignalError::NameInUse(name.to_string()));
            }
            Some(_) => Claim::Refreshed,
            None => Claim::New,
        };
        insert_record(&mut records, name, address);
        Ok(claim)
    }

    /// Remove `name` if, and only if, it is bound to `address`.
    pub fn release(&self, name: &str, address: &str) -> Result<(), SignalError> {
        let mut records = self.write();
        match records.get(name) {
            None => Err(SignalError::PeerOffline(name.to_string())),
            Some(existing) if existing.address != address => {
                Err(SignalError::NameInUse(name.to_string()))
            }
            Some(_) => {
                records.remove(name);
                Ok(())
            }
        }
    }

    /// Remove every record. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut records = self.write();
        let removed = records.len();
        records.clear();
        removed
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            peers_online: self.read().len(),
        }
    }

    /// All records, sorted by display name.
    pub fn list(&self) -> Vec<PeerRecord> {
        let mut records: Vec<PeerRecord> = self.read().values().cloned().collect();
        records.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        records
    }
}

fn insert_record(records: &mut HashMap<String, PeerRecord>, name: &str, address: &str) {
    records.insert(
        name.to_string(),
        PeerRecord {
            display_name: name.to_string(),
            address: address.to_string(),
        },
    );
}
