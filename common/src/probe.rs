//! # Probe Model
//!
//! Plain values exchanged between the collector, the scheduler and the
//! annotation pass. None of them own any part of the document: a target
//! only remembers the [`NodeId`] of the entry it came from.

use std::time::Duration;

use async_trait::async_trait;

use crate::document::NodeId;

/// One address waiting for a liveness check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    pub address: String,
    /// The entry that gets disabled if the address is unreachable.
    pub origin: NodeId,
    /// Human readable cause attached to the entry on failure.
    pub reason: &'static str,
}

impl ProbeTarget {
    pub fn new(address: impl Into<String>, origin: NodeId, reason: &'static str) -> Self {
        Self {
            address: address.into(),
            origin,
            reason,
        }
    }
}

/// The result of probing one [`ProbeTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: ProbeTarget,
    pub reachable: bool,
}

/// A raw point-to-point liveness check.
///
/// Implementations must be safe to call concurrently. A probe that cannot
/// decide within `timeout` returns `false`; there is no error case.
#[async_trait]
pub trait LivenessProber: Send + Sync {
    async fn probe(&self, address: &str, timeout: Duration) -> bool;
}
