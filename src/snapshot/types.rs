//! Snapshot Types

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Default lifetime of a stored snapshot. A restore attempted after this
/// window is more likely to resurrect stale state than to help.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(3600);

/// Point-in-time record of which components were enabled before a scan
/// began. Exactly one live snapshot exists per scan scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Component files that were enabled, in registry enumeration order
    pub enabled: Vec<String>,
    pub created_at: SystemTime,
    pub ttl: Duration,
}

impl Snapshot {
    pub fn new(enabled: Vec<String>, ttl: Duration) -> Self {
        Self {
            enabled,
            created_at: SystemTime::now(),
            ttl,
        }
    }

    /// Age of the record; zero when the system clock moved backwards.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }
}
