//! Public API for the snapshot module

pub use crate::snapshot::error::{SnapshotError, SnapshotResult};
pub use crate::snapshot::store::{FileSnapshotStore, SnapshotStore};
pub use crate::snapshot::types::{Snapshot, DEFAULT_SNAPSHOT_TTL};
