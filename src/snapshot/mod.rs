//! Snapshot Store
//!
//! Persists "which components were enabled before the scan started" with a
//! TTL so a scan can be restored even across process restarts. Write-once:
//! a live snapshot is never overwritten by a later `start()`.

pub mod api;
pub mod error;
pub mod store;
pub mod types;
