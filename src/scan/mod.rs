//! Incremental Isolation Scan
//!
//! The core workflow of the crate: snapshot which components are enabled,
//! disable them all, re-enable one at a time (or probe them virtually over a
//! side channel), watch the error log for fresh fatal lines, stop at the
//! first conflict, and restore everything else.
//!
//! ## Layout
//!
//! - [`session`]: the `ScanSession` state machine orchestrating one pass
//! - [`probe`]: physical and virtual probe strategies with a shared timeout
//! - [`classifier`]: pure fatal-line heuristics over fresh log lines
//! - [`types`]: components, probe verdicts, machine states, reports

pub mod api;
pub mod classifier;
pub mod error;
pub mod probe;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;
