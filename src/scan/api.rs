//! Public API for the scan module
//!
//! Consolidates the external exports of the isolation scan system, following
//! the same pattern as the other api modules to keep a consistent
//! architecture across the application.

pub use crate::scan::classifier::{classify, detect_suspects, Classification, FATAL_MARKERS};
pub use crate::scan::error::{ScanError, ScanResult};
pub use crate::scan::probe::{ProbeStrategy, PROBE_HEADER, PROBE_TIMEOUT, TIMEOUT_MESSAGE};
pub use crate::scan::session::ScanSession;
pub use crate::scan::types::{
    component_id, Component, ComponentStatus, ProbeResult, ProbeStatus, RestoreOutcome,
    ScanMode, ScanReport, ScanState,
};
