//! Scan Types and Enums
//!
//! Shared types and enums used throughout the isolation scan module.

use crate::summary::api::Diagnosis;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Probe lifecycle of a single component within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComponentStatus {
    Pending,
    Scanning,
    Healthy,
    Conflict,
}

/// One togglable unit of the host application, as frozen into a scan session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier derived from the component's file path
    pub id: String,
    /// Path/slug identifying the unit to the registry
    pub file: String,
    /// Human-readable label, falls back to `file` when the registry has none
    pub name: String,
    pub status: ComponentStatus,
    /// Failure description, set only when `status` is `Conflict`
    pub error: Option<String>,
}

impl Component {
    pub fn new(file: impl Into<String>, name: Option<String>) -> Self {
        let file = file.into();
        let name = name.unwrap_or_else(|| file.clone());
        Self {
            id: component_id(&file),
            file,
            name,
            status: ComponentStatus::Pending,
            error: None,
        }
    }
}

/// Generate a SHA256-based component ID from a file path.
///
/// The full digest is stable but unwieldy in tables and JSON payloads, so the
/// ID keeps the first 16 hex characters.
pub fn component_id(file: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.as_bytes());
    let hash_hex = format!("{:x}", hasher.finalize());
    hash_hex[..16].to_string()
}

/// Probe mode selected per session
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScanMode {
    /// Really enable/disable components through the registry
    Physical,
    /// Force a single-component view via a side-channel request, no state change
    Virtual,
}

/// Verdict for one probed component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Conflict,
}

/// Outcome of probing one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub status: ProbeStatus,
    /// Failure description, present only on conflict
    pub message: Option<String>,
}

impl ProbeResult {
    pub fn healthy() -> Self {
        Self {
            status: ProbeStatus::Healthy,
            message: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Conflict,
            message: Some(message.into()),
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status == ProbeStatus::Conflict
    }
}

/// Where the scan state machine currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Snapshotting,
    /// Probing the component at this index in the frozen component list
    Probing(usize),
    Analyzing,
    Restoring,
    Done,
    /// Absorbing failure state, a new `start()` is the only way out
    Errored,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::Snapshotting => write!(f, "snapshotting"),
            ScanState::Probing(index) => write!(f, "probing({})", index),
            ScanState::Analyzing => write!(f, "analyzing"),
            ScanState::Restoring => write!(f, "restoring"),
            ScanState::Done => write!(f, "done"),
            ScanState::Errored => write!(f, "errored"),
        }
    }
}

/// Result of a restore call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub ok: bool,
    pub message: String,
}

impl RestoreOutcome {
    pub fn restored() -> Self {
        Self {
            ok: true,
            message: "Restored.".to_string(),
        }
    }

    pub fn missing() -> Self {
        Self {
            ok: false,
            message: "No snapshot found.".to_string(),
        }
    }
}

/// Terminal view of a session: the frozen component list with final statuses,
/// the diagnosis when one was produced, and the failure reason on error.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub state: String,
    pub components: Vec<Component>,
    pub diagnosis: Option<Diagnosis>,
    pub failure: Option<String>,
}
