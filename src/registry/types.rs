//! Registry Types
//!
//! Shared types crossing the registry adapter boundary. Host registries are
//! loosely typed; normalisation (absent names, duplicate files) happens here
//! so the rest of the application sees strict shapes.

use serde::{Deserialize, Serialize};

/// One installed component as reported by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Path/slug identifying the component to the registry (e.g. "a/a.php")
    pub file: String,
    /// Human-readable label; callers fall back to `file` when absent
    pub name: Option<String>,
    /// Whether the component is currently enabled
    pub enabled: bool,
}

impl ComponentInfo {
    pub fn new(file: impl Into<String>, name: Option<String>, enabled: bool) -> Self {
        Self {
            file: file.into(),
            name,
            enabled,
        }
    }
}

/// Outcome of a multi-file disable. Disabling is not atomic; each file
/// succeeds or fails on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisableReport {
    /// Files successfully disabled
    pub disabled: Vec<String>,
    /// Files that could not be disabled, with the per-item reason
    pub failed: Vec<(String, String)>,
}

impl DisableReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_round_trips_optional_name() {
        let named = ComponentInfo::new("a/a.php", Some("Alpha".to_string()), true);
        assert_eq!(named.name.as_deref(), Some("Alpha"));

        let unnamed = ComponentInfo::new("b/b.php", None, false);
        assert!(unnamed.name.is_none());
        assert!(!unnamed.enabled);
    }

    #[test]
    fn test_disable_report_completeness() {
        let mut report = DisableReport::default();
        report.disabled.push("a/a.php".to_string());
        assert!(report.is_complete());

        report
            .failed
            .push(("b/b.php".to_string(), "locked".to_string()));
        assert!(!report.is_complete());
    }
}
