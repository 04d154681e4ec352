//! Public API exports for the CLI module
//!
//! This module provides the public interface for CLI functionality,
//! ensuring clean boundaries between modules as per project architecture.

pub use crate::app::cli::args::{parse_conflict_specs, Args, Command, DEFAULT_SELF_IDENTIFIER};
pub use crate::app::cli::config::{summarizer_config, API_KEY_ENV_VAR};
pub use crate::app::cli::display::{
    display_component_table, display_diagnosis, display_log_suspects, display_probe_result,
    display_scan_report, display_snapshot_status,
};
