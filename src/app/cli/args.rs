//! Core CLI arguments structure and basic functionality
//!
//! This module contains the main Args struct definition, the subcommand set
//! and basic accessor methods. Configuration file loading is handled by the
//! sibling config module.

use crate::scan::api::{ScanError, ScanMode, ScanResult, PROBE_TIMEOUT};
use crate::snapshot::api::DEFAULT_SNAPSHOT_TTL;
use crate::summary::api::ConflictReport;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Substring identifying the scanner's own component and log lines
pub const DEFAULT_SELF_IDENTIFIER: &str = "rescuescan";

/// Snapshot record filename used when --snapshot-file is not given
const DEFAULT_SNAPSHOT_FILENAME: &str = ".rescuescan-snapshot.json";

// Global arguments structure with all command-line options
//
// Parsed once at startup; configuration file values fill only the fields the
// command line left unset, so flags keep precedence.
#[derive(Parser, Debug, Clone)]
#[command(name = "rescuescan")]
#[command(about = "Finds the component that broke a running web application")]
#[command(version = crate::core::version::version_string())]
#[command(after_help = "Without a command, the current scan status is shown.")]
#[command(styles = crate::core::styles::palette_to_clap(colored::control::SHOULD_COLORIZE.should_colorize()))]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Root directory holding the application's togglable components
    #[arg(short = 'd', long = "components-dir", value_name = "DIR")]
    pub components_dir: Option<PathBuf>,

    /// Application error log watched for new fatal lines during probes
    #[arg(short = 'e', long = "log-path", value_name = "FILE")]
    pub log_path: Option<PathBuf>,

    /// Probe mode
    #[arg(short = 'm', long = "mode", value_name = "MODE", value_parser = ["physical", "virtual"])]
    pub mode: Option<String>,

    /// Front-door URL probed in virtual mode
    #[arg(short = 'u', long = "probe-url", value_name = "URL")]
    pub probe_url: Option<String>,

    /// Per-component probe timeout in seconds (minimum: 5)
    #[arg(long = "probe-timeout", value_name = "SECONDS")]
    pub probe_timeout: Option<u64>,

    /// Snapshot record path (default: <components-dir>/.rescuescan-snapshot.json)
    #[arg(long = "snapshot-file", value_name = "FILE")]
    pub snapshot_file: Option<PathBuf>,

    /// Snapshot expiry in seconds
    #[arg(long = "snapshot-ttl", value_name = "SECONDS")]
    pub snapshot_ttl: Option<u64>,

    /// Identifier marking the scanner's own component and log lines
    #[arg(long = "self-identifier", value_name = "NAME")]
    pub self_identifier: Option<String>,

    /// Force colored output even when stdout is not a terminal
    #[arg(short = 'g', long = "color", action = ArgAction::SetTrue)]
    pub color: Option<bool>,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, conflicts_with = "color")]
    pub no_color: Option<bool>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(
        short = 'f',
        long = "log-file",
        value_name = "FILE",
        help = "Log file path (use 'none' to disable file logging)"
    )]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands mapping onto the scan session operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the components the registry currently knows about
    List,

    /// Snapshot the enabled set and disable everything except the scanner
    Start,

    /// Probe one component in isolation
    Probe {
        /// Component file to probe
        #[arg(long = "file", value_name = "FILE")]
        file: String,
    },

    /// Run a full pass: start, probe every component, analyze, restore
    Scan,

    /// Summarize recorded conflicts into a diagnosis
    Analyze {
        /// Conflict as NAME=ERROR (repeatable)
        #[arg(long = "conflict", value_name = "NAME=ERROR", action = ArgAction::Append)]
        conflicts: Vec<String>,
    },

    /// Re-enable everything recorded in the snapshot
    Restore {
        /// Component file to keep disabled (repeatable)
        #[arg(long = "keep", value_name = "FILE", action = ArgAction::Append)]
        keep: Vec<String>,
    },

    /// Show whether a snapshot exists and what it recorded
    Status,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the color override from the paired flags
    ///
    /// Returns Some(true) if --color is specified, Some(false) if --no-color
    /// is specified, None when neither flag is given (TTY auto-detection).
    pub fn resolve_color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (Some(true), _) => Some(true),
            (_, Some(true)) => Some(false),
            _ => None,
        }
    }

    /// Parse the probe mode, defaulting to physical
    ///
    /// The command line restricts the value already; config files can carry
    /// arbitrary strings, so this validates again.
    pub fn scan_mode(&self) -> ScanResult<ScanMode> {
        match self.mode.as_deref() {
            None => Ok(ScanMode::Physical),
            Some(raw) => raw.parse::<ScanMode>().map_err(|_| ScanError::Configuration {
                message: format!("unknown probe mode '{}' (expected 'physical' or 'virtual')", raw),
            }),
        }
    }

    /// Get the probe timeout as Duration (enforces minimum of 5 seconds)
    pub fn probe_timeout_duration(&self) -> Duration {
        match self.probe_timeout {
            Some(secs) => Duration::from_secs(secs.max(5)),
            None => PROBE_TIMEOUT,
        }
    }

    /// Get the snapshot TTL as Duration
    pub fn snapshot_ttl_duration(&self) -> Duration {
        match self.snapshot_ttl {
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_SNAPSHOT_TTL,
        }
    }

    /// Identifier used to skip the scanner's own component and log noise
    pub fn effective_self_identifier(&self) -> String {
        self.self_identifier
            .clone()
            .unwrap_or_else(|| DEFAULT_SELF_IDENTIFIER.to_string())
    }

    /// Components root directory, required by every registry-backed command
    pub fn components_root(&self) -> ScanResult<PathBuf> {
        self.components_dir
            .clone()
            .ok_or_else(|| ScanError::Configuration {
                message: "no components directory set (--components-dir or 'components-dir' in the config file)"
                    .to_string(),
            })
    }

    /// Snapshot record path, derived from the components root when not set
    pub fn snapshot_path(&self, components_root: &Path) -> PathBuf {
        match &self.snapshot_file {
            Some(path) => path.clone(),
            None => components_root.join(DEFAULT_SNAPSHOT_FILENAME),
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config_file: None,
            components_dir: None,
            log_path: None,
            mode: None,
            probe_url: None,
            probe_timeout: None,
            snapshot_file: None,
            snapshot_ttl: None,
            self_identifier: None,
            color: None,
            no_color: None,
            log_level: None,
            log_file: None,
            log_format: None, // "text" is applied at logger init
            json: false,
            command: None,
        }
    }
}

/// Parse `--conflict NAME=ERROR` specs into conflict reports
///
/// The error part may itself contain `=`; only the first one splits.
pub fn parse_conflict_specs(specs: &[String]) -> ScanResult<Vec<ConflictReport>> {
    let mut conflicts = Vec::with_capacity(specs.len());
    for spec in specs {
        match spec.split_once('=') {
            Some((name, error)) if !name.trim().is_empty() => {
                conflicts.push(ConflictReport::new(name.trim(), error.trim()));
            }
            _ => {
                return Err(ScanError::Configuration {
                    message: format!("invalid conflict spec '{}' (expected NAME=ERROR)", spec),
                });
            }
        }
    }
    Ok(conflicts)
}
