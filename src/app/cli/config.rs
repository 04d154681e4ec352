//! TOML configuration file parsing and loading
//!
//! This module handles loading and parsing of TOML configuration files,
//! including default config file discovery and mapping config values onto
//! command-line arguments the user left unset.

use std::path::PathBuf;
use std::time::Duration;

use super::args::Args;
use crate::scan::api::{ScanError, ScanResult};
use crate::summary::api::SummarizerConfig;

/// Environment variable consulted for the summarizer API key. Wins over the
/// config file so the key can stay out of it.
pub const API_KEY_ENV_VAR: &str = "RESCUESCAN_API_KEY";

impl Args {
    /// Load the config file, apply it and return the raw TOML table
    ///
    /// A config file named on the command line must exist; the default at
    /// `<config dir>/rescuescan/rescuescan.toml` is optional and silently
    /// skipped when absent. The raw table is returned so sections such as
    /// `[summarizer]` can be read by their consumers.
    pub async fn parse_config_file_with_raw_config(args: &mut Self) -> Option<toml::Table> {
        let config_path = match args.config_file.clone() {
            Some(path) => {
                // User specified a config file - it must exist
                if !path.exists() {
                    eprintln!(
                        "Error: The specified configuration file does not exist: {}",
                        path.display()
                    );
                    std::process::exit(1);
                }
                Some(path)
            }
            None => {
                // Use default config path if it exists
                let default_path =
                    dirs::config_dir().map(|d| d.join("rescuescan").join("rescuescan.toml"));
                match default_path {
                    Some(path) if path.exists() => Some(path),
                    _ => None, // No config file to load
                }
            }
        };

        // If we have a config path, load and parse it
        if let Some(path) = config_path {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => match toml::from_str::<toml::Table>(&contents) {
                    Ok(config) => {
                        if let Err(e) = Self::apply_toml_values(args, &config) {
                            eprintln!("Error in configuration file {}: {}", path.display(), e);
                            std::process::exit(1);
                        }
                        Some(config) // Return the raw config
                    }
                    Err(e) => {
                        eprintln!("Error parsing configuration file {}: {}", path.display(), e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error reading configuration file {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        } else {
            None // No config file found
        }
    }

    /// Apply TOML configuration values to Args
    ///
    /// The command line wins: a value is taken from the config table only
    /// when the matching argument was not given.
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> ScanResult<()> {
        if args.components_dir.is_none() {
            if let Some(dir) = config.get("components-dir").and_then(|v| v.as_str()) {
                args.components_dir = Some(PathBuf::from(dir));
            }
        }
        if args.log_path.is_none() {
            if let Some(path) = config.get("log-path").and_then(|v| v.as_str()) {
                args.log_path = Some(PathBuf::from(path));
            }
        }
        if args.mode.is_none() {
            if let Some(mode) = config.get("mode").and_then(|v| v.as_str()) {
                args.mode = Some(mode.to_string());
            }
        }
        if args.probe_url.is_none() {
            if let Some(url) = config.get("probe-url").and_then(|v| v.as_str()) {
                args.probe_url = Some(url.to_string());
            }
        }
        if args.probe_timeout.is_none() {
            if let Some(value) = config.get("probe-timeout") {
                args.probe_timeout = Some(read_seconds(value, "probe-timeout")?);
            }
        }
        if args.snapshot_file.is_none() {
            if let Some(path) = config.get("snapshot-file").and_then(|v| v.as_str()) {
                args.snapshot_file = Some(PathBuf::from(path));
            }
        }
        if args.snapshot_ttl.is_none() {
            if let Some(value) = config.get("snapshot-ttl") {
                args.snapshot_ttl = Some(read_seconds(value, "snapshot-ttl")?);
            }
        }
        if args.self_identifier.is_none() {
            if let Some(id) = config.get("self-identifier").and_then(|v| v.as_str()) {
                args.self_identifier = Some(id.to_string());
            }
        }

        // color = true/false and legacy no-color both map onto the flag pair
        // consumed by resolve_color_override; no-color wins when both appear.
        // Clap parses an absent SetTrue flag as Some(false), so "unset" here
        // means neither flag was actually given.
        if args.color != Some(true) && args.no_color != Some(true) {
            let configured = match (
                config.get("color").and_then(|v| v.as_bool()),
                config.get("no-color").and_then(|v| v.as_bool()),
            ) {
                (_, Some(no_color)) => Some(!no_color),
                (Some(color), None) => Some(color),
                (None, None) => None,
            };
            match configured {
                Some(true) => args.color = Some(true),
                Some(false) => args.no_color = Some(true),
                None => {}
            }
        }

        if args.log_level.is_none() {
            if let Some(log_level) = config.get("log-level").and_then(|v| v.as_str()) {
                args.log_level = Some(log_level.to_string());
            }
        }
        if args.log_file.is_none() {
            if let Some(log_file) = config.get("log-file").and_then(|v| v.as_str()) {
                // Magic values "none" and "-" keep file logging disabled
                if !(log_file.eq_ignore_ascii_case("none") || log_file == "-") {
                    args.log_file = Some(PathBuf::from(log_file));
                }
            }
        }
        if args.log_format.is_none() {
            if let Some(log_format) = config.get("log-format").and_then(|v| v.as_str()) {
                args.log_format = Some(log_format.to_string());
            }
        }

        // Fail at load time rather than mid-scan on a bad mode string
        args.scan_mode()?;

        Ok(())
    }
}

/// Build the summarizer configuration from the `[summarizer]` config section
///
/// Absent keys keep the crate defaults. The API key is read from the section
/// first and then from the environment, which wins.
pub fn summarizer_config(config: Option<&toml::Table>) -> SummarizerConfig {
    let mut summarizer = SummarizerConfig::default();

    if let Some(section) = config
        .and_then(|table| table.get("summarizer"))
        .and_then(|v| v.as_table())
    {
        if let Some(endpoint) = section.get("endpoint").and_then(|v| v.as_str()) {
            summarizer.endpoint = endpoint.to_string();
        }
        if let Some(api_key) = section.get("api-key").and_then(|v| v.as_str()) {
            summarizer.api_key = api_key.to_string();
        }
        if let Some(model) = section.get("model").and_then(|v| v.as_str()) {
            summarizer.model = model.to_string();
        }
        if let Some(temperature) = section.get("temperature").and_then(as_float_value) {
            summarizer.temperature = temperature as f32;
        }
        if let Some(max_tokens) = section.get("max-tokens").and_then(|v| v.as_integer()) {
            if max_tokens > 0 {
                summarizer.max_tokens = max_tokens as u32;
            }
        }
        if let Some(timeout) = section.get("timeout").and_then(|v| v.as_integer()) {
            if timeout > 0 {
                summarizer.timeout = Duration::from_secs(timeout as u64);
            }
        }
    }

    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.trim().is_empty() {
            summarizer.api_key = key;
        }
    }

    summarizer
}

fn read_seconds(value: &toml::Value, key: &str) -> ScanResult<u64> {
    value
        .as_integer()
        .filter(|secs| *secs >= 0)
        .map(|secs| secs as u64)
        .ok_or_else(|| ScanError::Configuration {
            message: format!("'{}' must be a non-negative number of seconds", key),
        })
}

// Accepts `temperature = 1` as well as `temperature = 0.3`
fn as_float_value(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}
