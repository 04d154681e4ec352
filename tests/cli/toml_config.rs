//! CLI TOML configuration tests
//!
//! Tests for TOML configuration parsing, value mapping, and CLI precedence.

use clap::Parser;
use rescuescan::app::cli::api::{summarizer_config, Args};
use rescuescan::scan::api::ScanMode;
use rescuescan::snapshot::api::DEFAULT_SNAPSHOT_TTL;
use std::path::PathBuf;
use std::time::Duration;
use toml::Table;

const FULL_CONFIG: &str = r#"
components-dir = "/srv/app/plugins"
log-path = "/var/log/app/error.log"
mode = "virtual"
probe-url = "https://app.example/"
probe-timeout = 45
snapshot-file = "/var/lib/rescuescan/snapshot.json"
snapshot-ttl = 7200
self-identifier = "helper"
log-level = "debug"
log-file = "rescuescan.log"
log-format = "ext"

[summarizer]
endpoint = "https://llm.internal/v1/chat/completions"
api-key = "sk-from-file"
model = "local-diagnoser"
temperature = 0.1
max-tokens = 256
timeout = 10
"#;

#[test]
fn test_full_config_file_round_trip() {
    let config: Table = toml::from_str(FULL_CONFIG).unwrap();
    let mut args = Args::default();

    Args::apply_toml_values(&mut args, &config).unwrap();

    assert_eq!(
        args.components_dir,
        Some(PathBuf::from("/srv/app/plugins"))
    );
    assert_eq!(args.log_path, Some(PathBuf::from("/var/log/app/error.log")));
    assert_eq!(args.scan_mode().unwrap(), ScanMode::Virtual);
    assert_eq!(args.probe_url, Some("https://app.example/".to_string()));
    assert_eq!(args.probe_timeout_duration(), Duration::from_secs(45));
    assert_eq!(
        args.snapshot_file,
        Some(PathBuf::from("/var/lib/rescuescan/snapshot.json"))
    );
    assert_eq!(args.snapshot_ttl_duration(), Duration::from_secs(7200));
    assert_eq!(args.effective_self_identifier(), "helper");
    assert_eq!(args.log_level, Some("debug".to_string()));
    assert_eq!(args.log_file, Some(PathBuf::from("rescuescan.log")));
    assert_eq!(args.log_format, Some("ext".to_string()));
}

#[test]
fn test_summarizer_section_mapping() {
    let config: Table = toml::from_str(FULL_CONFIG).unwrap();

    let summarizer = summarizer_config(Some(&config));

    assert_eq!(summarizer.endpoint, "https://llm.internal/v1/chat/completions");
    assert_eq!(summarizer.model, "local-diagnoser");
    assert!((summarizer.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(summarizer.max_tokens, 256);
    assert_eq!(summarizer.timeout, Duration::from_secs(10));
}

#[test]
fn test_summarizer_defaults_survive_missing_section() {
    let config: Table = toml::from_str("components-dir = \"/srv/app/plugins\"").unwrap();

    let summarizer = summarizer_config(Some(&config));

    assert_eq!(summarizer.model, "gpt-4o-mini");
    assert_eq!(summarizer.max_tokens, 400);
    assert_eq!(summarizer.timeout, Duration::from_secs(30));
}

#[test]
fn test_cli_values_keep_precedence_over_config() {
    let cli_args = vec![
        "rescuescan".to_string(),
        "--mode".to_string(),
        "physical".to_string(),
    ];
    let mut args = Args::try_parse_from(&cli_args).unwrap();

    let config: Table = toml::from_str("mode = \"virtual\"\nlog-level = \"warn\"").unwrap();
    Args::apply_toml_values(&mut args, &config).unwrap();

    // The flag the operator typed wins; only unset fields are filled.
    assert_eq!(args.scan_mode().unwrap(), ScanMode::Physical);
    assert_eq!(args.log_level, Some("warn".to_string()));
}

#[test]
fn test_color_config_applies_after_real_parse() {
    // Absent SetTrue flags parse as Some(false); the config layer still
    // treats them as unset.
    let cli_args = vec!["rescuescan".to_string(), "status".to_string()];
    let mut args = Args::try_parse_from(&cli_args).unwrap();

    let config: Table = toml::from_str("color = true").unwrap();
    Args::apply_toml_values(&mut args, &config).unwrap();

    assert_eq!(args.resolve_color_override(), Some(true));
}

#[test]
fn test_invalid_mode_in_config_rejected_at_load() {
    let config: Table = toml::from_str("mode = \"hybrid\"").unwrap();
    let mut args = Args::default();

    let result = Args::apply_toml_values(&mut args, &config);

    assert!(result.is_err());
}

#[test]
fn test_empty_config_leaves_defaults() {
    let config = Table::new();
    let mut args = Args::default();

    Args::apply_toml_values(&mut args, &config).unwrap();

    assert_eq!(args.scan_mode().unwrap(), ScanMode::Physical);
    assert_eq!(args.snapshot_ttl_duration(), DEFAULT_SNAPSHOT_TTL);
    assert_eq!(args.effective_self_identifier(), "rescuescan");
    assert!(args.components_root().is_err());
}
