//! CLI argument parsing tests
//!
//! Tests for command-line argument and subcommand parsing through the public
//! API, including the error kinds reserved for --help and --version.

use clap::error::ErrorKind;
use clap::Parser;
use rescuescan::app::cli::api::{Args, Command};
use std::path::PathBuf;

#[test]
fn test_parse_bare_invocation_has_no_command() {
    let args = vec!["rescuescan".to_string()];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(result.command, None);
    assert!(!result.json);
    assert_eq!(result.mode, None);
    assert_eq!(result.components_dir, None);
}

#[test]
fn test_parse_all_global_fields() {
    let args = vec![
        "rescuescan".to_string(),
        "--config-file".to_string(),
        "custom.toml".to_string(),
        "--components-dir".to_string(),
        "/srv/app/plugins".to_string(),
        "--log-path".to_string(),
        "/var/log/app/error.log".to_string(),
        "--mode".to_string(),
        "virtual".to_string(),
        "--probe-url".to_string(),
        "https://app.example/".to_string(),
        "--probe-timeout".to_string(),
        "30".to_string(),
        "--snapshot-file".to_string(),
        "/tmp/snapshot.json".to_string(),
        "--snapshot-ttl".to_string(),
        "7200".to_string(),
        "--self-identifier".to_string(),
        "helper".to_string(),
        "--log-level".to_string(),
        "debug".to_string(),
        "--log-format".to_string(),
        "json".to_string(),
        "scan".to_string(),
    ];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(result.config_file, Some(PathBuf::from("custom.toml")));
    assert_eq!(
        result.components_dir,
        Some(PathBuf::from("/srv/app/plugins"))
    );
    assert_eq!(
        result.log_path,
        Some(PathBuf::from("/var/log/app/error.log"))
    );
    assert_eq!(result.mode, Some("virtual".to_string()));
    assert_eq!(result.probe_url, Some("https://app.example/".to_string()));
    assert_eq!(result.probe_timeout, Some(30));
    assert_eq!(result.snapshot_file, Some(PathBuf::from("/tmp/snapshot.json")));
    assert_eq!(result.snapshot_ttl, Some(7200));
    assert_eq!(result.self_identifier, Some("helper".to_string()));
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert_eq!(result.log_format, Some("json".to_string()));
    assert_eq!(result.command, Some(Command::Scan));
}

#[test]
fn test_parse_short_flags() {
    let args = vec![
        "rescuescan".to_string(),
        "-d".to_string(),
        "/srv/app/plugins".to_string(),
        "-e".to_string(),
        "error.log".to_string(),
        "-m".to_string(),
        "physical".to_string(),
        "-l".to_string(),
        "trace".to_string(),
        "-j".to_string(),
        "status".to_string(),
    ];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(
        result.components_dir,
        Some(PathBuf::from("/srv/app/plugins"))
    );
    assert_eq!(result.log_path, Some(PathBuf::from("error.log")));
    assert_eq!(result.mode, Some("physical".to_string()));
    assert_eq!(result.log_level, Some("trace".to_string()));
    assert!(result.json);
    assert_eq!(result.command, Some(Command::Status));
}

#[test]
fn test_parse_probe_requires_file() {
    let args = vec!["rescuescan".to_string(), "probe".to_string()];

    let result = Args::try_parse_from(&args);

    assert!(result.is_err());
}

#[test]
fn test_parse_probe_with_file() {
    let args = vec![
        "rescuescan".to_string(),
        "probe".to_string(),
        "--file".to_string(),
        "gallery/gallery.php".to_string(),
    ];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(
        result.command,
        Some(Command::Probe {
            file: "gallery/gallery.php".to_string()
        })
    );
}

#[test]
fn test_parse_analyze_collects_repeated_conflicts() {
    let args = vec![
        "rescuescan".to_string(),
        "analyze".to_string(),
        "--conflict".to_string(),
        "Gallery=Fatal error in gallery.php".to_string(),
        "--conflict".to_string(),
        "Forms=Parse error in forms.php".to_string(),
    ];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(
        result.command,
        Some(Command::Analyze {
            conflicts: vec![
                "Gallery=Fatal error in gallery.php".to_string(),
                "Forms=Parse error in forms.php".to_string(),
            ]
        })
    );
}

#[test]
fn test_parse_restore_collects_keep_list() {
    let args = vec![
        "rescuescan".to_string(),
        "restore".to_string(),
        "--keep".to_string(),
        "gallery/gallery.php".to_string(),
        "--keep".to_string(),
        "forms/forms.php".to_string(),
    ];

    let result = Args::try_parse_from(&args).unwrap();

    assert_eq!(
        result.command,
        Some(Command::Restore {
            keep: vec![
                "gallery/gallery.php".to_string(),
                "forms/forms.php".to_string(),
            ]
        })
    );
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    let args = vec!["rescuescan".to_string(), "metrics".to_string()];

    let result = Args::try_parse_from(&args);

    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_invalid_log_level() {
    let args = vec![
        "rescuescan".to_string(),
        "--log-level".to_string(),
        "verbose".to_string(),
    ];

    let result = Args::try_parse_from(&args);

    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_invalid_mode() {
    let args = vec![
        "rescuescan".to_string(),
        "--mode".to_string(),
        "hybrid".to_string(),
    ];

    let result = Args::try_parse_from(&args);

    assert!(result.is_err());
}

#[test]
fn test_color_flags_are_mutually_exclusive() {
    let args = vec![
        "rescuescan".to_string(),
        "--color".to_string(),
        "--no-color".to_string(),
    ];

    let error = Args::try_parse_from(&args).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_version_flag_uses_version_error_kind() {
    let args = vec!["rescuescan".to_string(), "--version".to_string()];

    let error = Args::try_parse_from(&args).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_help_flag_uses_help_error_kind() {
    let args = vec!["rescuescan".to_string(), "--help".to_string()];

    let error = Args::try_parse_from(&args).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DisplayHelp);
}
