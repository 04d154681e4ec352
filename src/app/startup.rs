//! Application startup and command dispatch
//!
//! Wires the command line to the scan session: arguments first, then the
//! configuration file, then logging, then one subcommand execution against
//! freshly built collaborators. All user-facing failures leave through
//! [`log_error_with_context`] so actionable configuration problems read
//! differently from internal ones.

use crate::app::cli::api::{
    display_component_table, display_diagnosis, display_log_suspects, display_probe_result,
    display_scan_report, display_snapshot_status, parse_conflict_specs, summarizer_config, Args,
    Command,
};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::logtail::api::{sanitize_lines, TailLimits};
use crate::registry::api::FsComponentRegistry;
use crate::scan::api::{
    detect_suspects, ProbeStrategy, ScanError, ScanMode, ScanResult, ScanSession,
};
use crate::snapshot::api::{FileSnapshotStore, SnapshotStore};
use crate::summary::api::Summarizer;
use clap::Parser;
use std::sync::Arc;

/// Process entry: parse, configure, dispatch. Returns the exit code.
pub async fn startup() -> i32 {
    let mut args = Args::parse();
    let raw_config = Args::parse_config_file_with_raw_config(&mut args).await;

    if let Some(force) = args.resolve_color_override() {
        colored::control::set_override(force);
    }
    let use_color = colored::control::SHOULD_COLORIZE.should_colorize();

    let log_file = args
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return 1;
    }

    log::debug!(
        "rescuescan {} starting",
        crate::core::version::version_string()
    );

    // Without a command, show the scan status
    let command = args.command.clone().unwrap_or(Command::Status);
    match run_command(&args, raw_config.as_ref(), command, use_color).await {
        Ok(()) => 0,
        Err(error) => {
            log_error_with_context(&error, "Command failed");
            1
        }
    }
}

async fn run_command(
    args: &Args,
    raw_config: Option<&toml::Table>,
    command: Command,
    use_color: bool,
) -> ScanResult<()> {
    match command {
        Command::List => {
            let session = build_session(args, raw_config)?;
            let components = session.list_components().await?;
            if args.json {
                print_json(&components)
            } else {
                display_component_table(&components, use_color);
                Ok(())
            }
        }
        Command::Start => {
            let mut session = build_session(args, raw_config)?;
            session.start().await?;
            let report = session.report();
            if args.json {
                print_json(&report)
            } else {
                println!(
                    "Scan started: {} component(s) queued for probing.",
                    report.components.len()
                );
                display_scan_report(&report, use_color);
                Ok(())
            }
        }
        Command::Probe { file } => {
            let session = build_session(args, raw_config)?;
            let result = session.probe_file(&file).await;
            if args.json {
                print_json(&result)
            } else {
                display_probe_result(&file, &result, use_color);
                Ok(())
            }
        }
        Command::Scan => {
            let mut session = build_session(args, raw_config)?;
            let report = session.run().await?;
            if args.json {
                print_json(&report)
            } else {
                display_scan_report(&report, use_color);
                Ok(())
            }
        }
        Command::Analyze { conflicts } => {
            let conflicts = parse_conflict_specs(&conflicts)?;
            let summarizer = Summarizer::from_config(&summarizer_config(raw_config));
            let diagnosis = summarizer.summarize(&conflicts).await;
            if args.json {
                print_json(&diagnosis)
            } else {
                display_diagnosis(&diagnosis, use_color);
                Ok(())
            }
        }
        Command::Restore { keep } => {
            let session = build_session(args, raw_config)?;
            let outcome = session.restore_excluding(&keep).await?;
            if args.json {
                print_json(&outcome)
            } else {
                println!("{}", outcome.message);
                Ok(())
            }
        }
        Command::Status => {
            let store = build_store(args)?;
            let snapshot = store.load().await.map_err(|e| ScanError::Snapshot {
                message: e.to_string(),
            })?;
            let suspects = log_suspects(args);
            if args.json {
                print_json(&serde_json::json!({
                    "snapshot": snapshot,
                    "log_suspects": suspects,
                }))
            } else {
                display_snapshot_status(snapshot.as_ref(), use_color);
                display_log_suspects(&suspects, use_color);
                Ok(())
            }
        }
    }
}

/// Assemble a scan session from the resolved configuration.
///
/// Everything is built fresh per invocation; cross-invocation continuity
/// lives solely in the snapshot record.
fn build_session(args: &Args, raw_config: Option<&toml::Table>) -> ScanResult<ScanSession> {
    let root = args.components_root()?;
    let registry = Arc::new(FsComponentRegistry::new(&root));
    let store = Arc::new(FileSnapshotStore::new(
        args.snapshot_path(&root),
        args.snapshot_ttl_duration(),
    ));
    let summarizer = Summarizer::from_config(&summarizer_config(raw_config));

    let strategy = match args.scan_mode()? {
        ScanMode::Physical => ProbeStrategy::physical(args.log_path.clone()),
        ScanMode::Virtual => {
            ProbeStrategy::side_channel(args.probe_url.clone().unwrap_or_default())?
        }
    };

    Ok(ScanSession::new(
        registry,
        store,
        summarizer,
        strategy,
        args.effective_self_identifier(),
    )
    .with_probe_budget(args.probe_timeout_duration()))
}

fn build_store(args: &Args) -> ScanResult<FileSnapshotStore> {
    let root = args.components_root()?;
    Ok(FileSnapshotStore::new(
        args.snapshot_path(&root),
        args.snapshot_ttl_duration(),
    ))
}

/// Component slugs the configured error log already implicates, before any
/// probing. Empty when no log is configured or nothing matches.
fn log_suspects(args: &Args) -> Vec<String> {
    match args.log_path.as_deref() {
        Some(path) => detect_suspects(&sanitize_lines(&TailLimits::BASELINE.tail(path))),
        None => Vec::new(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ScanResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ScanError::Session {
        message: format!("could not serialize output: {}", e),
    })?;
    println!("{}", text);
    Ok(())
}
