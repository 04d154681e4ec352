//! CLI display utilities for formatting output
//!
//! Tables for component listings, key/value blocks for diagnoses and
//! snapshot status. All coloring goes through the StyleRole palette and is
//! dropped entirely when color is disabled.

use crate::core::styles::StyleRole;
use crate::scan::api::{Component, ComponentStatus, ProbeResult, ScanReport};
use crate::snapshot::api::Snapshot;
use crate::summary::api::{Diagnosis, Severity};
use prettytable::{format, Cell, Row, Table};

/// Display the component list as a table
pub fn display_component_table(components: &[Component], use_color: bool) {
    if components.is_empty() {
        println!("No components found.");
        return;
    }
    component_table(components, use_color).printstd();
}

/// Display a full scan report: state, per-component results, diagnosis
pub fn display_scan_report(report: &ScanReport, use_color: bool) {
    println!(
        "{} {}",
        StyleRole::Key.paint("Scan state:", use_color),
        report.state
    );
    if let Some(failure) = &report.failure {
        println!(
            "{} {}",
            StyleRole::Error.paint("Failure:", use_color),
            failure
        );
    }
    if !report.components.is_empty() {
        println!();
        component_table(&report.components, use_color).printstd();
    }
    if let Some(diagnosis) = &report.diagnosis {
        println!();
        display_diagnosis(diagnosis, use_color);
    }
}

/// Display the diagnosis as a key/value block
pub fn display_diagnosis(diagnosis: &Diagnosis, use_color: bool) {
    for line in diagnosis_lines(diagnosis, use_color) {
        println!("{}", line);
    }
}

/// Display the outcome of probing a single component
pub fn display_probe_result(file: &str, result: &ProbeResult, use_color: bool) {
    if result.is_conflict() {
        println!(
            "{} {}",
            StyleRole::Invalid.paint("conflict", use_color),
            file
        );
        if let Some(message) = &result.message {
            for line in message.lines() {
                println!("  {}", line);
            }
        }
    } else {
        println!("{} {}", StyleRole::Valid.paint("healthy", use_color), file);
    }
}

/// Display snapshot presence, age and the recorded enabled set
pub fn display_snapshot_status(snapshot: Option<&Snapshot>, use_color: bool) {
    for line in status_lines(snapshot, use_color) {
        println!("{}", line);
    }
}

/// Display component slugs the recent error log already implicates.
/// Silent when there are none.
pub fn display_log_suspects(suspects: &[String], use_color: bool) {
    if let Some(line) = suspects_line(suspects, use_color) {
        println!("{}", line);
    }
}

fn component_table(components: &[Component], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        styled_cell(StyleRole::Header, "Id", use_color),
        styled_cell(StyleRole::Header, "Component", use_color),
        styled_cell(StyleRole::Header, "File", use_color),
        styled_cell(StyleRole::Header, "Status", use_color),
        styled_cell(StyleRole::Header, "Error", use_color),
    ]));
    for component in components {
        table.add_row(Row::new(vec![
            styled_cell(StyleRole::Dim, &component.id, use_color),
            Cell::new(&component.name),
            Cell::new(&component.file),
            styled_cell(
                status_role(component.status),
                &component.status.to_string(),
                use_color,
            ),
            Cell::new(component.error.as_deref().unwrap_or("")),
        ]));
    }
    table
}

fn diagnosis_lines(diagnosis: &Diagnosis, use_color: bool) -> Vec<String> {
    let severity_text = diagnosis.severity.to_string();
    let mut lines = vec![
        format!(
            "{} {}",
            StyleRole::Key.paint("Severity:", use_color),
            severity_role(diagnosis.severity).paint(&severity_text, use_color)
        ),
        format!(
            "{} {}",
            StyleRole::Key.paint("Summary:", use_color),
            diagnosis.summary
        ),
        format!(
            "{} {}",
            StyleRole::Key.paint("Recommendation:", use_color),
            diagnosis.recommendation
        ),
    ];
    if !diagnosis.technical_details.is_empty() {
        lines.push(format!(
            "{} {}",
            StyleRole::Key.paint("Details:", use_color),
            diagnosis.technical_details
        ));
    }
    lines
}

fn status_lines(snapshot: Option<&Snapshot>, use_color: bool) -> Vec<String> {
    let Some(snapshot) = snapshot else {
        return vec![format!(
            "{} none",
            StyleRole::Key.paint("Snapshot:", use_color)
        )];
    };

    let age = snapshot.age();
    let remaining = snapshot.ttl.saturating_sub(age);
    let mut lines = vec![
        format!(
            "{} present",
            StyleRole::Key.paint("Snapshot:", use_color)
        ),
        format!(
            "{} {} ago (expires in {})",
            StyleRole::Key.paint("Created:", use_color),
            format_age(age.as_secs()),
            format_age(remaining.as_secs())
        ),
        format!(
            "{} {}",
            StyleRole::Key.paint("Recorded components:", use_color),
            snapshot.enabled.len()
        ),
    ];
    for file in &snapshot.enabled {
        lines.push(format!("  - {}", file));
    }
    lines
}

fn suspects_line(suspects: &[String], use_color: bool) -> Option<String> {
    if suspects.is_empty() {
        return None;
    }
    Some(format!(
        "{} {}",
        StyleRole::Key.paint("Log suspects:", use_color),
        suspects.join(", ")
    ))
}

fn styled_cell(role: StyleRole, text: &str, use_color: bool) -> Cell {
    let cell = Cell::new(text);
    if !use_color {
        return cell;
    }
    match role.to_prettytable_spec() {
        Some(spec) => cell.style_spec(&spec),
        None => cell,
    }
}

fn status_role(status: ComponentStatus) -> StyleRole {
    match status {
        ComponentStatus::Pending => StyleRole::Dim,
        ComponentStatus::Scanning => StyleRole::Accent,
        ComponentStatus::Healthy => StyleRole::Valid,
        ComponentStatus::Conflict => StyleRole::Invalid,
    }
}

fn severity_role(severity: Severity) -> StyleRole {
    match severity {
        Severity::Low => StyleRole::Valid,
        Severity::Medium => StyleRole::Header,
        Severity::High => StyleRole::Error,
    }
}

/// Render a duration in seconds as a compact human-readable age
fn format_age(total_secs: u64) -> String {
    if total_secs < 60 {
        return format!("{}s", total_secs);
    }
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes < 60 {
        return match seconds {
            0 => format!("{}m", minutes),
            _ => format!("{}m {}s", minutes, seconds),
        };
    }
    let hours = minutes / 60;
    let minutes = minutes % 60;
    match minutes {
        0 => format!("{}h", hours),
        _ => format!("{}h {}m", hours, minutes),
    }
}
