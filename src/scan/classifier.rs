//! Error Classifier
//!
//! Decides whether a batch of freshly appeared log lines indicates a fatal
//! failure, and turns each fatal line into a short human-readable message.
//! Pure functions, no I/O, so the heuristics stay testable in isolation.

use regex::Regex;
use std::sync::LazyLock;

/// Severity markers that flag a log line as fatal, matched case-insensitively.
///
/// Policy constant. The substring heuristic can both over- and under-detect
/// (a logged sample string containing "fatal error" still trips it), so keep
/// the list here rather than scattering matches through the probe code.
pub const FATAL_MARKERS: [&str; 4] = [
    "fatal error",
    "parse error",
    "uncaught error",
    "syntax error",
];

/// Longest message kept before truncation with an ellipsis
const MAX_MESSAGE_LEN: usize = 150;

/// Log lines mentioning component paths, `wp-content/plugins/<slug>/` style
static PATH_SUSPECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wp-content/plugins/([^/]+)/").expect("suspect path pattern is a valid regex")
});

/// Log lines naming a component outright, `Plugin: <slug>` style
static NAMED_SUSPECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Plugin:\s*([a-z0-9\-_]+)").expect("suspect name pattern is a valid regex")
});

/// Verdict for a batch of new log lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// At least one line matched a fatal marker
    pub fatal: bool,
    /// Shortened message per fatal line, in log order
    pub messages: Vec<String>,
}

impl Classification {
    fn clean() -> Self {
        Self {
            fatal: false,
            messages: Vec::new(),
        }
    }
}

/// Classify a batch of new log lines.
///
/// Lines containing `self_identifier` are skipped entirely so the scanner's
/// own log output can never be attributed to a probed component. An empty
/// identifier matches nothing.
pub fn classify(new_lines: &[String], self_identifier: &str) -> Classification {
    let mut messages = Vec::new();
    for line in new_lines {
        if !self_identifier.is_empty() && line.contains(self_identifier) {
            continue;
        }
        if let Some((position, length)) = find_marker(line) {
            messages.push(shorten(line, position, length));
        }
    }
    if messages.is_empty() {
        Classification::clean()
    } else {
        Classification {
            fatal: true,
            messages,
        }
    }
}

/// Scan recent log lines for component slugs implicated by stack traces.
///
/// Returns each slug once, in first-seen order. Complements the classifier:
/// `classify` answers "did this probe break anything", this answers "who does
/// the existing log already point at" before any probing starts.
pub fn detect_suspects(lines: &[String]) -> Vec<String> {
    let mut suspects: Vec<String> = Vec::new();
    for line in lines {
        let slug = PATH_SUSPECT
            .captures(line)
            .or_else(|| NAMED_SUSPECT.captures(line))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string());
        if let Some(slug) = slug {
            if !suspects.contains(&slug) {
                suspects.push(slug);
            }
        }
    }
    suspects
}

/// Find the earliest fatal marker in a line, case-insensitively.
///
/// Returns the byte position and marker length. Matching is done on byte
/// windows with `eq_ignore_ascii_case` so multi-byte characters elsewhere in
/// the line cannot skew offsets.
fn find_marker(line: &str) -> Option<(usize, usize)> {
    for (index, _) in line.char_indices() {
        for marker in FATAL_MARKERS {
            let window = line.get(index..index + marker.len());
            if window.is_some_and(|text| text.eq_ignore_ascii_case(marker)) {
                return Some((index, marker.len()));
            }
        }
    }
    None
}

/// Shorten a fatal log line to its human-readable core.
///
/// `"PHP Fatal error: foo in bar.php on line 3"` becomes `"foo"`. When no
/// ` in ` location delimiter follows the marker, the full line is kept minus
/// any leading `[timestamp]` bracket, truncated to `MAX_MESSAGE_LEN`.
fn shorten(line: &str, marker_position: usize, marker_length: usize) -> String {
    let after = line[marker_position + marker_length..]
        .trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    if let Some(cut) = after.find(" in ") {
        let head = after[..cut].trim();
        if !head.is_empty() {
            return head.to_string();
        }
    }

    let mut text = line.trim();
    if text.starts_with('[') {
        if let Some(end) = text.find(']') {
            text = text[end + 1..].trim_start();
        }
    }
    truncate_message(text)
}

fn truncate_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_LEN {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_MESSAGE_LEN).collect();
    format!("{}...", head.trim_end())
}
