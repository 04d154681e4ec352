//! Log line sanitisation
//!
//! Error logs routinely echo configuration fragments. Before any tailed line
//! leaves the process (scan reports, summarizer prompts) secret-looking
//! `key=value` pairs are masked.

use regex::Regex;
use std::sync::LazyLock;

static SECRET_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    // Keys ordered longest-first so `api_key` wins over `key`
    Regex::new(r#"(?i)\b(api_key|password|passwd|secret|token|pass|key)\b\s*[=:]\s*['"]?[^\s'",;]+['"]?"#)
        .expect("secret pattern is a valid regex")
});

/// Mask secret-looking `key=value` assignments in a single line.
pub fn redact(line: &str) -> String {
    SECRET_PAIR.replace_all(line, "$1=[redacted]").into_owned()
}

/// Mask secrets across a batch of tailed lines.
pub fn sanitize_lines(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| redact(line)).collect()
}
