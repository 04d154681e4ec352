//! Bounded tail reads over a growing log file
//!
//! The probe workflow samples the host's error log twice per component
//! (baseline and post-probe) and diffs the two samples. Logs can be hundreds
//! of megabytes, so every read is capped by a byte budget taken from the end
//! of the file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Line and byte budgets for one tail read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailLimits {
    pub max_lines: usize,
    pub max_bytes: u64,
}

impl TailLimits {
    /// Budget for the pre-probe baseline sample.
    pub const BASELINE: TailLimits = TailLimits {
        max_lines: 50,
        max_bytes: 50_000,
    };

    /// Budget for the post-probe sample. Wider than the baseline so freshly
    /// appended fatal output is not pushed out of the window.
    pub const POST_PROBE: TailLimits = TailLimits {
        max_lines: 80,
        max_bytes: 80_000,
    };

    pub fn tail(&self, path: &Path) -> Vec<String> {
        tail(path, self.max_lines, self.max_bytes)
    }
}

/// Read at most `max_lines` trailing lines from `path`, touching at most
/// `max_bytes` bytes at the end of the file.
///
/// Returns lines most-recent-last. A missing, unreadable or empty file
/// yields an empty vector; this function never errors. When the byte budget
/// cuts into the middle of a line, the partial line is kept as-is (callers
/// diff line sets, so a stable partial prefix is harmless).
pub fn tail(path: &Path, max_lines: usize, max_bytes: u64) -> Vec<String> {
    if max_lines == 0 || max_bytes == 0 {
        return Vec::new();
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };

    let size = match file.metadata() {
        Ok(meta) => meta.len(),
        Err(_) => return Vec::new(),
    };
    if size == 0 {
        return Vec::new();
    }

    let chunk = size.min(max_bytes);
    if file.seek(SeekFrom::End(-(chunk as i64))).is_err() {
        return Vec::new();
    }

    let mut buf = Vec::with_capacity(chunk as usize);
    if file.take(chunk).read_to_end(&mut buf).is_err() {
        return Vec::new();
    }

    let text = String::from_utf8_lossy(&buf);
    let trimmed = text.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return Vec::new();
    }

    let lines: Vec<String> = trimmed
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    let skip = lines.len().saturating_sub(max_lines);
    lines.into_iter().skip(skip).collect()
}
