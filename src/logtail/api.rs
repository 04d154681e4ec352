//! Public API for the log tail module
//!
//! External modules should import from here rather than directly from
//! internal modules, following the same api-module pattern used across the
//! application.

pub use crate::logtail::reader::{tail, TailLimits};
pub use crate::logtail::sanitize::{redact, sanitize_lines};
