//! Log Tail Component
//!
//! Bounded reading of the trailing portion of a growing log file, plus
//! sanitisation helpers for lines that leave the process (reports, prompts).
//!
//! ## Core Features
//!
//! - **Byte-budgeted tail**: never reads more than a fixed number of bytes
//!   from the end of the file, regardless of file size
//! - **Non-failing**: missing, unreadable or empty files yield an empty
//!   result rather than an error
//! - **Secret redaction**: `key=value` pairs with secret-looking keys are
//!   masked before lines are surfaced anywhere

pub mod api;
pub mod reader;
pub mod sanitize;
