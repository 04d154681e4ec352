//! Test modules for the isolation scan system
//!
//! Organizes the session and type test suites plus the shared in-memory
//! collaborator doubles they script against.

pub mod helpers;
