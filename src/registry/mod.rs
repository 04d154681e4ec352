//! Component Registry
//!
//! Boundary between the scanner and the host application's process-wide
//! enabled-component set. The [`traits::ComponentRegistry`] trait is the
//! collaborator interface; [`fs::FsComponentRegistry`] is the bundled
//! directory-backed implementation used by the CLI.

pub mod api;
pub mod error;
pub mod fs;
pub mod traits;
pub mod types;
