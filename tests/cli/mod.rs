//! CLI Integration Test Modules
//!
//! Organized CLI integration tests split into focused modules for better maintainability.

pub mod argument_parsing;
pub mod toml_config;
