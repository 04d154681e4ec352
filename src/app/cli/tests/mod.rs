//! Tests for the CLI module
//!
//! This module contains all tests for CLI argument parsing, configuration
//! loading and display formatting, extracted from individual modules for
//! better organization.
