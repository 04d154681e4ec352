//! Common test utilities and helpers
//!
//! This module provides shared functionality for tests including
//! fixtures, test data, and helper functions.

pub mod fixtures;
