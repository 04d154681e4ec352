//! Public API for the registry module
//!
//! This module provides the public interface for component registry
//! functionality, following the same pattern as the other api modules to
//! maintain consistent architecture across the application.

pub use crate::registry::error::{RegistryError, RegistryResult};
pub use crate::registry::fs::FsComponentRegistry;
pub use crate::registry::traits::ComponentRegistry;
pub use crate::registry::types::{ComponentInfo, DisableReport};
