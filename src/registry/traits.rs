//! Component Registry trait
//!
//! The host application owns the process-wide set of enabled components; the
//! scanner only ever touches it through this boundary. Implementations wrap
//! whatever the host offers (an options table, a config file, an RPC surface)
//! and normalise its loosely typed responses into [`ComponentInfo`].

use crate::registry::error::RegistryResult;
use crate::registry::types::{ComponentInfo, DisableReport};
use async_trait::async_trait;

#[async_trait]
pub trait ComponentRegistry: Send + Sync {
    /// Enumerate installed components with their enabled state.
    ///
    /// Order is meaningful: the scan freezes this order at start time and
    /// probes in it.
    async fn list_components(&self) -> RegistryResult<Vec<ComponentInfo>>;

    /// Enable a single component.
    ///
    /// A host may fail synchronously here when the component is broken at
    /// load time; callers treat that error as a conflict signal, not as an
    /// unrecoverable failure.
    async fn enable(&self, file: &str) -> RegistryResult<()>;

    /// Disable a set of components. Not atomic; per-item failures are
    /// reported in the returned [`DisableReport`].
    async fn disable(&self, files: &[String]) -> RegistryResult<DisableReport>;
}
