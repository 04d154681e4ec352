//! Shared fixtures for the integration suites
//!
//! Filesystem component trees backed by the real registry, plus a scripted
//! text-completion provider with a call counter.

use async_trait::async_trait;
use rescuescan::registry::api::{ComponentRegistry, FsComponentRegistry};
use rescuescan::summary::api::{CompletionRequest, SummaryError, SummaryResult, TextCompletion};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a component tree under a fresh temp dir and enable every entry.
///
/// Each `(file, name)` pair becomes a file carrying a component header;
/// slugs with a directory part get their directory created.
pub async fn enabled_component_tree(
    components: &[(&str, &str)],
) -> (TempDir, Arc<FsComponentRegistry>) {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    for (file, name) in components {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            if parent != root {
                tokio::fs::create_dir_all(parent)
                    .await
                    .expect("component dir");
            }
        }
        tokio::fs::write(&path, format!("<?php // Component Name: {}\n", name))
            .await
            .expect("component file");
    }

    let registry = Arc::new(FsComponentRegistry::new(root));
    for (file, _) in components {
        registry.enable(file).await.expect("enable component");
    }
    (dir, registry)
}

/// Files currently enabled in the registry, sorted.
pub async fn enabled_files(registry: &FsComponentRegistry) -> Vec<String> {
    let mut files: Vec<String> = registry
        .list_components()
        .await
        .expect("list components")
        .into_iter()
        .filter(|c| c.enabled)
        .map(|c| c.file)
        .collect();
    files.sort();
    files
}

const DIAGNOSIS_JSON: &str = r#"{"summary":"One component fails on load.","recommendation":"Keep it disabled.","technical_details":"Fatal error captured by the probe.","severity":"high"}"#;

/// Scripted completion provider counting calls.
pub struct ScriptedCompletion {
    response: Option<&'static str>,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    /// Always returns a well-formed diagnosis JSON object (severity high).
    pub fn diagnosing() -> Arc<Self> {
        Arc::new(Self {
            response: Some(DIAGNOSIS_JSON),
            calls: AtomicUsize::new(0),
        })
    }

    /// Always fails with an API error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, _request: CompletionRequest) -> SummaryResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.response {
            Some(content) => Ok(content.to_string()),
            None => Err(SummaryError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
