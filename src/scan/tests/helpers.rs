//! Shared test doubles for the scan test suite
//!
//! The session and probe tests script collaborator behaviour through these
//! in-memory implementations instead of touching a live host application.

use crate::registry::api::{
    ComponentInfo, ComponentRegistry, DisableReport, RegistryError, RegistryResult,
};
use crate::snapshot::api::{Snapshot, SnapshotResult, SnapshotStore, DEFAULT_SNAPSHOT_TTL};
use crate::summary::api::{CompletionRequest, SummaryError, SummaryResult, TextCompletion};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scriptable in-memory component registry.
///
/// Components are declared up front. `enable` can be scripted per file to
/// fail, to stall, or to append a line to a log file the way a component
/// that crashes the host during load would.
pub struct MockRegistry {
    components: Mutex<Vec<ComponentInfo>>,
    fail_enable: Mutex<HashMap<String, String>>,
    crash_log: Mutex<HashMap<String, (PathBuf, String)>>,
    enable_delay: Mutex<Option<Duration>>,
    unavailable: AtomicBool,
    enable_calls: Mutex<Vec<String>>,
    disable_calls: Mutex<Vec<Vec<String>>>,
}

impl MockRegistry {
    /// All declared components start enabled.
    pub fn new(files: &[(&str, &str)]) -> Self {
        let components = files
            .iter()
            .map(|(file, name)| ComponentInfo::new(*file, Some(name.to_string()), true))
            .collect();
        Self {
            components: Mutex::new(components),
            fail_enable: Mutex::new(HashMap::new()),
            crash_log: Mutex::new(HashMap::new()),
            enable_delay: Mutex::new(None),
            unavailable: AtomicBool::new(false),
            enable_calls: Mutex::new(Vec::new()),
            disable_calls: Mutex::new(Vec::new()),
        }
    }

    /// Script `enable(file)` to fail with the given adapter message.
    pub fn with_enable_failure(self, file: &str, message: &str) -> Self {
        self.fail_enable
            .lock()
            .unwrap()
            .insert(file.to_string(), message.to_string());
        self
    }

    /// Script `enable(file)` to append `line` to `log` before succeeding.
    pub fn with_crash_on_enable(self, file: &str, log: &Path, line: &str) -> Self {
        self.crash_log
            .lock()
            .unwrap()
            .insert(file.to_string(), (log.to_path_buf(), line.to_string()));
        self
    }

    /// Script every `enable` call to stall for `delay` first.
    pub fn with_enable_delay(self, delay: Duration) -> Self {
        *self.enable_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    pub fn add_component(&self, file: &str, name: &str, enabled: bool) {
        self.components.lock().unwrap().push(ComponentInfo::new(
            file,
            Some(name.to_string()),
            enabled,
        ));
    }

    pub fn enabled_files(&self) -> Vec<String> {
        self.components
            .lock()
            .unwrap()
            .iter()
            .filter(|component| component.enabled)
            .map(|component| component.file.clone())
            .collect()
    }

    pub fn enable_calls(&self) -> Vec<String> {
        self.enable_calls.lock().unwrap().clone()
    }

    pub fn disable_calls(&self) -> Vec<Vec<String>> {
        self.disable_calls.lock().unwrap().clone()
    }

    fn check_available(&self) -> RegistryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable {
                message: "registry offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ComponentRegistry for MockRegistry {
    async fn list_components(&self) -> RegistryResult<Vec<ComponentInfo>> {
        self.check_available()?;
        Ok(self.components.lock().unwrap().clone())
    }

    async fn enable(&self, file: &str) -> RegistryResult<()> {
        self.check_available()?;
        self.enable_calls.lock().unwrap().push(file.to_string());

        let delay = *self.enable_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_enable.lock().unwrap().get(file) {
            return Err(RegistryError::EnableFailed {
                file: file.to_string(),
                message: message.clone(),
            });
        }

        let crash = self.crash_log.lock().unwrap().get(file).cloned();
        if let Some((log, line)) = crash {
            let mut contents = std::fs::read_to_string(&log).unwrap_or_default();
            contents.push_str(&line);
            contents.push('\n');
            std::fs::write(&log, contents).unwrap();
        }

        let mut components = self.components.lock().unwrap();
        match components.iter_mut().find(|component| component.file == file) {
            Some(component) => {
                component.enabled = true;
                Ok(())
            }
            None => Err(RegistryError::NotFound {
                file: file.to_string(),
            }),
        }
    }

    async fn disable(&self, files: &[String]) -> RegistryResult<DisableReport> {
        self.check_available()?;
        self.disable_calls.lock().unwrap().push(files.to_vec());

        let mut report = DisableReport::default();
        let mut components = self.components.lock().unwrap();
        for file in files {
            if let Some(component) = components
                .iter_mut()
                .find(|component| &component.file == file)
            {
                if component.enabled {
                    component.enabled = false;
                    report.disabled.push(file.clone());
                }
            }
        }
        Ok(report)
    }
}

/// In-memory snapshot store honouring the write-once rule.
#[derive(Default)]
pub struct MockStore {
    slot: Mutex<Option<Snapshot>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a snapshot as if a previous scan had already saved one.
    pub fn with_snapshot(self, enabled: &[&str]) -> Self {
        let enabled = enabled.iter().map(|s| s.to_string()).collect();
        *self.slot.lock().unwrap() = Some(Snapshot::new(enabled, DEFAULT_SNAPSHOT_TTL));
        self
    }

    pub fn stored_enabled(&self) -> Option<Vec<String>> {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .map(|snapshot| snapshot.enabled.clone())
    }
}

#[async_trait]
impl SnapshotStore for MockStore {
    async fn save(&self, enabled: &[String]) -> SnapshotResult<bool> {
        let mut slot = self.slot.lock().unwrap();
        if let Some(existing) = slot.as_ref() {
            if !existing.is_expired() {
                return Ok(false);
            }
        }
        *slot = Some(Snapshot::new(enabled.to_vec(), DEFAULT_SNAPSHOT_TTL));
        Ok(true)
    }

    async fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        let slot = self.slot.lock().unwrap();
        match slot.as_ref() {
            Some(snapshot) if !snapshot.is_expired() => Ok(Some(snapshot.clone())),
            _ => Ok(None),
        }
    }

    async fn clear(&self) -> SnapshotResult<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Canned text-completion provider with a call counter.
pub struct StaticCompletion {
    content: Option<String>,
    calls: AtomicUsize,
}

impl StaticCompletion {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            content: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for StaticCompletion {
    async fn complete(&self, _request: CompletionRequest) -> SummaryResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => Err(SummaryError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

/// Write a log file with one line per entry, returning its path.
pub fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = lines.join("\n");
    if !lines.is_empty() {
        contents.push('\n');
    }
    std::fs::write(&path, contents).unwrap();
    path
}
