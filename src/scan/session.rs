//! Isolation Scan Session
//!
//! The stateful core of the crate. One session owns the frozen component
//! list and drives the machine
//!
//! ```text
//! IDLE -> SNAPSHOTTING -> PROBING(i) -> ANALYZING -> RESTORING -> DONE
//! ```
//!
//! with `ERRORED` absorbing unrecoverable collaborator failures at any step.
//! Probing is strictly sequential: the host's enabled-component set is
//! process-wide shared state, so component `i+1` is never touched before the
//! verdict on `i` is committed. The same methods double as the stateless
//! request/response surface an external caller can sequence one step at a
//! time.

use crate::registry::api::{ComponentInfo, ComponentRegistry, RegistryError};
use crate::scan::error::{ScanError, ScanResult};
use crate::scan::probe::{ProbeStrategy, PROBE_TIMEOUT};
use crate::scan::types::{
    Component, ComponentStatus, ProbeResult, RestoreOutcome, ScanReport, ScanState,
};
use crate::snapshot::api::SnapshotStore;
use crate::summary::api::{ConflictReport, Diagnosis, Summarizer};
use std::sync::Arc;
use std::time::Duration;

/// One isolation scan against a single host application.
pub struct ScanSession {
    registry: Arc<dyn ComponentRegistry>,
    store: Arc<dyn SnapshotStore>,
    summarizer: Summarizer,
    strategy: ProbeStrategy,
    /// Substring marking the scanner's own component and log lines
    self_identifier: String,
    probe_budget: Duration,
    state: ScanState,
    components: Vec<Component>,
    diagnosis: Option<Diagnosis>,
    failure: Option<String>,
}

impl ScanSession {
    pub fn new(
        registry: Arc<dyn ComponentRegistry>,
        store: Arc<dyn SnapshotStore>,
        summarizer: Summarizer,
        strategy: ProbeStrategy,
        self_identifier: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            store,
            summarizer,
            strategy,
            self_identifier: self_identifier.into(),
            probe_budget: PROBE_TIMEOUT,
            state: ScanState::Idle,
            components: Vec::new(),
            diagnosis: None,
            failure: None,
        }
    }

    /// Override the per-component probe budget.
    pub fn with_probe_budget(mut self, budget: Duration) -> Self {
        self.probe_budget = budget;
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        self.diagnosis.as_ref()
    }

    /// Current view of the session, valid in every state.
    pub fn report(&self) -> ScanReport {
        ScanReport {
            state: self.state.to_string(),
            components: self.components.clone(),
            diagnosis: self.diagnosis.clone(),
            failure: self.failure.clone(),
        }
    }

    fn is_self(&self, file: &str) -> bool {
        !self.self_identifier.is_empty() && file.contains(&self.self_identifier)
    }

    fn abort<T>(&mut self, error: ScanError) -> ScanResult<T> {
        log::error!("scan session failed: {}", error);
        self.state = ScanState::Errored;
        self.failure = Some(error.to_string());
        Err(error)
    }

    /// Enumerate enabled components the way a scan would probe them.
    ///
    /// Reads the registry fresh on every call and filters out the scanner's
    /// own component.
    pub async fn list_components(&self) -> ScanResult<Vec<Component>> {
        let infos = self
            .registry
            .list_components()
            .await
            .map_err(|error| ScanError::Registry {
                message: error.to_string(),
            })?;
        Ok(infos
            .into_iter()
            .filter(|info| info.enabled && !self.is_self(&info.file))
            .map(|info| Component::new(info.file, info.name))
            .collect())
    }

    /// Start a scan: snapshot the enabled set, disable everything except the
    /// scanner itself, and freeze the probe order.
    ///
    /// Rejected while a scan is mid-flight; only `Idle`, `Done`, and
    /// `Errored` accept a new pass. The registry is enumerated exactly once
    /// here, so later registry changes cannot reorder or resurrect entries.
    pub async fn start(&mut self) -> ScanResult<()> {
        match self.state {
            ScanState::Idle | ScanState::Done | ScanState::Errored => {}
            _ => {
                return Err(ScanError::Session {
                    message: format!("scan already in progress (state: {})", self.state),
                });
            }
        }

        self.state = ScanState::Snapshotting;
        self.components.clear();
        self.diagnosis = None;
        self.failure = None;

        let infos = match self.registry.list_components().await {
            Ok(infos) => infos,
            Err(error) => {
                return self.abort(ScanError::Registry {
                    message: error.to_string(),
                });
            }
        };
        let enabled: Vec<ComponentInfo> = infos.into_iter().filter(|info| info.enabled).collect();
        let enabled_files: Vec<String> = enabled.iter().map(|info| info.file.clone()).collect();

        // Write-once: a snapshot surviving from a crashed scan keeps the
        // true pre-scan state.
        match self.store.save(&enabled_files).await {
            Ok(true) => log::info!(
                "snapshot saved with {} enabled component(s)",
                enabled_files.len()
            ),
            Ok(false) => log::info!("reusing live snapshot from an earlier scan"),
            Err(error) => {
                return self.abort(ScanError::Snapshot {
                    message: error.to_string(),
                });
            }
        }

        let to_disable: Vec<String> = enabled_files
            .iter()
            .filter(|file| !self.is_self(file))
            .cloned()
            .collect();
        if !to_disable.is_empty() {
            match self.registry.disable(&to_disable).await {
                Ok(report) => {
                    for (file, reason) in &report.failed {
                        log::warn!("could not disable '{}': {}", file, reason);
                    }
                }
                Err(error) => {
                    return self.abort(ScanError::Registry {
                        message: error.to_string(),
                    });
                }
            }
        }

        let queued: Vec<Component> = enabled
            .into_iter()
            .filter(|info| !self.is_self(&info.file))
            .map(|info| Component::new(info.file, info.name))
            .collect();
        log::info!("scan started, {} component(s) queued", queued.len());
        self.components = queued;
        self.state = if self.components.is_empty() {
            ScanState::Analyzing
        } else {
            ScanState::Probing(0)
        };
        Ok(())
    }

    /// Probe the component at the machine's cursor.
    ///
    /// Returns `Ok(None)` once the probe loop is exhausted and the machine
    /// has moved to `Analyzing`. A conflict short-circuits the loop: once a
    /// fatal cause is found, probing the rest wastes time and risks
    /// cascading failures, so remaining components stay `Pending`.
    pub async fn probe_next(&mut self) -> ScanResult<Option<ProbeResult>> {
        let index = match self.state {
            ScanState::Probing(index) => index,
            _ => {
                return Err(ScanError::Session {
                    message: format!("probe requires a started scan (state: {})", self.state),
                });
            }
        };

        if index >= self.components.len() {
            self.state = ScanState::Analyzing;
            return Ok(None);
        }

        self.components[index].status = ComponentStatus::Scanning;
        let file = self.components[index].file.clone();
        log::info!(
            "probing '{}' ({}/{})",
            file,
            index + 1,
            self.components.len()
        );

        let result = self
            .strategy
            .probe(
                &file,
                self.registry.as_ref(),
                &self.self_identifier,
                self.probe_budget,
            )
            .await;

        if result.is_conflict() {
            self.components[index].status = ComponentStatus::Conflict;
            self.components[index].error = result.message.clone();
            self.state = ScanState::Analyzing;
        } else {
            self.components[index].status = ComponentStatus::Healthy;
            self.state = if index + 1 < self.components.len() {
                ScanState::Probing(index + 1)
            } else {
                ScanState::Analyzing
            };
        }
        Ok(Some(result))
    }

    /// Summarize the conflicts found so far into a [`Diagnosis`].
    ///
    /// Summarizer failures are absorbed into a deterministic fallback; this
    /// step can delay but never block the restore that follows.
    pub async fn analyze(&mut self) -> ScanResult<Diagnosis> {
        if self.state != ScanState::Analyzing {
            return Err(ScanError::Session {
                message: format!(
                    "analyze requires a finished probe loop (state: {})",
                    self.state
                ),
            });
        }
        let conflicts = self.conflicts();
        let diagnosis = self.summarizer.summarize(&conflicts).await;
        self.diagnosis = Some(diagnosis.clone());
        self.state = ScanState::Restoring;
        Ok(diagnosis)
    }

    /// Conflicting components in summarizer input shape.
    pub fn conflicts(&self) -> Vec<ConflictReport> {
        self.components
            .iter()
            .filter(|component| component.status == ComponentStatus::Conflict)
            .map(|component| {
                ConflictReport::new(
                    component.name.clone(),
                    component.error.clone().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Finish the session: re-enable the snapshot minus conflicting files
    /// and clear the snapshot.
    ///
    /// Also the abort path. An operator can call this mid-probe and still
    /// get back to the pre-scan state.
    pub async fn restore(&mut self) -> ScanResult<RestoreOutcome> {
        match self.state {
            ScanState::Probing(_) | ScanState::Analyzing | ScanState::Restoring => {}
            _ => {
                return Err(ScanError::Session {
                    message: format!("restore requires an active scan (state: {})", self.state),
                });
            }
        }

        let exclude: Vec<String> = self
            .components
            .iter()
            .filter(|component| component.status == ComponentStatus::Conflict)
            .map(|component| component.file.clone())
            .collect();

        match self.restore_excluding(&exclude).await {
            Ok(outcome) => {
                self.state = ScanState::Done;
                Ok(outcome)
            }
            Err(error) => self.abort(error),
        }
    }

    /// Re-enable everything in the snapshot except `exclude`, then clear
    /// the snapshot.
    ///
    /// Idempotent: with no live snapshot the call reports "nothing to
    /// restore" instead of raising, and re-enabling an already-enabled
    /// component is a registry-level no-op, so partial restores can simply
    /// be retried. Per-item enable failures are logged and skipped; only a
    /// whole-registry outage aborts, keeping the snapshot for a later
    /// attempt.
    pub async fn restore_excluding(&self, exclude: &[String]) -> ScanResult<RestoreOutcome> {
        let snapshot = self
            .store
            .load()
            .await
            .map_err(|error| ScanError::Snapshot {
                message: error.to_string(),
            })?;
        let Some(snapshot) = snapshot else {
            log::info!("restore requested but no snapshot is live");
            return Ok(RestoreOutcome::missing());
        };

        for file in &snapshot.enabled {
            if exclude.contains(file) {
                log::info!("leaving '{}' disabled", file);
                continue;
            }
            match self.registry.enable(file).await {
                Ok(()) => log::debug!("re-enabled '{}'", file),
                Err(RegistryError::Unavailable { message }) => {
                    return Err(ScanError::Registry { message });
                }
                Err(error) => {
                    log::warn!("could not re-enable '{}': {}", file, error);
                }
            }
        }

        self.store
            .clear()
            .await
            .map_err(|error| ScanError::Snapshot {
                message: error.to_string(),
            })?;
        log::info!("restore complete, snapshot cleared");
        Ok(RestoreOutcome::restored())
    }

    /// Probe a single component outside the machine loop.
    ///
    /// Backs the stepped workflow where an external caller sequences the
    /// scan itself; the machine's own loop funnels through the same
    /// strategy, so both paths share one verdict.
    pub async fn probe_file(&self, file: &str) -> ProbeResult {
        self.strategy
            .probe(
                file,
                self.registry.as_ref(),
                &self.self_identifier,
                self.probe_budget,
            )
            .await
    }

    /// Drive one full pass: start, probe until the loop exhausts or
    /// short-circuits, analyze, restore.
    pub async fn run(&mut self) -> ScanResult<ScanReport> {
        self.start().await?;
        while matches!(self.state, ScanState::Probing(_)) {
            self.probe_next().await?;
        }
        self.analyze().await?;
        let outcome = self.restore().await?;
        log::info!("scan finished: {}", outcome.message);
        Ok(self.report())
    }
}
