//! Probe Strategies
//!
//! Two interchangeable ways to test whether a single component breaks the
//! host, selected per session:
//!
//! - **Physical**: really enable the component through the registry, diff the
//!   error log around the call, then disable it again before reporting.
//! - **Virtual**: issue one side-channel request that forces only the
//!   candidate component active for that round trip and read back the
//!   response status. Host state is never touched.
//!
//! Every failure mode folds into a [`ProbeResult`]; a probe never raises.

use crate::logtail::api::{sanitize_lines, TailLimits};
use crate::registry::api::ComponentRegistry;
use crate::scan::classifier::classify;
use crate::scan::error::{ScanError, ScanResult};
use crate::scan::types::{ProbeResult, ScanMode};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-component time budget; exceeding it is reported as a conflict
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(20);

/// Header naming the component a virtual probe forces on for one request
pub const PROBE_HEADER: &str = "X-Rescue-Probe";

/// Conflict message for a probe that exhausted its time budget
pub const TIMEOUT_MESSAGE: &str = "Component caused a timeout (possible infinite loop or hang).";

/// Probing mode for one scan session
#[derive(Debug, Clone)]
pub enum ProbeStrategy {
    /// Toggle real host state, watching the error log at `log_path`
    Physical { log_path: Option<PathBuf> },
    /// One forced-view HTTP round trip per component against `probe_url`
    Virtual {
        probe_url: String,
        client: reqwest::Client,
    },
}

impl ProbeStrategy {
    pub fn physical(log_path: Option<PathBuf>) -> Self {
        ProbeStrategy::Physical { log_path }
    }

    /// Build the virtual strategy with its own HTTP client.
    pub fn side_channel(probe_url: impl Into<String>) -> ScanResult<Self> {
        let probe_url = probe_url.into();
        if probe_url.is_empty() {
            return Err(ScanError::Configuration {
                message: "virtual mode needs a probe URL (--probe-url or the config file)"
                    .to_string(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| ScanError::Configuration {
                message: format!("failed to build probe HTTP client: {}", e),
            })?;
        Ok(ProbeStrategy::Virtual { probe_url, client })
    }

    pub fn mode(&self) -> ScanMode {
        match self {
            ProbeStrategy::Physical { .. } => ScanMode::Physical,
            ProbeStrategy::Virtual { .. } => ScanMode::Virtual,
        }
    }

    /// Probe one component within `budget`.
    ///
    /// A timed-out physical attempt may have enabled the component without
    /// reaching its own cleanup, so the component is disabled again before
    /// the timeout conflict is reported.
    pub async fn probe(
        &self,
        file: &str,
        registry: &dyn ComponentRegistry,
        self_identifier: &str,
        budget: Duration,
    ) -> ProbeResult {
        let attempt = self.probe_inner(file, registry, self_identifier);
        match tokio::time::timeout(budget, attempt).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "probe of '{}' exceeded its {}s budget",
                    file,
                    budget.as_secs()
                );
                if matches!(self, ProbeStrategy::Physical { .. }) {
                    if let Err(error) = registry.disable(&[file.to_string()]).await {
                        log::warn!("failed to disable '{}' after timed-out probe: {}", file, error);
                    }
                }
                ProbeResult::conflict(TIMEOUT_MESSAGE)
            }
        }
    }

    async fn probe_inner(
        &self,
        file: &str,
        registry: &dyn ComponentRegistry,
        self_identifier: &str,
    ) -> ProbeResult {
        match self {
            ProbeStrategy::Physical { log_path } => {
                probe_physical(log_path.as_deref(), file, registry, self_identifier).await
            }
            ProbeStrategy::Virtual { probe_url, client } => {
                probe_virtual(probe_url, client, file).await
            }
        }
    }
}

async fn probe_physical(
    log_path: Option<&Path>,
    file: &str,
    registry: &dyn ComponentRegistry,
    self_identifier: &str,
) -> ProbeResult {
    let baseline = match log_path {
        Some(path) => TailLimits::BASELINE.tail(path),
        None => Vec::new(),
    };

    if let Err(error) = registry.enable(file).await {
        // A load-time failure is itself the conflict signal.
        log::debug!("enable of '{}' failed: {}", file, error);
        return ProbeResult::conflict(error.to_string());
    }

    let after = match log_path {
        Some(path) => TailLimits::POST_PROBE.tail(path),
        None => Vec::new(),
    };
    let new_lines: Vec<String> = after
        .iter()
        .filter(|line| !baseline.contains(line))
        .cloned()
        .collect();
    // Redact secrets now; these lines can end up in reports and prompts.
    let new_lines = sanitize_lines(&new_lines);
    let verdict = classify(&new_lines, self_identifier);

    // The host must be back in its all-disabled state before the scanner
    // decides whether to continue.
    if let Err(error) = registry.disable(&[file.to_string()]).await {
        log::warn!("failed to disable '{}' after probe: {}", file, error);
    }

    if verdict.fatal {
        ProbeResult::conflict(verdict.messages.join("\n"))
    } else {
        ProbeResult::healthy()
    }
}

async fn probe_virtual(probe_url: &str, client: &reqwest::Client, file: &str) -> ProbeResult {
    let response = client.get(probe_url).header(PROBE_HEADER, file).send().await;
    match response {
        Ok(response) => {
            let status = response.status();
            log::debug!("virtual probe of '{}' returned HTTP {}", file, status);
            if status.is_server_error() {
                ProbeResult::conflict(format!(
                    "Request returned HTTP {} with only this component forced on.",
                    status.as_u16()
                ))
            } else {
                ProbeResult::healthy()
            }
        }
        Err(error) if error.is_timeout() => ProbeResult::conflict(TIMEOUT_MESSAGE),
        Err(error) => ProbeResult::conflict(format!("Probe request failed: {}", error)),
    }
}
