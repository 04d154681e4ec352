//! Filesystem-backed component registry
//!
//! Treats a directory tree as the host's component catalogue: every file in
//! the root (or one subdirectory deep) carrying a `Component Name:` header
//! comment is a component. The slug is the path relative to the root
//! (`dir/file` or `file`). The enabled set persists in a JSON state file
//! inside the root, so state survives process restarts the way a host
//! options table would.

use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::traits::ComponentRegistry;
use crate::registry::types::{ComponentInfo, DisableReport};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::io::AsyncReadExt;

/// State file holding the enabled slugs, kept inside the components root
const STATE_FILE: &str = ".enabled.json";

/// Header bytes scanned per candidate file
const HEADER_SCAN_LIMIT: u64 = 8192;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)component name:[ \t]*(.*)").expect("header pattern is a valid regex")
});

pub struct FsComponentRegistry {
    root: PathBuf,
    state_path: PathBuf,
}

impl FsComponentRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let state_path = root.join(STATE_FILE);
        Self { root, state_path }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_enabled(&self) -> RegistryResult<Vec<String>> {
        match tokio::fs::read_to_string(&self.state_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| RegistryError::Io {
                message: format!("invalid enabled-state file: {}", e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_enabled(&self, enabled: &[String]) -> RegistryResult<()> {
        let json = serde_json::to_string_pretty(enabled).map_err(|e| RegistryError::Io {
            message: format!("failed to serialise enabled state: {}", e),
        })?;
        tokio::fs::write(&self.state_path, json).await?;
        Ok(())
    }

    /// Scan the first bytes of a file for the component header.
    ///
    /// Outer `None` means the file carries no header (not a component); the
    /// inner `Option` is `None` for a header with an empty value.
    async fn read_component_header(path: &Path) -> Option<Option<String>> {
        let file = tokio::fs::File::open(path).await.ok()?;
        let mut buf = Vec::with_capacity(HEADER_SCAN_LIMIT as usize);
        file.take(HEADER_SCAN_LIMIT)
            .read_to_end(&mut buf)
            .await
            .ok()?;
        let text = String::from_utf8_lossy(&buf);
        for line in text.lines() {
            if let Some(caps) = HEADER_RE.captures(line) {
                let raw = caps[1].trim().trim_end_matches("*/").trim();
                if raw.is_empty() {
                    return Some(None);
                }
                return Some(Some(raw.to_string()));
            }
        }
        None
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }

    /// Enumerate component candidates: top-level files and files one
    /// subdirectory deep, keeping only those with a component header.
    async fn discover(&self) -> RegistryResult<Vec<(String, Option<String>)>> {
        let mut found = Vec::new();

        let mut root_entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            RegistryError::Unavailable {
                message: format!("cannot read components root {}: {}", self.root.display(), e),
            }
        })?;

        while let Some(entry) = root_entries.next_entry().await? {
            let entry_name = entry.file_name().to_string_lossy().to_string();
            if Self::is_hidden(&entry_name) {
                continue;
            }
            let path = entry.path();
            let file_type = entry.file_type().await?;

            if file_type.is_file() {
                if let Some(name) = Self::read_component_header(&path).await {
                    found.push((entry_name, name));
                }
            } else if file_type.is_dir() {
                let mut sub_entries = tokio::fs::read_dir(&path).await?;
                while let Some(sub) = sub_entries.next_entry().await? {
                    let sub_name = sub.file_name().to_string_lossy().to_string();
                    if Self::is_hidden(&sub_name) {
                        continue;
                    }
                    if !sub.file_type().await?.is_file() {
                        continue;
                    }
                    if let Some(name) = Self::read_component_header(&sub.path()).await {
                        found.push((format!("{}/{}", entry_name, sub_name), name));
                    }
                }
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    fn validate_slug(file: &str) -> RegistryResult<()> {
        if file.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(RegistryError::NotFound {
                file: file.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ComponentRegistry for FsComponentRegistry {
    async fn list_components(&self) -> RegistryResult<Vec<ComponentInfo>> {
        let discovered = self.discover().await?;
        let enabled = self.read_enabled().await?;

        let components = discovered
            .into_iter()
            .map(|(file, name)| {
                let is_enabled = enabled.iter().any(|f| f == &file);
                ComponentInfo::new(file, name, is_enabled)
            })
            .collect();
        Ok(components)
    }

    async fn enable(&self, file: &str) -> RegistryResult<()> {
        Self::validate_slug(file)?;
        let path = self.root.join(file);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(RegistryError::EnableFailed {
                file: file.to_string(),
                message: "component file does not exist".to_string(),
            });
        }

        let mut enabled = self.read_enabled().await?;
        if enabled.iter().any(|f| f == file) {
            // Re-enabling an enabled component is a no-op
            return Ok(());
        }
        enabled.push(file.to_string());
        enabled.sort();
        self.write_enabled(&enabled).await
    }

    async fn disable(&self, files: &[String]) -> RegistryResult<DisableReport> {
        let mut enabled = self.read_enabled().await?;
        let mut report = DisableReport::default();

        for file in files {
            let before = enabled.len();
            enabled.retain(|f| f != file);
            if enabled.len() < before {
                report.disabled.push(file.clone());
            } else {
                log::debug!("disable: '{}' was not enabled, skipping", file);
            }
        }

        self.write_enabled(&enabled).await?;
        Ok(report)
    }
}
