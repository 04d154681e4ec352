//! Snapshot persistence
//!
//! The snapshot is the one piece of cross-call shared state in a scan: it is
//! what makes `restore()` possible after a crash, an operator abort or a
//! process restart. It is stored as a single record, written once, and
//! cleared only by a successful restore.

use crate::snapshot::error::{SnapshotError, SnapshotResult};
use crate::snapshot::types::Snapshot;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist the enabled set unless a live (non-expired) snapshot already
    /// exists. Returns `true` when a new record was written, `false` when an
    /// existing live record was kept.
    ///
    /// Never overwriting protects the true pre-crash state when a previous
    /// scan died mid-flight.
    async fn save(&self, enabled: &[String]) -> SnapshotResult<bool>;

    /// Load the current snapshot; `None` when missing or expired.
    async fn load(&self) -> SnapshotResult<Option<Snapshot>>;

    /// Delete the stored snapshot. Absence is not an error.
    async fn clear(&self) -> SnapshotResult<()>;
}

/// File-backed store keeping the snapshot as one JSON record.
pub struct FileSnapshotStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    async fn read_record(&self) -> SnapshotResult<Option<Snapshot>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let snapshot =
                    serde_json::from_str(&content).map_err(|e| SnapshotError::Malformed {
                        message: e.to_string(),
                    })?;
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_record(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| SnapshotError::Io {
            message: format!("failed to serialise snapshot: {}", e),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write-then-rename keeps the record a single atomic unit
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, enabled: &[String]) -> SnapshotResult<bool> {
        if let Some(existing) = self.load().await? {
            log::debug!(
                "Keeping live snapshot ({} components, {}s old)",
                existing.enabled.len(),
                existing.age().as_secs()
            );
            return Ok(false);
        }

        let snapshot = Snapshot::new(enabled.to_vec(), self.ttl);
        self.write_record(&snapshot).await?;
        log::info!("Saved snapshot of {} enabled components", enabled.len());
        Ok(true)
    }

    async fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        match self.read_record().await {
            Ok(Some(snapshot)) if snapshot.is_expired() => {
                log::debug!(
                    "Discarding expired snapshot ({}s old, ttl {}s)",
                    snapshot.age().as_secs(),
                    snapshot.ttl.as_secs()
                );
                let _ = tokio::fs::remove_file(&self.path).await;
                Ok(None)
            }
            Ok(other) => Ok(other),
            // A corrupt record must not wedge the workflow; treat as absent
            Err(SnapshotError::Malformed { message }) => {
                log::warn!("Ignoring malformed snapshot record: {}", message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn clear(&self) -> SnapshotResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::types::DEFAULT_SNAPSHOT_TTL;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, ttl: Duration) -> FileSnapshotStore {
        FileSnapshotStore::new(dir.path().join("snapshot.json"), ttl)
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, DEFAULT_SNAPSHOT_TTL);

        let written = store
            .save(&["a/a.php".to_string(), "b/b.php".to_string()])
            .await
            .unwrap();
        assert!(written);

        let snapshot = store.load().await.unwrap().expect("snapshot present");
        assert_eq!(
            snapshot.enabled,
            vec!["a/a.php".to_string(), "b/b.php".to_string()]
        );
        assert!(!snapshot.is_expired());
    }

    #[tokio::test]
    async fn test_save_is_write_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, DEFAULT_SNAPSHOT_TTL);

        assert!(store.save(&["a/a.php".to_string()]).await.unwrap());
        // Second save with a different set must keep the original record
        assert!(!store.save(&["z/z.php".to_string()]).await.unwrap());

        let snapshot = store.load().await.unwrap().unwrap();
        assert_eq!(snapshot.enabled, vec!["a/a.php".to_string()]);
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, DEFAULT_SNAPSHOT_TTL);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        let store = FileSnapshotStore::new(&path, Duration::from_secs(60));

        let mut snapshot = Snapshot::new(vec!["a/a.php".to_string()], Duration::from_secs(60));
        snapshot.created_at = std::time::SystemTime::now() - Duration::from_secs(3600);
        let json = serde_json::to_string(&snapshot).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        assert!(store.load().await.unwrap().is_none());
        // Expired record is cleaned up, so a new save succeeds
        assert!(store.save(&["b/b.php".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, DEFAULT_SNAPSHOT_TTL);

        store.save(&["a/a.php".to_string()]).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_record_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let store = FileSnapshotStore::new(&path, DEFAULT_SNAPSHOT_TTL);
        assert!(store.load().await.unwrap().is_none());
    }
}
