//! Timestamp-blind change detection against the stored snapshot.

use crate::errors::{from_core, io_error, Result};
use crate::layout::StoreLayout;
use roapid_core::document::{compare, CompareMode};
use roapid_core::{ResourceKey, StoreConfig};
use std::fs;
use std::io;

/// Why the detector reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeBasis {
    /// No snapshot stored yet for the key
    FirstSeen,
    /// Stored snapshot existed and was compared
    Compared(CompareMode),
}

/// Result of a change check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeReport {
    pub changed: bool,
    pub basis: ChangeBasis,
}

/// Compares fresh payloads with persisted snapshots
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    layout: StoreLayout,
}

impl ChangeDetector {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            layout: StoreLayout::from_config(config),
        }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Whether persisting `payload` under `key` would be a semantic change.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Io` if the stored snapshot exists but cannot be
    /// read. Unparseable documents are never an error.
    pub fn has_changed(&self, key: &ResourceKey, payload: &[u8]) -> Result<bool> {
        Ok(self.check(key, payload)?.changed)
    }

    /// Like [`has_changed`](Self::has_changed), also reporting which path
    /// the comparison took.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Io` if the stored snapshot exists but cannot be
    /// read.
    pub fn check(&self, key: &ResourceKey, payload: &[u8]) -> Result<ChangeReport> {
        let path = self.layout.snapshot_path(key);

        let stored = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    resource_key = key.as_str(),
                    path = %path.display(),
                    "No stored snapshot, treating as changed"
                );
                return Ok(ChangeReport {
                    changed: true,
                    basis: ChangeBasis::FirstSeen,
                });
            }
            Err(e) => {
                return Err(io_error("read_snapshot", &path, e).with_resource_key(key.as_str()))
            }
        };

        let comparison = compare(&stored, payload)
            .map_err(|e| from_core("compare_snapshot", e).with_resource_key(key.as_str()))?;

        tracing::debug!(
            resource_key = key.as_str(),
            path = %path.display(),
            mode = ?comparison.mode,
            changed = comparison.changed,
            "Compared payload with stored snapshot"
        );

        Ok(ChangeReport {
            changed: comparison.changed,
            basis: ChangeBasis::Compared(comparison.mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ChangeDetector) {
        let dir = TempDir::new().unwrap();
        let detector = ChangeDetector::new(&StoreConfig::new(dir.path()));
        (dir, detector)
    }

    #[test]
    fn test_missing_snapshot_is_first_seen() {
        let (_dir, detector) = setup();
        let key = ResourceKey::new("users-7").unwrap();

        let report = detector.check(&key, b"anything").unwrap();

        assert!(report.changed);
        assert_eq!(report.basis, ChangeBasis::FirstSeen);
    }

    #[test]
    fn test_stored_timestamp_ignored() {
        let (dir, detector) = setup();
        let key = ResourceKey::endpoint("users", "7").unwrap();
        fs::write(
            dir.path().join("users-7.json"),
            br#"{"id":"7","name":"Alpha","roLastUpdated":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(!detector.has_changed(&key, br#"{"id":"7","name":"Alpha"}"#).unwrap());
        assert!(detector.has_changed(&key, br#"{"id":"7","name":"Beta"}"#).unwrap());
    }

    #[test]
    fn test_unreadable_snapshot_is_io_error() {
        let (dir, detector) = setup();
        let key = ResourceKey::new("groups-1.json").unwrap();
        // A directory at the snapshot path exists but cannot be read as a file.
        fs::create_dir(dir.path().join("groups-1.json")).unwrap();

        let err = detector.check(&key, b"{}").unwrap_err();

        assert_eq!(err.kind(), roapid_core::ExErrorKind::Io);
        assert_eq!(err.resource_key(), Some("groups-1.json"));
        assert!(err.path().unwrap().ends_with("groups-1.json"));
    }

    #[test]
    fn test_check_does_not_touch_store() {
        let (dir, detector) = setup();
        let key = ResourceKey::new("about.json").unwrap();
        let path = dir.path().join("about.json");
        fs::write(&path, b"not json").unwrap();

        detector.check(&key, b"something else").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"not json");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
