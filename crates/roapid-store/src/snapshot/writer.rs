//! Snapshot persistence.
//!
//! `save` stamps the payload with the capture instant, serializes it with
//! sorted keys and two-space indentation, and writes it through
//! [`atomic_write`](crate::atomic::atomic_write). The returned bytes are
//! exactly what lives at the snapshot path afterwards.

use crate::atomic::atomic_write;
use crate::errors::{format_error, from_core, Result};
use crate::layout::StoreLayout;
use roapid_core::clock::{format_timestamp, Clock, SystemClock};
use roapid_core::document::{pretty_bytes, stamp};
use roapid_core::{Document, ResourceKey, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Durable, atomic writer of per-key snapshots
#[derive(Clone)]
pub struct SnapshotStore {
    layout: StoreLayout,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl SnapshotStore {
    /// Store stamping snapshots with the wall clock
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: &StoreConfig, clock: impl Clock + 'static) -> Self {
        Self {
            layout: StoreLayout::from_config(config),
            clock: Arc::new(clock),
        }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn snapshot_path(&self, key: &ResourceKey) -> PathBuf {
        self.layout.snapshot_path(key)
    }

    /// Stamp and persist `payload` under `key`.
    ///
    /// Any existing snapshot is replaced atomically.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::Format`: payload is not a JSON object
    /// - `ExErrorKind::Serialization`: re-encoding failed
    /// - `ExErrorKind::Io`: a filesystem step failed (path attached)
    pub fn save(&self, key: &ResourceKey, payload: &[u8]) -> Result<Vec<u8>> {
        let mut map = Document::parse_object(payload)
            .map_err(|e| format_error("save_snapshot", key.as_str(), e))?;

        let captured_at = format_timestamp(&self.clock.now());
        stamp(&mut map, captured_at.as_str());

        let bytes = pretty_bytes(&map)
            .map_err(|e| from_core("save_snapshot", e).with_resource_key(key.as_str()))?;

        let path = self.layout.snapshot_path(key);
        atomic_write(&path, &bytes).map_err(|e| e.with_resource_key(key.as_str()))?;

        tracing::debug!(
            resource_key = key.as_str(),
            path = %path.display(),
            captured_at = %captured_at,
            size_bytes = bytes.len(),
            "Persisted snapshot"
        );

        Ok(bytes)
    }
}
