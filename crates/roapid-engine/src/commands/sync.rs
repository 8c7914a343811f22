//! Sync pipeline: check, persist, publish.
//!
//! ## Pipeline (in order):
//! 1. Ask the detector whether the payload differs from the stored snapshot
//!    (capture timestamp ignored)
//! 2. Persist according to [`SavePolicy`]
//! 3. Hand the persisted bytes to the publish sink, only if changed
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`). The store emits `tracing::debug!` details only.

use crate::commands::publish::PublishSink;
use roapid_core::errors::{ExError, ExErrorKind};
use roapid_core::{log_op_end, log_op_error, log_op_start, ResourceKey};
use roapid_store::{ChangeBasis, ChangeDetector, Result, SnapshotStore};

/// When the pipeline writes the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Persist on every run so the capture timestamp stays fresh; used for
    /// remotely fetched documents
    #[default]
    Always,
    /// Persist only when the content changed; used for locally maintained
    /// documents where an unchanged file means nothing to do
    OnlyIfChanged,
}

/// What one pipeline run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub changed: bool,
    pub basis: ChangeBasis,
    /// Exact bytes now at the snapshot path, if this run wrote them
    pub snapshot: Option<Vec<u8>>,
    pub published: bool,
}

/// Run the pipeline for one document.
///
/// ## Errors
///
/// - `Io`: the stored snapshot could not be read, or the write failed
/// - `Format`: the payload must be persisted but is not a JSON object
/// - `ExternalService`: the sink rejected a changed document; the snapshot
///   has already been persisted at that point
pub fn sync_resource(
    detector: &ChangeDetector,
    store: &SnapshotStore,
    key: &ResourceKey,
    payload: &[u8],
    policy: SavePolicy,
    sink: &dyn PublishSink,
) -> Result<SyncOutcome> {
    log_op_start!("sync_resource", resource_key = key.as_str(), policy = ?policy);
    let start = std::time::Instant::now();

    let outcome = sync_resource_impl(detector, store, key, payload, policy, sink).map_err(|e| {
        log_op_error!(
            "sync_resource",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            resource_key = key.as_str()
        );
        e
    })?;

    log_op_end!(
        "sync_resource",
        duration_ms = start.elapsed().as_millis() as u64,
        resource_key = key.as_str(),
        changed = outcome.changed,
        published = outcome.published
    );

    Ok(outcome)
}

fn sync_resource_impl(
    detector: &ChangeDetector,
    store: &SnapshotStore,
    key: &ResourceKey,
    payload: &[u8],
    policy: SavePolicy,
    sink: &dyn PublishSink,
) -> Result<SyncOutcome> {
    let report = detector.check(key, payload)?;

    if !report.changed && policy == SavePolicy::OnlyIfChanged {
        tracing::debug!(
            resource_key = key.as_str(),
            "Unchanged, skipping save and publish"
        );
        return Ok(SyncOutcome {
            changed: false,
            basis: report.basis,
            snapshot: None,
            published: false,
        });
    }

    let snapshot = store.save(key, payload)?;

    if !report.changed {
        tracing::debug!(
            resource_key = key.as_str(),
            "No meaningful changes (only capture timestamp), skipping publish"
        );
        return Ok(SyncOutcome {
            changed: false,
            basis: report.basis,
            snapshot: Some(snapshot),
            published: false,
        });
    }

    sink.publish(key, &snapshot).map_err(|e| {
        ExError::new(ExErrorKind::ExternalService)
            .with_op("publish_snapshot")
            .with_resource_key(key.as_str())
            .with_message("snapshot persisted but publishing failed")
            .with_source(e)
    })?;

    Ok(SyncOutcome {
        changed: true,
        basis: report.basis,
        snapshot: Some(snapshot),
        published: true,
    })
}
