//! Downstream publishing hook.
//!
//! The pipeline hands changed snapshots to a [`PublishSink`]. What a sink
//! does with them (wiki edits, purges, notifications) is up to the caller.

use roapid_core::errors::{ExError, ExErrorKind};
use roapid_core::ResourceKey;
use std::sync::Mutex;

/// Receives the exact persisted bytes of documents that changed
pub trait PublishSink {
    /// # Errors
    ///
    /// Implementations report failures as `ExErrorKind::ExternalService`.
    fn publish(&self, key: &ResourceKey, snapshot: &[u8]) -> Result<(), ExError>;
}

/// Sink that accepts everything and does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublishSink;

impl PublishSink for NoopPublishSink {
    fn publish(&self, _key: &ResourceKey, _snapshot: &[u8]) -> Result<(), ExError> {
        Ok(())
    }
}

/// Sink that keeps every published document in memory
#[derive(Debug, Default)]
pub struct CollectingPublishSink {
    published: Mutex<Vec<(ResourceKey, Vec<u8>)>>,
}

impl CollectingPublishSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents published so far, oldest first
    pub fn published(&self) -> Vec<(ResourceKey, Vec<u8>)> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl PublishSink for CollectingPublishSink {
    fn publish(&self, key: &ResourceKey, snapshot: &[u8]) -> Result<(), ExError> {
        self.published
            .lock()
            .map_err(|_| {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("publish")
                    .with_resource_key(key.as_str())
                    .with_message("publish sink lock poisoned")
            })?
            .push((key.clone(), snapshot.to_vec()));
        Ok(())
    }
}
