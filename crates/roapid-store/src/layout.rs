//! Mapping from resource keys to snapshot paths.
//!
//! ```text
//! <root>/
//!   users-7.json
//!   groups-42.json
//!   badges/123.json
//! ```
//!
//! One file per key, no index or manifest. Existence of the file is the
//! only state.

use roapid_core::{ResourceKey, StoreConfig};
use std::path::{Path, PathBuf};

/// Resolves resource keys beneath a fixed store root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stable location of the snapshot for `key`
    pub fn snapshot_path(&self, key: &ResourceKey) -> PathBuf {
        self.root.join(key.relative_path())
    }
}
