//! roapid store - filesystem side of snapshot change detection
//!
//! Provides:
//! - Key→path layout beneath a configured store root
//! - The atomic write protocol (temp file, fsync, rename, cleanup on drop)
//! - `ChangeDetector` and `SnapshotStore`

pub mod atomic;
pub mod errors;
pub mod layout;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use layout::StoreLayout;
pub use snapshot::{ChangeBasis, ChangeDetector, ChangeReport, SnapshotStore};
