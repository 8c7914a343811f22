//! Snapshot change detection and persistence.
//!
//! - [`ChangeDetector`] decides whether a payload differs from the stored
//!   snapshot, ignoring the capture timestamp. Read-only.
//! - [`SnapshotStore`] stamps a payload and writes it through the atomic
//!   write protocol.
//!
//! The two are independent; the sync pipeline in `roapid-engine` composes
//! them.

pub mod detector;
pub mod writer;

pub use detector::{ChangeBasis, ChangeDetector, ChangeReport};
pub use writer::SnapshotStore;
