//! roapid core - document semantics for snapshot change detection
//!
//! This crate has no filesystem side effects beyond loading configuration.
//! It provides:
//! - The `Parsed | Unparseable` document model and canonical serialization
//! - The reserved capture field and the timestamp-blind comparison
//! - Resource keys and their mapping to relative paths
//! - The clock abstraction used to stamp snapshots
//! - The error and logging facilities shared by every roapid crate

pub mod clock;
pub mod config;
pub mod document;
pub mod errors;
pub mod key;
pub mod logging_facility;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use document::{compare, CompareMode, Comparison, Document, JsonMap, RESERVED_FIELD};
pub use errors::{ExError, ExErrorKind, Result, RoapidError};
pub use key::ResourceKey;
