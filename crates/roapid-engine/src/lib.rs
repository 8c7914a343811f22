//! roapid engine - orchestration layer
//!
//! Composes the change detector and the snapshot store into the sync
//! pipeline callers run for every fetched document.

pub mod commands;
