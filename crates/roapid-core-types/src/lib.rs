//! Core types shared across roapid facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! macros and the error facility, so every layer emits the same schema.

pub mod schema;
