//! Command orchestration layer.

pub mod publish;
pub mod sync;
