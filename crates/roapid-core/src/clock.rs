//! Clock abstraction for capture timestamps.

use crate::errors::{Result, RoapidError};
use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// # Errors
    ///
    /// Returns `RoapidError::InvalidTimestamp` if `value` is not RFC 3339.
    pub fn from_rfc3339(value: &str) -> Result<Self> {
        let parsed =
            DateTime::parse_from_rfc3339(value).map_err(|e| RoapidError::InvalidTimestamp {
                value: value.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self(parsed.with_timezone(&Utc)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// RFC 3339, whole seconds, `Z` suffix.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
