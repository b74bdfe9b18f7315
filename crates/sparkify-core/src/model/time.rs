use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A row of the time dimension, keyed by the event's epoch-millisecond
/// timestamp.
///
/// Calendar fields are derived in UTC. `week` is the ISO-8601 week number
/// and `weekday` counts from Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRow {
    pub start_time: i64,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeRow {
    /// Decompose an epoch-millisecond timestamp.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if the timestamp is outside the range
    /// chrono can represent.
    pub fn from_millis(start_time: i64) -> Result<Self> {
        let at = DateTime::from_timestamp_millis(start_time).ok_or_else(|| {
            Error::InvalidData(format!("timestamp {start_time} ms is out of range"))
        })?;
        Ok(Self::from_datetime(start_time, at))
    }

    fn from_datetime(start_time: i64, at: DateTime<Utc>) -> Self {
        Self {
            start_time,
            hour: at.hour(),
            day: at.day(),
            week: at.iso_week().week(),
            month: at.month(),
            year: at.year(),
            weekday: at.weekday().num_days_from_monday(),
        }
    }
}
