//! Strictly increasing timestamps for history records.

use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Issues UTC timestamps that never repeat and never go backwards, at
/// microsecond resolution. Two records saved in the same microsecond get
/// consecutive values.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: Mutex<i64>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after `floor`, e.g. the newest timestamp already stored
    pub fn starting_after(floor: DateTime<Utc>) -> Self {
        Self {
            last_micros: Mutex::new(floor.timestamp_micros()),
        }
    }

    pub fn next(&self) -> DateTime<Utc> {
        let now = Utc::now().timestamp_micros();
        let mut last = match self.last_micros.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let issued = now.max(*last + 1);
        *last = issued;
        Utc.timestamp_micros(issued).single().unwrap_or_else(Utc::now)
    }

    /// Fixed-width ISO-8601, so string order equals time order
    pub fn next_iso(&self) -> String {
        format_timestamp(self.next())
    }
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
