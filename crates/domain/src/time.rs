//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for forecast periods and cycle reports.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Convert a Unix timestamp in seconds, as sent by forecast APIs.
///
/// Returns `None` when the value is outside the representable range.
#[must_use]
pub fn from_unix_seconds(secs: i64) -> Option<Timestamp> {
    DateTime::from_timestamp(secs, 0)
}
