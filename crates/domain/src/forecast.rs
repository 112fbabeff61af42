//! Forecast — the condition picked from the next forecast period.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// The next forecast period's primary condition and free-text description.
///
/// Produced by each poll and overwritten by the next; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// Primary condition group, e.g. `"Rain"`.
    pub condition: String,
    /// Free-text description, e.g. `"light rain"`.
    pub description: String,
    /// Start of the forecast period, when the source reports one.
    pub valid_at: Option<Timestamp>,
}

impl Forecast {
    #[must_use]
    pub fn new(condition: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            description: description.into(),
            valid_at: None,
        }
    }

    #[must_use]
    pub fn with_valid_at(mut self, valid_at: Timestamp) -> Self {
        self.valid_at = Some(valid_at);
        self
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.condition, self.description)
    }
}
