use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reading taken by a scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
}

impl Measurement {
    pub fn new(timestamp: DateTime<Utc>, weight: f64) -> Self {
        Self { timestamp, weight }
    }
}
