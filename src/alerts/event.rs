use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::measurement::{ThresholdPair, Tier};

/// One notification to deliver. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub scale_id: String,
    pub tier: Tier,
    pub weight: f64,
    pub unit: String,
    pub thresholds: ThresholdPair,
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub recipient: String,
}
