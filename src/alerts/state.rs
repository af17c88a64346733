use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::measurement::{ThresholdPair, Tier};

/// Alerting memory for one scale.
#[derive(Debug, Clone)]
pub struct ScaleState {
    pub scale_id: String,
    pub thresholds: ThresholdPair,
    pub last_classification: Tier,
    pub last_alert_sent_at: Option<DateTime<Utc>>,
    pub last_alert_tier: Option<Tier>,
    pub(crate) last_evaluated_at: Option<DateTime<Utc>>,
    pub(crate) out_of_order_rejections: u64,
}

impl ScaleState {
    pub fn new(scale_id: impl Into<String>, thresholds: ThresholdPair) -> Self {
        Self {
            scale_id: scale_id.into(),
            thresholds,
            last_classification: Tier::Unknown,
            last_alert_sent_at: None,
            last_alert_tier: None,
            last_evaluated_at: None,
            out_of_order_rejections: 0,
        }
    }

    pub fn status(&self) -> ScaleStatus {
        ScaleStatus {
            scale_id: self.scale_id.clone(),
            tier: self.last_classification,
            upper: self.thresholds.upper(),
            lower: self.thresholds.lower(),
            alerting: self.last_alert_tier.is_some(),
            last_alert_tier: self.last_alert_tier,
            last_alert_sent_at: self.last_alert_sent_at,
            last_evaluated_at: self.last_evaluated_at,
            out_of_order_rejections: self.out_of_order_rejections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleStatus {
    pub scale_id: String,
    pub tier: Tier,
    pub upper: f64,
    pub lower: f64,
    pub alerting: bool,
    pub last_alert_tier: Option<Tier>,
    pub last_alert_sent_at: Option<DateTime<Utc>>,
    pub last_evaluated_at: Option<DateTime<Utc>>,
    pub out_of_order_rejections: u64,
}
