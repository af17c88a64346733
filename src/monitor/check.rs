use chrono::Utc;
use thiserror::Error;

use crate::{
    alerts::AlertEvaluator,
    measurement::{Tier, classify},
    notify::{DispatchHandle, QueueError},
    source::{MeasurementSource, SourceError, ThresholdStore, ThresholdStoreError},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Thresholds(#[from] ThresholdStoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub scale_id: String,
    pub weight: Option<f64>,
    pub tier: Tier,
    pub alert_queued: bool,
}

/// Evaluates the latest reading of one scale and queues an alert when one fires.
///
/// A scale without readings is evaluated as `Unknown`. Transport failures are returned
/// to the caller. Enqueueing never waits on the channel.
pub async fn check_scale<S, T>(
    source: &S,
    thresholds: &T,
    evaluator: &AlertEvaluator,
    dispatch: &DispatchHandle,
    scale_id: &str,
) -> Result<CheckOutcome, MonitorError>
where
    S: MeasurementSource,
    T: ThresholdStore,
{
    let pair = thresholds.get_thresholds(scale_id).await?;

    let (weight, at) = match source.get_latest_measurement(scale_id).await {
        Ok(measurement) => (Some(measurement.weight), measurement.timestamp),
        Err(SourceError::NotFound(_)) => {
            log::debug!("scale_without_measurements scale_id={}", scale_id);
            (None, Utc::now())
        }
        Err(error) => return Err(error.into()),
    };

    let tier = classify(weight, &pair);
    let mut alert_queued = false;

    if let Some(event) = evaluator.evaluate(scale_id, weight, pair, at).await {
        match dispatch.enqueue(event) {
            Ok(()) => alert_queued = true,
            Err(QueueError::Full { scale_id }) => {
                log::warn!("dispatch_queue_full scale_id={} action=alert_dropped", scale_id);
            }
            Err(QueueError::Closed) => {
                log::error!("dispatch_queue_closed scale_id={} action=alert_dropped", scale_id);
            }
        }
    }

    Ok(CheckOutcome {
        scale_id: scale_id.to_string(),
        weight,
        tier,
        alert_queued,
    })
}
