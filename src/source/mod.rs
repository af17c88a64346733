mod memory;
mod simulator;
mod thresholds;

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::measurement::Measurement;

pub use memory::InMemoryMeasurementSource;
pub use simulator::WeightSimulator;
pub use thresholds::{InMemoryThresholdStore, ThresholdStore, ThresholdStoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("no measurements recorded for scale {0}")]
    NotFound(String),
    #[error("measurement source unreachable: {0}")]
    Transport(String),
}

/// Read side of the measurement backend.
pub trait MeasurementSource: Send + Sync {
    fn get_latest_measurement(
        &self,
        scale_id: &str,
    ) -> impl Future<Output = Result<Measurement, SourceError>> + Send;

    /// Measurements with `start <= timestamp <= end`, in no particular order.
    fn get_measurements_in_range(
        &self,
        scale_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Measurement>, SourceError>> + Send;
}
