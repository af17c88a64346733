use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::measurement::Measurement;

use super::{MeasurementSource, SourceError};

#[derive(Debug, Default)]
pub struct InMemoryMeasurementSource {
    readings: RwLock<HashMap<String, Vec<Measurement>>>,
}

impl InMemoryMeasurementSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, scale_id: &str, measurement: Measurement) {
        self.readings
            .write()
            .await
            .entry(scale_id.to_string())
            .or_default()
            .push(measurement);
    }

    /// Drops readings older than `cutoff`. Returns how many were removed.
    pub async fn prune_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut readings = self.readings.write().await;
        let mut removed = 0;
        for samples in readings.values_mut() {
            let before = samples.len();
            samples.retain(|sample| sample.timestamp >= cutoff);
            removed += before - samples.len();
        }
        removed
    }
}

impl MeasurementSource for InMemoryMeasurementSource {
    async fn get_latest_measurement(&self, scale_id: &str) -> Result<Measurement, SourceError> {
        self.readings
            .read()
            .await
            .get(scale_id)
            .and_then(|samples| samples.iter().max_by_key(|sample| sample.timestamp))
            .copied()
            .ok_or_else(|| SourceError::NotFound(scale_id.to_string()))
    }

    async fn get_measurements_in_range(
        &self,
        scale_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Measurement>, SourceError> {
        Ok(self
            .readings
            .read()
            .await
            .get(scale_id)
            .map(|samples| {
                samples
                    .iter()
                    .filter(|sample| start <= sample.timestamp && sample.timestamp <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::InMemoryMeasurementSource;
    use crate::{
        measurement::Measurement,
        source::{MeasurementSource, SourceError},
    };

    #[tokio::test]
    async fn latest_is_by_timestamp_not_insertion() {
        let source = InMemoryMeasurementSource::new();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        source.record("s1", Measurement::new(t0 + Duration::hours(2), 2.0)).await;
        source.record("s1", Measurement::new(t0, 1.0)).await;

        let latest = source.get_latest_measurement("s1").await.expect("latest");
        assert_eq!(latest.weight, 2.0);

        assert_eq!(
            source.get_latest_measurement("missing").await,
            Err(SourceError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn range_query_is_inclusive_and_prune_drops_old_rows() {
        let source = InMemoryMeasurementSource::new();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for hour in 0..5 {
            source
                .record("s1", Measurement::new(t0 + Duration::hours(hour), hour as f64))
                .await;
        }

        let window = source
            .get_measurements_in_range("s1", t0 + Duration::hours(1), t0 + Duration::hours(3))
            .await
            .expect("range");
        assert_eq!(window.len(), 3);

        assert_eq!(source.prune_before(t0 + Duration::hours(2)).await, 2);
        let rest = source
            .get_measurements_in_range("s1", t0, t0 + Duration::hours(10))
            .await
            .expect("range");
        assert_eq!(rest.len(), 3);
    }
}
