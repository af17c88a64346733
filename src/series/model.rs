use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::measurement::Measurement;

/// One entry of a chartable series. `weight == None` marks an interval without data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub weight: Option<f64>,
}

impl SeriesPoint {
    pub fn gap(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            weight: None,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.weight.is_none()
    }

    pub(crate) fn same_record(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && match (self.weight, other.weight) {
                (Some(left), Some(right)) => left.to_bits() == right.to_bits(),
                (None, None) => true,
                _ => false,
            }
    }
}

impl From<Measurement> for SeriesPoint {
    fn from(measurement: Measurement) -> Self {
        Self {
            timestamp: measurement.timestamp,
            weight: Some(measurement.weight),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        Self {
            points: measurements.iter().copied().map(SeriesPoint::from).collect(),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|point| point.is_gap()).count()
    }

    pub fn real_points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(|point| !point.is_gap())
    }
}
