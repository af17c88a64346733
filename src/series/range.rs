use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::model::Series;

pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Inclusive time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Keeps the points inside `[start, end]`. A missing bound returns the series as is.
pub fn filter_by_range(
    series: &Series,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Series {
    let (Some(start), Some(end)) = (start, end) else {
        return series.clone();
    };

    let range = DateRange::new(start, end);
    Series::new(
        series
            .points()
            .iter()
            .copied()
            .filter(|point| range.contains(point.timestamp))
            .collect(),
    )
}

pub fn default_range(series: &Series) -> DateRange {
    default_range_at(series, Utc::now())
}

/// Extent of the real points of `series`, or the last week before `now` when there are none.
/// Gap markers never widen the window.
pub fn default_range_at(series: &Series, now: DateTime<Utc>) -> DateRange {
    let mut timestamps = series.real_points().map(|point| point.timestamp);
    let Some(first) = timestamps.next() else {
        return DateRange::last_days(DEFAULT_WINDOW_DAYS, now);
    };

    let (start, end) = timestamps.fold((first, first), |(start, end), timestamp| {
        (start.min(timestamp), end.max(timestamp))
    });
    DateRange::new(start, end)
}
