use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    series::{DateRange, Series, default_range_at, filter_by_range, normalize},
    source::{MeasurementSource, SourceError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub scale_id: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub scale_id: String,
    pub range: DateRange,
    pub series: Series,
}

/// Fetches, normalizes and windows the readings of one scale for display.
///
/// Missing bounds fall back to `now - lookback` for fetching and to the readings' own
/// extent for display.
pub async fn chart_series<S: MeasurementSource>(
    source: &S,
    request: &ChartRequest,
    lookback: Duration,
    max_gap: Duration,
    now: DateTime<Utc>,
) -> Result<ChartSeries, SourceError> {
    let fetch_start = request.start.unwrap_or(now - lookback);
    let fetch_end = request.end.unwrap_or(now);
    let raw = source
        .get_measurements_in_range(&request.scale_id, fetch_start, fetch_end)
        .await?;

    let raw = Series::from_measurements(&raw);
    let fallback = default_range_at(&raw, now);
    let range = DateRange::new(
        request.start.unwrap_or(fallback.start),
        request.end.unwrap_or(fallback.end),
    );

    let normalized = normalize(raw.into_points(), max_gap);
    let series = filter_by_range(&normalized, Some(range.start), Some(range.end));

    Ok(ChartSeries {
        scale_id: request.scale_id.clone(),
        range,
        series,
    })
}
