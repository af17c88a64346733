use chrono::{DateTime, Duration, Utc};

use super::model::{Series, SeriesPoint};

pub const DEFAULT_MAX_GAP_HOURS: f64 = 24.0;

pub fn max_gap_from_hours(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// Sorts points by time and marks every interval longer than `max_gap` with one gap entry.
///
/// Equal timestamps keep their input order. Only records identical in both timestamp and
/// weight are collapsed. A gap already present between two real points is reused, so
/// normalizing a normalized series changes nothing. A non-positive `max_gap` disables
/// gap detection.
pub fn normalize<I>(samples: I, max_gap: Duration) -> Series
where
    I: IntoIterator<Item = SeriesPoint>,
{
    let mut points: Vec<SeriesPoint> = samples.into_iter().collect();
    points.sort_by_key(|point| point.timestamp);

    let mut output: Vec<SeriesPoint> = Vec::with_capacity(points.len() + points.len() / 4);
    let mut run_start = 0usize;
    let mut previous_real: Option<DateTime<Utc>> = None;
    let mut gap_since_previous = false;

    for point in points {
        if output
            .last()
            .is_some_and(|last| last.timestamp != point.timestamp)
        {
            run_start = output.len();
        }
        if output[run_start..]
            .iter()
            .any(|existing| existing.same_record(&point))
        {
            continue;
        }

        if point.is_gap() {
            gap_since_previous = true;
            output.push(point);
            continue;
        }

        if let Some(previous) = previous_real
            && !gap_since_previous
            && max_gap > Duration::zero()
            && point.timestamp - previous > max_gap
        {
            output.push(SeriesPoint::gap(previous + max_gap));
            run_start = output.len();
        }

        previous_real = Some(point.timestamp);
        gap_since_previous = false;
        output.push(point);
    }

    Series::new(output)
}
