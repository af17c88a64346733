use std::{collections::HashMap, sync::Arc, time::Duration as StdDuration};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    alerts::{AlertEvaluator, AlertRoute, AlertRoutes, ScaleStateStore},
    measurement::{Measurement, ThresholdPair, Tier},
    notify::{DispatchQueue, LogChannel, NotificationDispatcher},
    series::max_gap_from_hours,
    source::{
        InMemoryMeasurementSource, InMemoryThresholdStore, MeasurementSource, SourceError,
        ThresholdStoreError,
    },
};

use super::{ChartRequest, MonitorError, chart_series, check_scale};

struct UnreachableSource;

impl MeasurementSource for UnreachableSource {
    async fn get_latest_measurement(&self, _scale_id: &str) -> Result<Measurement, SourceError> {
        Err(SourceError::Transport("connection refused".to_string()))
    }

    async fn get_measurements_in_range(
        &self,
        _scale_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Measurement>, SourceError> {
        Err(SourceError::Transport("connection refused".to_string()))
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 6, 0, 0).unwrap()
}

fn threshold_store() -> InMemoryThresholdStore {
    InMemoryThresholdStore::new(HashMap::from([(
        "bin-1".to_string(),
        ThresholdPair::new(10.0, 5.0).expect("valid pair"),
    )]))
}

fn evaluator() -> AlertEvaluator {
    let mut routes = AlertRoutes::new();
    routes.insert(
        "bin-1",
        AlertRoute {
            channel: "log".to_string(),
            recipient: "+15551234567".to_string(),
            unit: "kg".to_string(),
        },
    );
    AlertEvaluator::new(Arc::new(ScaleStateStore::new()), routes)
}

#[tokio::test]
async fn check_queues_one_alert_per_excursion() {
    let source = InMemoryMeasurementSource::new();
    let thresholds = threshold_store();
    let evaluator = evaluator();
    let dispatcher = NotificationDispatcher::new(LogChannel::new(), StdDuration::from_secs(1));
    let (dispatch, worker) = DispatchQueue::start(dispatcher, 8);

    let mut queued = Vec::new();
    for (minute, weight) in [12.0, 4.0, 4.5, 3.0].into_iter().enumerate() {
        source
            .record("bin-1", Measurement::new(t0() + Duration::minutes(minute as i64), weight))
            .await;
        let outcome = check_scale(&source, &thresholds, &evaluator, &dispatch, "bin-1")
            .await
            .expect("check should succeed");
        queued.push((outcome.tier, outcome.alert_queued));
    }

    assert_eq!(
        queued,
        vec![
            (Tier::Normal, false),
            (Tier::Critical, true),
            (Tier::Critical, false),
            (Tier::Critical, false),
        ]
    );

    drop(dispatch);
    let stats = worker.await.expect("worker should finish");
    assert_eq!(stats.delivered, 1);
}

#[tokio::test]
async fn scale_without_readings_is_unknown() {
    let source = InMemoryMeasurementSource::new();
    let thresholds = threshold_store();
    let evaluator = evaluator();
    let dispatcher = NotificationDispatcher::new(LogChannel::new(), StdDuration::from_secs(1));
    let (dispatch, _worker) = DispatchQueue::start(dispatcher, 8);

    let outcome = check_scale(&source, &thresholds, &evaluator, &dispatch, "bin-1")
        .await
        .expect("missing data is not an error");

    assert_eq!(outcome.tier, Tier::Unknown);
    assert_eq!(outcome.weight, None);
    assert!(!outcome.alert_queued);
}

#[tokio::test]
async fn transport_errors_propagate() {
    let thresholds = threshold_store();
    let evaluator = evaluator();
    let dispatcher = NotificationDispatcher::new(LogChannel::new(), StdDuration::from_secs(1));
    let (dispatch, _worker) = DispatchQueue::start(dispatcher, 8);

    let error = check_scale(&UnreachableSource, &thresholds, &evaluator, &dispatch, "bin-1")
        .await
        .expect_err("transport failure should surface");
    assert_eq!(
        error,
        MonitorError::Source(SourceError::Transport("connection refused".to_string()))
    );

    let unknown = check_scale(
        &InMemoryMeasurementSource::new(),
        &thresholds,
        &evaluator,
        &dispatch,
        "bin-9",
    )
    .await;
    assert_eq!(
        unknown,
        Err(MonitorError::Thresholds(ThresholdStoreError::UnknownScale(
            "bin-9".to_string()
        )))
    );
}

#[tokio::test]
async fn chart_marks_outages_and_defaults_to_data_extent() {
    let source = InMemoryMeasurementSource::new();
    for (hours, weight) in [(30, 6.0), (0, 8.0), (1, 7.5)] {
        source
            .record("bin-1", Measurement::new(t0() + Duration::hours(hours), weight))
            .await;
    }
    let request = ChartRequest {
        scale_id: "bin-1".to_string(),
        start: None,
        end: None,
    };

    let chart = chart_series(
        &source,
        &request,
        Duration::days(30),
        max_gap_from_hours(24.0),
        t0() + Duration::hours(40),
    )
    .await
    .expect("chart should build");

    assert_eq!(chart.range.start, t0());
    assert_eq!(chart.range.end, t0() + Duration::hours(30));
    assert_eq!(chart.series.len(), 4);
    assert_eq!(chart.series.gap_count(), 1);
    assert!(chart.series.points()[2].is_gap());
}

#[tokio::test]
async fn chart_honours_explicit_window() {
    let source = InMemoryMeasurementSource::new();
    for hours in 0..10 {
        source
            .record("bin-1", Measurement::new(t0() + Duration::hours(hours), 9.0))
            .await;
    }
    let request = ChartRequest {
        scale_id: "bin-1".to_string(),
        start: Some(t0() + Duration::hours(2)),
        end: Some(t0() + Duration::hours(4)),
    };

    let chart = chart_series(
        &source,
        &request,
        Duration::days(30),
        max_gap_from_hours(24.0),
        t0() + Duration::hours(12),
    )
    .await
    .expect("chart should build");

    assert_eq!(chart.series.len(), 3);
    assert_eq!(chart.series.gap_count(), 0);
}

#[tokio::test]
async fn empty_chart_spans_last_week() {
    let source = InMemoryMeasurementSource::new();
    let now = t0();
    let request = ChartRequest {
        scale_id: "bin-1".to_string(),
        start: None,
        end: None,
    };

    let chart = chart_series(&source, &request, Duration::days(30), max_gap_from_hours(24.0), now)
        .await
        .expect("chart should build");

    assert!(chart.series.is_empty());
    assert_eq!(chart.range.start, now - Duration::days(7));
    assert_eq!(chart.range.end, now);
}
