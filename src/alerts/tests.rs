use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::measurement::{ThresholdPair, Tier};

use super::{AlertEvaluator, AlertRoute, AlertRoutes, ScaleStateStore};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

fn thresholds() -> ThresholdPair {
    ThresholdPair::new(10.0, 5.0).expect("valid pair")
}

fn evaluator() -> AlertEvaluator {
    let mut routes = AlertRoutes::new();
    routes.insert(
        "scale-a",
        AlertRoute {
            channel: "log".to_string(),
            recipient: "+4915112345678".to_string(),
            unit: "kg".to_string(),
        },
    );
    AlertEvaluator::new(Arc::new(ScaleStateStore::new()), routes)
}

async fn run(evaluator: &AlertEvaluator, scale_id: &str, weights: &[Option<f64>]) -> Vec<usize> {
    let pair = thresholds();
    let mut fired = Vec::new();
    for (index, weight) in weights.iter().enumerate() {
        let now = start() + Duration::minutes(index as i64);
        if evaluator.evaluate(scale_id, *weight, pair, now).await.is_some() {
            fired.push(index);
        }
    }
    fired
}

#[tokio::test]
async fn repeated_breaches_fire_once_per_excursion() {
    let evaluator = evaluator();
    let weights = [5.0, 4.0, 4.0, 4.0, 6.0, 3.0].map(Some);

    let fired = run(&evaluator, "scale-a", &weights).await;

    // warning, then the escalation to critical; easing to warning and falling back
    // to critical stay inside the same excursion
    assert_eq!(fired, vec![0, 1]);
}

#[tokio::test]
async fn normal_reading_rearms_the_alert() {
    let evaluator = evaluator();
    let weights = [4.0, 4.0, 12.0, 3.0, 3.0].map(Some);

    let fired = run(&evaluator, "scale-a", &weights).await;

    assert_eq!(fired, vec![0, 3]);
}

#[tokio::test]
async fn escalation_refires_but_deescalation_does_not() {
    let evaluator = evaluator();
    let weights = [7.0, 7.0, 2.0, 7.0, 2.0].map(Some);

    let fired = run(&evaluator, "scale-a", &weights).await;

    assert_eq!(fired, vec![0, 2]);
}

#[tokio::test]
async fn event_carries_route_and_reading() {
    let evaluator = evaluator();
    let now = start();

    let event = evaluator
        .evaluate("scale-a", Some(3.5), thresholds(), now)
        .await
        .expect("critical reading should alert");

    assert_eq!(event.scale_id, "scale-a");
    assert_eq!(event.tier, Tier::Critical);
    assert_eq!(event.weight, 3.5);
    assert_eq!(event.timestamp, now);
    assert_eq!(event.channel, "log");
    assert_eq!(event.recipient, "+4915112345678");
    assert_eq!(event.unit, "kg");
}

#[tokio::test]
async fn unknown_reading_neither_alerts_nor_rearms() {
    let evaluator = evaluator();
    let weights = [Some(4.0), None, None, Some(4.0)];

    let fired = run(&evaluator, "scale-a", &weights).await;
    assert_eq!(fired, vec![0]);

    let status = evaluator
        .store()
        .status("scale-a")
        .await
        .expect("state should exist");
    assert_eq!(status.last_alert_tier, Some(Tier::Critical));
}

#[tokio::test]
async fn scale_without_data_is_unknown_not_critical() {
    let evaluator = evaluator();

    let event = evaluator.evaluate("scale-a", None, thresholds(), start()).await;
    assert!(event.is_none());

    assert!(evaluator.store().status("scale-a").await.is_none());

    let event = evaluator.evaluate("scale-a", Some(12.0), thresholds(), start()).await;
    assert!(event.is_none());
    let event = evaluator
        .evaluate("scale-a", None, thresholds(), start() + Duration::minutes(1))
        .await;
    assert!(event.is_none());

    let status = evaluator
        .store()
        .status("scale-a")
        .await
        .expect("state is created on first observed reading");
    assert_eq!(status.tier, Tier::Unknown);
    assert!(!status.alerting);
}

#[tokio::test]
async fn out_of_order_evaluation_is_rejected() {
    let evaluator = evaluator();
    let pair = thresholds();

    assert!(
        evaluator
            .evaluate("scale-a", Some(12.0), pair, start() + Duration::hours(1))
            .await
            .is_none()
    );
    let late = evaluator.evaluate("scale-a", Some(1.0), pair, start()).await;
    assert!(late.is_none());

    let status = evaluator
        .store()
        .status("scale-a")
        .await
        .expect("state should exist");
    assert_eq!(status.tier, Tier::Normal);
    assert_eq!(status.out_of_order_rejections, 1);
    assert_eq!(status.last_evaluated_at, Some(start() + Duration::hours(1)));
}

#[tokio::test]
async fn scales_keep_independent_state() {
    let evaluator = evaluator();
    let pair = thresholds();

    assert!(evaluator.evaluate("scale-a", Some(1.0), pair, start()).await.is_some());
    assert!(evaluator.evaluate("scale-b", Some(1.0), pair, start()).await.is_some());
    assert!(evaluator.evaluate("scale-a", Some(1.0), pair, start()).await.is_none());
    assert_eq!(evaluator.store().len().await, 2);
}

#[tokio::test]
async fn unrouted_scale_still_produces_an_event() {
    let evaluator = evaluator();

    let event = evaluator
        .evaluate("scale-z", Some(6.0), thresholds(), start())
        .await
        .expect("warning should alert");

    assert_eq!(event.channel, "unrouted");
    assert!(event.recipient.is_empty());
}

#[tokio::test]
async fn concurrent_evaluations_of_one_scale_alert_once() {
    let evaluator = Arc::new(evaluator());
    let pair = thresholds();
    let now = start();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..16 {
        let evaluator = Arc::clone(&evaluator);
        tasks.spawn(async move { evaluator.evaluate("scale-a", Some(2.0), pair, now).await });
    }

    let mut fired = 0;
    while let Some(result) = tasks.join_next().await {
        if result.expect("task should not panic").is_some() {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}

#[tokio::test]
async fn locked_scale_does_not_block_other_scales() {
    let evaluator = evaluator();
    let pair = thresholds();

    let held = evaluator.store().slot("scale-a", pair).await;
    let _guard = held.lock().await;

    let other = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        evaluator.evaluate("scale-b", Some(1.0), pair, start()),
    )
    .await
    .expect("scale-b must not wait on scale-a");
    assert!(other.is_some());

    let blocked = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        evaluator.evaluate("scale-a", Some(1.0), pair, start()),
    )
    .await;
    assert!(blocked.is_err());
}
