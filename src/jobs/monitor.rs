use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tokio::{
    task::{JoinHandle, JoinSet},
    time::{Duration, sleep},
};

use crate::{
    app_context::AppContext,
    measurement::Tier,
    monitor::check_scale,
    source::WeightSimulator,
};

pub(super) fn start_monitor_job(app_context: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut simulator = app_context.config.simulation.enabled.then(|| {
            log::warn!("simulation_mode_enabled source=weight_simulator");
            WeightSimulator::new(
                app_context
                    .config
                    .scales
                    .iter()
                    .map(|scale| (scale.id.clone(), scale.upper * 1.5)),
            )
        });
        let scale_ids: Arc<[String]> = app_context
            .config
            .scales
            .iter()
            .map(|scale| scale.id.clone())
            .collect();
        let retention = ChronoDuration::days(i64::from(app_context.config.series.lookback_days));
        let interval_secs = app_context.config.monitor_interval;
        let mut shutdown = app_context.shutdown.subscribe();
        let mut previous_tick = None;

        loop {
            if *shutdown.borrow_and_update() {
                log::info!("monitor_job_stopping");
                break;
            }
            let now = Utc::now();

            if let Some(previous) = previous_tick {
                let elapsed_secs = now.signed_duration_since(previous).num_seconds().max(0);
                let threshold_secs = i64::try_from(interval_secs.saturating_mul(2)).unwrap_or(i64::MAX);
                if elapsed_secs > threshold_secs {
                    log::warn!(
                        "monitor_loop_delayed elapsed_secs={} threshold_secs={}",
                        elapsed_secs,
                        threshold_secs
                    );
                }
            }
            previous_tick = Some(now);

            {
                let mut tick = app_context.last_monitor_tick.lock().await;
                *tick = Some(now);
            }

            if let Some(simulator) = simulator.as_mut() {
                simulator.record_into(&app_context.source, now).await;
                let pruned = app_context.source.prune_before(now - retention).await;
                if pruned > 0 {
                    log::debug!("simulated_readings_pruned count={}", pruned);
                }
            }

            run_checks(&app_context, &scale_ids).await;

            tokio::select! {
                _ = sleep(Duration::from_secs(interval_secs)) => {}
                Ok(()) = shutdown.changed() => {}
            }
        }
    })
}

async fn run_checks(app_context: &AppContext, scale_ids: &Arc<[String]>) {
    let mut checks = JoinSet::new();
    for scale_id in scale_ids.iter().cloned() {
        let source = Arc::clone(&app_context.source);
        let thresholds = Arc::clone(&app_context.thresholds);
        let evaluator = Arc::clone(&app_context.evaluator);
        let dispatch = app_context.dispatch.clone();
        checks.spawn(async move {
            let outcome = check_scale(
                source.as_ref(),
                thresholds.as_ref(),
                &evaluator,
                &dispatch,
                &scale_id,
            )
            .await;
            (scale_id, outcome)
        });
    }

    let mut alerting = 0usize;
    while let Some(joined) = checks.join_next().await {
        match joined {
            Ok((_, Ok(outcome))) => {
                if outcome.tier.is_alertable() {
                    alerting += 1;
                }
                if outcome.tier == Tier::Unknown {
                    log::debug!("scale_status_unknown scale_id={}", outcome.scale_id);
                }
            }
            Ok((scale_id, Err(error))) => {
                log::warn!("scale_check_failed scale_id={} error={}", scale_id, error);
            }
            Err(error) => {
                log::error!("scale_check_task_failed error={}", error);
            }
        }
    }

    tracing::info!(
        target: "monitor",
        module = "jobs",
        scales = scale_ids.len(),
        alerting = alerting,
        "monitor_tick"
    );
}
