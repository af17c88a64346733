use chrono::{Duration as ChronoDuration, Utc};
use tracing_subscriber::EnvFilter;

use scale_watch::{
    app_context::AppContext,
    config::{Config, load_config},
    jobs::start_background_jobs,
    monitor::{ChartRequest, chart_series},
    notify::{ActiveChannel, DispatchQueue, NotificationDispatcher},
    series::chart_payload,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

async fn log_final_state(app_context: &AppContext) {
    let now = Utc::now();
    let lookback = ChronoDuration::days(i64::from(app_context.config.series.lookback_days));

    match *app_context.last_monitor_tick.lock().await {
        Some(tick) => log::info!(
            "monitor_last_tick at={} age_secs={}",
            tick.to_rfc3339(),
            now.signed_duration_since(tick).num_seconds().max(0)
        ),
        None => log::warn!("monitor_last_tick at=never"),
    }

    for status in app_context.evaluator.store().statuses().await {
        log::info!(
            "scale_final_status scale_id={} tier={} alerting={} out_of_order_rejections={}",
            status.scale_id,
            status.tier,
            status.alerting,
            status.out_of_order_rejections
        );

        let request = ChartRequest {
            scale_id: status.scale_id.clone(),
            start: None,
            end: None,
        };
        match chart_series(
            app_context.source.as_ref(),
            &request,
            lookback,
            app_context.config.max_gap(),
            now,
        )
        .await
        {
            Ok(chart) => match chart_payload(&chart.series) {
                Ok(payload) => log::debug!(
                    "scale_chart scale_id={} points={} gaps={} payload={}",
                    chart.scale_id,
                    chart.series.len(),
                    chart.series.gap_count(),
                    payload
                ),
                Err(error) => log::warn!(
                    "scale_chart_encode_failed scale_id={} error={}",
                    chart.scale_id,
                    error
                ),
            },
            Err(error) => log::warn!(
                "scale_chart_failed scale_id={} error={}",
                status.scale_id,
                error
            ),
        }
    }
}

#[tokio::main]
async fn main() {
    init_json_logging();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config: Config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    if config.scales.is_empty() {
        log::warn!("no_scales_configured config_path={}", config_path);
    }
    log::info!(
        "Scale watch is starting... scales={} channel={}",
        config.scales.len(),
        config.channel_name()
    );

    let dispatcher = NotificationDispatcher::new(
        ActiveChannel::new(config.telegram_target()),
        config.dispatch_timeout(),
    );
    let (dispatch, dispatch_worker) =
        DispatchQueue::start(dispatcher, config.dispatch.queue_capacity);

    let app_context = match AppContext::new(config, dispatch) {
        Ok(app_context) => app_context,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    let monitor_job = start_background_jobs(app_context.clone());

    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("shutdown signal listener failed: {}", error);
    }
    log::info!("shutdown_requested");
    app_context.request_shutdown();

    if let Err(error) = monitor_job.await {
        log::error!("monitor_job_join_failed error={}", error);
    }
    match dispatch_worker.await {
        Ok(stats) => log::info!(
            "dispatch_summary delivered={} failed={} dropped_on_shutdown={}",
            stats.delivered,
            stats.failed,
            stats.dropped_on_shutdown
        ),
        Err(error) => log::error!("dispatch_worker_join_failed error={}", error),
    }

    log_final_state(&app_context).await;
}
