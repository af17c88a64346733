use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};

use crate::{
    alerts::{AlertEvaluator, ScaleStateStore},
    config::Config,
    measurement::ThresholdError,
    notify::DispatchHandle,
    source::{InMemoryMeasurementSource, InMemoryThresholdStore},
};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub source: Arc<InMemoryMeasurementSource>,
    pub thresholds: Arc<InMemoryThresholdStore>,
    pub evaluator: Arc<AlertEvaluator>,
    pub dispatch: DispatchHandle,
    pub last_monitor_tick: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub shutdown: Arc<watch::Sender<bool>>,
}

impl AppContext {
    pub fn new(config: Config, dispatch: DispatchHandle) -> Result<Self, ThresholdError> {
        let thresholds = InMemoryThresholdStore::new(config.threshold_map()?);
        let evaluator = AlertEvaluator::new(Arc::new(ScaleStateStore::new()), config.alert_routes());
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            config,
            source: Arc::new(InMemoryMeasurementSource::new()),
            thresholds: Arc::new(thresholds),
            evaluator: Arc::new(evaluator),
            dispatch,
            last_monitor_tick: Arc::new(Mutex::new(None)),
            shutdown: Arc::new(shutdown),
        })
    }

    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
        self.dispatch.shutdown();
    }
}
