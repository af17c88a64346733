use std::{collections::HashMap, time::Duration};

use serde::Deserialize;

use crate::{
    alerts::{AlertRoute, AlertRoutes},
    measurement::{ThresholdError, ThresholdPair},
    series::max_gap_from_hours,
};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval: u64,
    #[serde(default)]
    pub series: SeriesSettings,
    #[serde(default)]
    pub dispatch: Dispatch,
    #[serde(default)]
    pub telegram: Telegram,
    #[serde(default)]
    pub simulation: Simulation,
    #[serde(default)]
    pub scales: Vec<ScaleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSettings {
    #[serde(default = "default_max_gap_hours")]
    pub max_gap_hours: f64,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dispatch {
    #[serde(default = "default_dispatch_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Telegram {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScaleConfig {
    pub id: String,
    pub upper: f64,
    pub lower: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub recipient: String,
}

impl ScaleConfig {
    pub fn thresholds(&self) -> Result<ThresholdPair, ThresholdError> {
        ThresholdPair::new(self.upper, self.lower)
    }
}

impl Config {
    pub fn max_gap(&self) -> chrono::Duration {
        max_gap_from_hours(self.series.max_gap_hours)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch.timeout_secs)
    }

    pub fn telegram_target(&self) -> Option<(&str, i64)> {
        self.telegram
            .enabled
            .then_some((self.telegram.bot_token.as_str(), self.telegram.chat_id))
    }

    pub fn channel_name(&self) -> &'static str {
        if self.telegram.enabled {
            "telegram"
        } else {
            "log"
        }
    }

    pub fn threshold_map(&self) -> Result<HashMap<String, ThresholdPair>, ThresholdError> {
        self.scales
            .iter()
            .map(|scale| Ok((scale.id.clone(), scale.thresholds()?)))
            .collect()
    }

    pub fn alert_routes(&self) -> AlertRoutes {
        let mut routes = AlertRoutes::new();
        for scale in &self.scales {
            routes.insert(
                scale.id.clone(),
                AlertRoute {
                    channel: self.channel_name().to_string(),
                    recipient: scale.recipient.clone(),
                    unit: scale.unit.clone(),
                },
            );
        }
        routes
    }
}
