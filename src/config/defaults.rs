use super::schema::{Dispatch, SeriesSettings, Telegram};

pub(super) fn default_monitor_interval() -> u64 {
    60
}

pub(super) fn default_max_gap_hours() -> f64 {
    crate::series::DEFAULT_MAX_GAP_HOURS
}

pub(super) fn default_lookback_days() -> u16 {
    30
}

pub(super) fn default_dispatch_timeout_secs() -> u64 {
    10
}

pub(super) fn default_queue_capacity() -> usize {
    64
}

pub(super) fn default_unit() -> String {
    "kg".to_string()
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            max_gap_hours: default_max_gap_hours(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self {
            timeout_secs: default_dispatch_timeout_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl Default for Telegram {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            chat_id: 0,
        }
    }
}
