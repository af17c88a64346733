use std::fmt;

use serde::Serialize;

use super::ThresholdPair;

/// Status of a reading relative to its thresholds.
///
/// Variants are declared from least to most healthy, so the derived ordering reads
/// `Unknown < Critical < Warning < Normal`. Among the alertable tiers a smaller value
/// is the more severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Unknown,
    Critical,
    Warning,
    Normal,
}

impl Tier {
    pub fn is_alertable(self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(weight: Option<f64>, thresholds: &ThresholdPair) -> Tier {
    let Some(weight) = weight else {
        return Tier::Unknown;
    };

    if weight.is_nan() {
        Tier::Unknown
    } else if weight >= thresholds.upper() {
        Tier::Normal
    } else if weight >= thresholds.lower() {
        Tier::Warning
    } else {
        Tier::Critical
    }
}
