mod model;
mod thresholds;
mod tier;

pub use model::Measurement;
pub use thresholds::{ThresholdError, ThresholdPair};
pub use tier::{Tier, classify};
