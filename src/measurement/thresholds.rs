use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("upper threshold {upper} must be greater than lower threshold {lower}")]
    Inverted { upper: f64, lower: f64 },
    #[error("thresholds must be finite numbers")]
    NotFinite,
}

/// Upper and lower weight limits for a scale. `upper > lower` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdPair {
    upper: f64,
    lower: f64,
}

impl ThresholdPair {
    pub fn new(upper: f64, lower: f64) -> Result<Self, ThresholdError> {
        if !upper.is_finite() || !lower.is_finite() {
            return Err(ThresholdError::NotFinite);
        }
        if upper <= lower {
            return Err(ThresholdError::Inverted { upper, lower });
        }
        Ok(Self { upper, lower })
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Replaces both limits at once. On error the current pair is kept.
    pub fn update(&mut self, upper: f64, lower: f64) -> Result<(), ThresholdError> {
        *self = Self::new(upper, lower)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ThresholdError, ThresholdPair};

    #[test]
    fn rejects_inverted_and_equal_pairs() {
        assert_eq!(
            ThresholdPair::new(5.0, 10.0),
            Err(ThresholdError::Inverted {
                upper: 5.0,
                lower: 10.0
            })
        );
        assert!(ThresholdPair::new(5.0, 5.0).is_err());
        assert_eq!(
            ThresholdPair::new(f64::NAN, 1.0),
            Err(ThresholdError::NotFinite)
        );
    }

    #[test]
    fn failed_update_keeps_previous_pair() {
        let mut pair = ThresholdPair::new(10.0, 5.0).expect("valid pair");

        assert!(pair.update(3.0, 4.0).is_err());
        assert_eq!(pair.upper(), 10.0);
        assert_eq!(pair.lower(), 5.0);

        pair.update(20.0, 2.5).expect("valid update");
        assert_eq!(pair.upper(), 20.0);
        assert_eq!(pair.lower(), 2.5);
    }
}
