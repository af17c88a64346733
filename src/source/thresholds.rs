use std::{collections::HashMap, future::Future};

use thiserror::Error;
use tokio::sync::RwLock;

use crate::measurement::{ThresholdError, ThresholdPair};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdStoreError {
    #[error("no thresholds configured for scale {0}")]
    UnknownScale(String),
    #[error(transparent)]
    Validation(#[from] ThresholdError),
}

pub trait ThresholdStore: Send + Sync {
    fn get_thresholds(
        &self,
        scale_id: &str,
    ) -> impl Future<Output = Result<ThresholdPair, ThresholdStoreError>> + Send;

    /// Replaces both limits. Inverted pairs are rejected and the stored pair is kept.
    fn set_thresholds(
        &self,
        scale_id: &str,
        upper: f64,
        lower: f64,
    ) -> impl Future<Output = Result<ThresholdPair, ThresholdStoreError>> + Send;
}

#[derive(Debug, Default)]
pub struct InMemoryThresholdStore {
    pairs: RwLock<HashMap<String, ThresholdPair>>,
}

impl InMemoryThresholdStore {
    pub fn new(pairs: HashMap<String, ThresholdPair>) -> Self {
        Self {
            pairs: RwLock::new(pairs),
        }
    }
}

impl ThresholdStore for InMemoryThresholdStore {
    async fn get_thresholds(&self, scale_id: &str) -> Result<ThresholdPair, ThresholdStoreError> {
        self.pairs
            .read()
            .await
            .get(scale_id)
            .copied()
            .ok_or_else(|| ThresholdStoreError::UnknownScale(scale_id.to_string()))
    }

    async fn set_thresholds(
        &self,
        scale_id: &str,
        upper: f64,
        lower: f64,
    ) -> Result<ThresholdPair, ThresholdStoreError> {
        let mut pairs = self.pairs.write().await;
        let updated = match pairs.get_mut(scale_id) {
            Some(pair) => {
                pair.update(upper, lower)?;
                *pair
            }
            None => {
                let pair = ThresholdPair::new(upper, lower)?;
                pairs.insert(scale_id.to_string(), pair);
                pair
            }
        };

        log::info!(
            "thresholds_updated scale_id={} upper={} lower={}",
            scale_id,
            updated.upper(),
            updated.lower()
        );
        Ok(updated)
    }
}
