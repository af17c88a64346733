use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::measurement::ThresholdPair;

use super::state::{ScaleState, ScaleStatus};

/// Per-scale state slots.
///
/// The map lock is held only long enough to find or create a slot; callers then lock
/// that one scale, so evaluations for different scales run independently.
#[derive(Debug, Default)]
pub struct ScaleStateStore {
    slots: RwLock<HashMap<String, Arc<Mutex<ScaleState>>>>,
}

impl ScaleStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn slot(
        &self,
        scale_id: &str,
        thresholds: ThresholdPair,
    ) -> Arc<Mutex<ScaleState>> {
        if let Some(slot) = self.slots.read().await.get(scale_id) {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().await;
        Arc::clone(
            slots
                .entry(scale_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ScaleState::new(scale_id, thresholds)))),
        )
    }

    pub(crate) async fn existing_slot(&self, scale_id: &str) -> Option<Arc<Mutex<ScaleState>>> {
        self.slots.read().await.get(scale_id).cloned()
    }

    pub async fn status(&self, scale_id: &str) -> Option<ScaleStatus> {
        let slot = self.existing_slot(scale_id).await?;
        let state = slot.lock().await;
        Some(state.status())
    }

    pub async fn statuses(&self) -> Vec<ScaleStatus> {
        let slots: Vec<_> = self.slots.read().await.values().cloned().collect();
        let mut statuses = Vec::with_capacity(slots.len());
        for slot in slots {
            statuses.push(slot.lock().await.status());
        }
        statuses.sort_by(|left, right| left.scale_id.cmp(&right.scale_id));
        statuses
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}
