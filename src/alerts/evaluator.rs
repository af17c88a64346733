use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::measurement::{ThresholdPair, Tier, classify};

use super::{
    event::AlertEvent,
    route::AlertRoutes,
    state::ScaleState,
    store::ScaleStateStore,
};

const UNROUTED_CHANNEL: &str = "unrouted";

pub struct AlertEvaluator {
    store: Arc<ScaleStateStore>,
    routes: AlertRoutes,
}

impl AlertEvaluator {
    pub fn new(store: Arc<ScaleStateStore>, routes: AlertRoutes) -> Self {
        Self { store, routes }
    }

    pub fn store(&self) -> &Arc<ScaleStateStore> {
        &self.store
    }

    /// Classifies `weight` and decides whether an alert fires for `scale_id`.
    ///
    /// At most one alert fires per unbroken excursion into a tier. Escalating to a more
    /// severe tier fires again; easing back to a milder alertable tier does not. Only a
    /// `Normal` reading re-arms. An `Unknown` reading changes the classification but keeps
    /// the alert memory. A reading older than the last accepted reading for the same
    /// scale is rejected without touching state; `Unknown` evaluations carry no reading
    /// and are never ordered. State is created by the first real reading, so an
    /// `Unknown` evaluation of a never-observed scale leaves the store untouched.
    pub async fn evaluate(
        &self,
        scale_id: &str,
        weight: Option<f64>,
        thresholds: ThresholdPair,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        let tier = classify(weight, &thresholds);
        let slot = match weight {
            Some(_) => self.store.slot(scale_id, thresholds).await,
            None => match self.store.existing_slot(scale_id).await {
                Some(slot) => slot,
                None => {
                    log::debug!("scale_not_yet_observed scale_id={}", scale_id);
                    return None;
                }
            },
        };
        let mut state = slot.lock().await;

        if weight.is_some()
            && let Some(last) = state.last_evaluated_at
            && now < last
        {
            state.out_of_order_rejections += 1;
            log::warn!(
                "alert_evaluation_out_of_order scale_id={} at={} last_evaluated_at={} rejections={}",
                scale_id,
                now.to_rfc3339(),
                last.to_rfc3339(),
                state.out_of_order_rejections
            );
            return None;
        }

        state.thresholds = thresholds;
        if weight.is_some() {
            state.last_evaluated_at = Some(now);
        }
        state.last_classification = tier;

        tracing::info!(
            target: "monitor",
            module = "alerts",
            scale_id = scale_id,
            weight = weight,
            tier = tier.label(),
            upper = thresholds.upper(),
            lower = thresholds.lower(),
            last_alert_tier = state.last_alert_tier.map(Tier::label),
            "scale_evaluated"
        );

        match (tier, weight) {
            (Tier::Normal, _) => {
                if state.last_alert_tier.take().is_some() {
                    log::info!("alert_rearmed scale_id={}", scale_id);
                }
                None
            }
            (Tier::Warning | Tier::Critical, Some(weight)) => {
                self.fire_if_new(&mut state, tier, weight, now)
            }
            _ => None,
        }
    }

    fn fire_if_new(
        &self,
        state: &mut ScaleState,
        tier: Tier,
        weight: f64,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        if let Some(previous) = state.last_alert_tier
            && previous <= tier
        {
            log::debug!(
                "alert_suppressed scale_id={} tier={} last_alert_tier={}",
                state.scale_id,
                tier,
                previous
            );
            return None;
        }

        state.last_alert_tier = Some(tier);
        state.last_alert_sent_at = Some(now);

        let (channel, recipient, unit) = match self.routes.resolve(&state.scale_id) {
            Some(route) => (
                route.channel.clone(),
                route.recipient.clone(),
                route.unit.clone(),
            ),
            None => {
                log::warn!("alert_route_missing scale_id={}", state.scale_id);
                (UNROUTED_CHANNEL.to_string(), String::new(), String::new())
            }
        };

        Some(AlertEvent {
            scale_id: state.scale_id.clone(),
            tier,
            weight,
            unit,
            thresholds: state.thresholds,
            timestamp: now,
            channel,
            recipient,
        })
    }
}
