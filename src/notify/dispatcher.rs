use std::time::Duration;

use serde::Serialize;

use crate::alerts::AlertEvent;

use super::{
    channel::NotificationChannel, message::render_alert_message, recipient::validate_recipient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryErrorKind {
    Validation,
    Channel,
    Timeout,
}

impl DeliveryErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "DELIVERY_VALIDATION_ERROR",
            Self::Channel => "DELIVERY_CHANNEL_ERROR",
            Self::Timeout => "DELIVERY_TIMEOUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub success: bool,
    pub delivery_id: Option<String>,
    pub error_kind: Option<DeliveryErrorKind>,
    pub detail: Option<String>,
}

impl DeliveryResult {
    fn delivered(delivery_id: String) -> Self {
        Self {
            success: true,
            delivery_id: Some(delivery_id),
            error_kind: None,
            detail: None,
        }
    }

    fn failed(kind: DeliveryErrorKind, detail: String) -> Self {
        Self {
            success: false,
            delivery_id: None,
            error_kind: Some(kind),
            detail: Some(detail),
        }
    }
}

/// Formats alerts and hands them to a channel, once, within a time limit.
pub struct NotificationDispatcher<C> {
    channel: C,
    timeout: Duration,
}

impl<C: NotificationChannel> NotificationDispatcher<C> {
    pub fn new(channel: C, timeout: Duration) -> Self {
        Self { channel, timeout }
    }

    pub async fn dispatch(&self, event: &AlertEvent) -> DeliveryResult {
        if let Err(error) = validate_recipient(&event.recipient) {
            log::error!(
                "alert_dispatch_rejected scale_id={} recipient={:?} code={} error={}",
                event.scale_id,
                event.recipient,
                DeliveryErrorKind::Validation.code(),
                error
            );
            return DeliveryResult::failed(DeliveryErrorKind::Validation, error.to_string());
        }

        let message = render_alert_message(event);
        let outcome = tokio::time::timeout(
            self.timeout,
            self.channel.send(&event.recipient, &message),
        )
        .await;

        let result = match outcome {
            Ok(Ok(delivery_id)) => DeliveryResult::delivered(delivery_id),
            Ok(Err(error)) => DeliveryResult::failed(DeliveryErrorKind::Channel, error.to_string()),
            Err(_) => DeliveryResult::failed(
                DeliveryErrorKind::Timeout,
                format!("channel did not answer within {}s", self.timeout.as_secs_f64()),
            ),
        };

        if result.success {
            log::info!(
                "alert_dispatched scale_id={} tier={} channel={} delivery_id={}",
                event.scale_id,
                event.tier,
                self.channel.name(),
                result.delivery_id.as_deref().unwrap_or_default()
            );
        } else {
            log::error!(
                "CRITICAL: alert_dispatch_failed scale_id={} tier={} channel={} code={} detail={}",
                event.scale_id,
                event.tier,
                self.channel.name(),
                result.error_kind.map(DeliveryErrorKind::code).unwrap_or_default(),
                result.detail.as_deref().unwrap_or_default()
            );
        }

        result
    }
}
