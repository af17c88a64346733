use crate::{alerts::AlertEvent, measurement::Tier};

pub fn render_alert_message(event: &AlertEvent) -> String {
    let headline = match event.tier {
        Tier::Critical => "🚨 CRITICAL",
        Tier::Warning => "⚠️ WARNING",
        Tier::Normal | Tier::Unknown => event.tier.label(),
    };
    let unit = if event.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", event.unit)
    };

    format!(
        "{headline}: scale {scale} reads {weight:.2}{unit} (warning below {upper:.2}{unit}, critical below {lower:.2}{unit})\nAt: {at}\nContact: {recipient}",
        scale = event.scale_id,
        weight = event.weight,
        upper = event.thresholds.upper(),
        lower = event.thresholds.lower(),
        at = event.timestamp.format("%Y-%m-%d %H:%M UTC"),
        recipient = event.recipient,
    )
}
