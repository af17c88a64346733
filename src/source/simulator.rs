use chrono::{DateTime, Utc};

use crate::measurement::Measurement;

use super::memory::InMemoryMeasurementSource;

const DRAIN_TICKS: u64 = 40;
const DROPOUT_PERIOD: u64 = 53;
const DROPOUT_TICKS: u64 = 3;

struct SimulatedScale {
    scale_id: String,
    capacity: f64,
    offset: u64,
}

/// Produces readings for scales that drain steadily, get refilled, and sometimes go silent.
pub struct WeightSimulator {
    tick: u64,
    scales: Vec<SimulatedScale>,
}

impl WeightSimulator {
    pub fn new<I>(scales: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let scales = scales
            .into_iter()
            .enumerate()
            .map(|(index, (scale_id, capacity))| SimulatedScale {
                scale_id,
                capacity: capacity.max(0.0),
                offset: index as u64 * 7,
            })
            .collect();
        Self { tick: 0, scales }
    }

    pub fn next_readings(&mut self, now: DateTime<Utc>) -> Vec<(String, Measurement)> {
        self.tick = self.tick.saturating_add(1);

        self.scales
            .iter()
            .filter_map(|scale| {
                let step = self.tick + scale.offset;
                if step % DROPOUT_PERIOD >= DROPOUT_PERIOD - DROPOUT_TICKS {
                    return None;
                }

                let drained = (step % DRAIN_TICKS) as f64 / DRAIN_TICKS as f64;
                let wobble = (step as f64 / 3.0).sin() * 0.02 * scale.capacity;
                let weight = (scale.capacity * (1.0 - drained) + wobble).clamp(0.0, scale.capacity);
                Some((scale.scale_id.clone(), Measurement::new(now, weight)))
            })
            .collect()
    }

    pub async fn record_into(
        &mut self,
        source: &InMemoryMeasurementSource,
        now: DateTime<Utc>,
    ) -> usize {
        let readings = self.next_readings(now);
        let count = readings.len();
        for (scale_id, measurement) in readings {
            source.record(&scale_id, measurement).await;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{DROPOUT_PERIOD, WeightSimulator};

    #[test]
    fn weights_stay_within_capacity_and_drop_out_periodically() {
        let mut simulator = WeightSimulator::new([("s1".to_string(), 20.0)]);
        let start = Utc::now();
        let mut silent_ticks = 0;

        for tick in 0..DROPOUT_PERIOD as i64 * 2 {
            let readings = simulator.next_readings(start + Duration::minutes(tick));
            if readings.is_empty() {
                silent_ticks += 1;
            }
            for (_, measurement) in readings {
                assert!((0.0..=20.0).contains(&measurement.weight));
            }
        }

        assert_eq!(silent_ticks, 6);
    }
}
