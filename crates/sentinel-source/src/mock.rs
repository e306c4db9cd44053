//! Synthetic web traffic.
//!
//! Stands in for a real ingestion feed. Each batch holds a fixed amount of
//! background traffic spread across a small pool of ordinary addresses and,
//! with a configurable probability, a burst from a single bot address large
//! enough to cross the critical threshold.
//!
//! All randomness stays inside [`MockTrafficSource`]; the detector and
//! publisher only ever see the finished batch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::SourceError;
use crate::EventSource;

/// Ordinary addresses that make up background traffic.
pub const BACKGROUND_ADDRESSES: [&str; 4] =
    ["192.168.1.1", "192.168.1.2", "192.168.1.3", "10.0.0.5"];

/// Address used for injected attack bursts.
pub const BOT_ADDRESS: &str = "66.66.66.66";

/// Parameters for [`MockTrafficSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockTrafficConfig {
    /// Background events per batch.
    pub background_events: usize,
    /// Events in an injected attack burst.
    pub attack_events: usize,
    /// Probability in `[0, 1]` that a batch contains an attack burst.
    pub attack_probability: f64,
    /// Seed for reproducible batches. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MockTrafficConfig {
    fn default() -> Self {
        Self {
            background_events: 50,
            attack_events: 30,
            attack_probability: 0.5,
            seed: None,
        }
    }
}

impl MockTrafficConfig {
    /// Check that the parameters describe a usable source.
    pub fn validate(&self) -> Result<(), SourceError> {
        if !(0.0..=1.0).contains(&self.attack_probability) {
            return Err(SourceError::Config(format!(
                "attack_probability must be within [0, 1], got {}",
                self.attack_probability
            )));
        }
        Ok(())
    }
}

/// Randomized traffic generator.
#[derive(Debug)]
pub struct MockTrafficSource {
    config: MockTrafficConfig,
    rng: StdRng,
}

impl MockTrafficSource {
    /// Create a generator from validated parameters.
    pub fn new(config: MockTrafficConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self { config, rng })
    }

    /// The parameters this generator was built with.
    pub const fn config(&self) -> &MockTrafficConfig {
        &self.config
    }

    fn background_event(&mut self) -> Value {
        let idx = self.rng.random_range(0..BACKGROUND_ADDRESSES.len());
        let address = BACKGROUND_ADDRESSES.get(idx).copied().unwrap_or(BOT_ADDRESS);
        json!({ "ip": address })
    }
}

impl EventSource for MockTrafficSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn next_batch(&mut self) -> Result<Vec<Value>, SourceError> {
        let mut events = Vec::with_capacity(
            self.config
                .background_events
                .saturating_add(self.config.attack_events),
        );

        for _ in 0..self.config.background_events {
            events.push(self.background_event());
        }

        if self.rng.random_bool(self.config.attack_probability) {
            info!(
                address = BOT_ADDRESS,
                events = self.config.attack_events,
                "injecting attack traffic"
            );
            events.extend(
                std::iter::repeat_with(|| json!({ "ip": BOT_ADDRESS }))
                    .take(self.config.attack_events),
            );
        }

        debug!(events = events.len(), "mock batch generated");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use sentinel_types::AddressedEvent;

    use super::*;

    fn config(attack_probability: f64, seed: u64) -> MockTrafficConfig {
        MockTrafficConfig {
            attack_probability,
            seed: Some(seed),
            ..MockTrafficConfig::default()
        }
    }

    fn bot_events(batch: &[Value]) -> usize {
        batch
            .iter()
            .filter(|e| e.address() == Some(BOT_ADDRESS))
            .count()
    }

    #[test]
    fn quiet_batch_is_background_only() {
        let mut source = MockTrafficSource::new(config(0.0, 7)).ok();
        let batch = source
            .as_mut()
            .and_then(|s| s.next_batch().ok())
            .unwrap_or_default();

        assert_eq!(batch.len(), 50);
        assert_eq!(bot_events(&batch), 0);
        assert!(batch.iter().all(|e| {
            e.address()
                .is_some_and(|a| BACKGROUND_ADDRESSES.contains(&a))
        }));
    }

    #[test]
    fn certain_attack_adds_bot_burst() {
        let mut source = MockTrafficSource::new(config(1.0, 7)).ok();
        let batch = source
            .as_mut()
            .and_then(|s| s.next_batch().ok())
            .unwrap_or_default();

        assert_eq!(batch.len(), 80);
        assert_eq!(bot_events(&batch), 30);
    }

    #[test]
    fn attack_burst_is_critical() {
        let mut source = MockTrafficSource::new(config(1.0, 11)).ok();
        let batch = source
            .as_mut()
            .and_then(|s| s.next_batch().ok())
            .unwrap_or_default();

        let summaries = sentinel_detector::detect_with_clock(&batch, &sentinel_detector::SystemClock)
            .unwrap_or_default();
        let bot = summaries.iter().find(|s| s.address == BOT_ADDRESS);
        assert_eq!(
            bot.map(|s| s.classification),
            Some(sentinel_types::Classification::Critical)
        );
    }

    #[test]
    fn same_seed_same_batches() {
        let mut a = MockTrafficSource::new(config(0.5, 42)).ok();
        let mut b = MockTrafficSource::new(config(0.5, 42)).ok();

        for _ in 0..5 {
            let batch_a = a.as_mut().and_then(|s| s.next_batch().ok());
            let batch_b = b.as_mut().and_then(|s| s.next_batch().ok());
            assert!(batch_a.is_some());
            assert_eq!(batch_a, batch_b);
        }
    }

    #[test]
    fn rejects_out_of_range_probability() {
        assert!(matches!(
            MockTrafficSource::new(config(1.5, 1)),
            Err(SourceError::Config(_))
        ));
        assert!(matches!(
            MockTrafficSource::new(config(f64::NAN, 1)),
            Err(SourceError::Config(_))
        ));
    }
}
