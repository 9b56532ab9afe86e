//! HealthLedger - Clamped health pool with low-health and death signals

use super::percent_of;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Default low-health threshold, as a fraction of max health
pub const DEFAULT_LOW_HEALTH_THRESHOLD: f64 = 0.25;

fn default_low_health_threshold() -> f64 {
    DEFAULT_LOW_HEALTH_THRESHOLD
}

/// Authoring form of a health pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    pub max: f64,
    /// Starting value, defaults to `max`
    #[serde(default)]
    pub current: Option<f64>,
    /// Fraction of max below which the low-health signal fires
    #[serde(default = "default_low_health_threshold")]
    pub low_health_threshold: f64,
}

/// Result of one health mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthChange {
    pub previous: f64,
    pub current: f64,
    /// Health dropped below the low-health threshold on this call
    pub became_low_health: bool,
    /// Health reached zero on this call
    pub became_dead: bool,
}

impl HealthChange {
    /// Signed change actually applied (after clamping)
    pub fn applied_delta(&self) -> f64 {
        self.current - self.previous
    }

    pub fn changed(&self) -> bool {
        self.current != self.previous
    }
}

/// Health pool owned by an entity.
///
/// Positive deltas heal, negative deltas damage. Once dead the ledger is
/// inert: `is_dead` never resets and no further mutation is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthLedger {
    current: f64,
    max: f64,
    is_dead: bool,
    low_health_threshold: f64,
    /// Latched while below the threshold so the signal is edge-triggered
    is_low: bool,
}

impl HealthLedger {
    /// Create a full health pool with the default low-health threshold
    pub fn new(max: f64) -> Result<Self, ConfigError> {
        Self::with_current(max, max)
    }

    /// Create a health pool starting at `current`
    pub fn with_current(current: f64, max: f64) -> Result<Self, ConfigError> {
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "health max must be a non-negative number, got {}",
                max
            )));
        }
        if !current.is_finite() || current < 0.0 || current > max {
            return Err(ConfigError::ValidationError(format!(
                "health current must be within [0, {}], got {}",
                max, current
            )));
        }

        let mut ledger = HealthLedger {
            current,
            max,
            is_dead: false,
            low_health_threshold: DEFAULT_LOW_HEALTH_THRESHOLD,
            is_low: false,
        };
        ledger.is_low = ledger.below_threshold();
        Ok(ledger)
    }

    /// Set the low-health threshold (fraction of max in `[0, 1]`)
    pub fn with_low_health_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ValidationError(format!(
                "low_health_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        self.low_health_threshold = threshold;
        self.is_low = self.below_threshold();
        Ok(self)
    }

    /// Build a health pool from authoring data
    pub fn from_config(config: &HealthConfig) -> Result<Self, ConfigError> {
        HealthLedger::with_current(config.current.unwrap_or(config.max), config.max)?
            .with_low_health_threshold(config.low_health_threshold)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_low_health(&self) -> bool {
        self.is_low
    }

    /// Health as a percentage of max
    pub fn percent(&self) -> f64 {
        percent_of(self.current, self.max)
    }

    fn below_threshold(&self) -> bool {
        self.max > 0.0 && self.current < self.max * self.low_health_threshold
    }

    /// Apply a signed health delta.
    ///
    /// The low-health signal fires only on the call that crosses below the
    /// threshold and re-arms once health recovers to the threshold. Death
    /// fires exactly once, when a damaging delta leaves health at zero.
    pub fn apply(&mut self, delta: f64) -> HealthChange {
        let previous = self.current;
        if self.is_dead || delta.is_nan() {
            return HealthChange {
                previous,
                current: previous,
                ..Default::default()
            };
        }

        self.current = (previous + delta).clamp(0.0, self.max);

        let mut change = HealthChange {
            previous,
            current: self.current,
            ..Default::default()
        };

        if delta < 0.0 && self.current <= 0.0 {
            self.is_dead = true;
            change.became_dead = true;
        }

        let below = self.below_threshold();
        if below && !self.is_low {
            change.became_low_health = true;
        }
        self.is_low = below;

        change
    }

    /// Heal by a positive amount
    pub fn heal(&mut self, amount: f64) -> HealthChange {
        self.apply(amount.max(0.0))
    }

    /// Damage by a positive amount
    pub fn damage(&mut self, amount: f64) -> HealthChange {
        self.apply(-amount.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_damage_and_heal_sign_convention() {
        let mut health = HealthLedger::new(100.0).unwrap();

        let change = health.apply(-30.0);
        assert!((change.current - 70.0).abs() < f64::EPSILON);
        assert!((change.applied_delta() - -30.0).abs() < f64::EPSILON);

        let change = health.apply(10.0);
        assert!((change.current - 80.0).abs() < f64::EPSILON);
        assert!((health.current() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heal_clamped_to_max() {
        let mut health = HealthLedger::with_current(90.0, 100.0).unwrap();
        let change = health.apply(50.0);
        assert!((change.current - 100.0).abs() < f64::EPSILON);
        assert!((change.applied_delta() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_damage_kills_once() {
        let mut health = HealthLedger::with_current(5.0, 100.0).unwrap();

        let change = health.apply(-10.0);
        assert!((health.current() - 0.0).abs() < f64::EPSILON);
        assert!(health.is_dead());
        assert!(change.became_dead);

        let change = health.apply(-10.0);
        assert!((health.current() - 0.0).abs() < f64::EPSILON);
        assert!(health.is_dead());
        assert!(!change.became_dead);
        assert!(!change.changed());
    }

    #[test]
    fn test_dead_ledger_ignores_healing() {
        let mut health = HealthLedger::with_current(5.0, 100.0).unwrap();
        health.apply(-5.0);
        assert!(health.is_dead());

        let change = health.apply(50.0);
        assert!((change.current - 0.0).abs() < f64::EPSILON);
        assert!(health.is_dead());
    }

    #[test]
    fn test_low_health_is_edge_triggered() {
        let mut health = HealthLedger::new(100.0).unwrap();

        assert!(!health.apply(-70.0).became_low_health);
        assert!(health.apply(-10.0).became_low_health);
        // Still low: no repeat signal
        assert!(!health.apply(-5.0).became_low_health);
        assert!(health.is_low_health());

        // Recover above threshold, then drop again: fires again
        health.apply(50.0);
        assert!(!health.is_low_health());
        assert!(health.apply(-60.0).became_low_health);
    }

    #[test]
    fn test_starting_low_does_not_signal() {
        let mut health = HealthLedger::with_current(10.0, 100.0).unwrap();
        assert!(health.is_low_health());
        assert!(!health.apply(-1.0).became_low_health);
    }

    #[test]
    fn test_rejects_degenerate_config() {
        assert!(HealthLedger::new(-1.0).is_err());
        assert!(HealthLedger::new(f64::INFINITY).is_err());
        assert!(HealthLedger::with_current(120.0, 100.0).is_err());
        assert!(HealthLedger::new(100.0)
            .unwrap()
            .with_low_health_threshold(1.5)
            .is_err());
    }

    #[test]
    fn test_from_config() {
        let config = HealthConfig {
            max: 200.0,
            current: Some(150.0),
            low_health_threshold: 0.5,
        };
        let health = HealthLedger::from_config(&config).unwrap();
        assert!((health.current() - 150.0).abs() < f64::EPSILON);
        assert!((health.percent() - 75.0).abs() < f64::EPSILON);
        assert!(!health.is_low_health());
    }

    proptest! {
        #[test]
        fn health_stays_within_bounds(
            max in 1.0f64..1000.0,
            deltas in proptest::collection::vec(-300.0f64..300.0, 1..30),
        ) {
            let mut health = HealthLedger::new(max).unwrap();
            let mut deaths = 0;
            for delta in deltas {
                let change = health.apply(delta);
                prop_assert!(health.current() >= 0.0);
                prop_assert!(health.current() <= health.max());
                if change.became_dead {
                    deaths += 1;
                }
            }
            prop_assert!(deaths <= 1);
        }
    }
}
