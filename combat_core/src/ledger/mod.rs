//! Resource ledgers - Shield and health pools

mod health;
mod shield;

pub use health::{HealthChange, HealthConfig, HealthLedger, DEFAULT_LOW_HEALTH_THRESHOLD};
pub use shield::{ShieldAbsorption, ShieldConfig, ShieldLedger, ShieldTick, TypeMultiplier};

/// Percentage of `current` relative to `max`, 0 when `max` is 0
pub(crate) fn percent_of(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (current / max * 100.0).clamp(0.0, 100.0)
}
