//! ShieldLedger - Capped shield pool with delayed recharge

use super::percent_of;
use crate::config::ConfigError;
use crate::types::{clamp_logged, DamageType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of routing a hit through a shield
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShieldAbsorption {
    /// Shield points removed by this hit
    pub absorbed: f64,
    /// Damage left for health, as a non-positive delta (0 = fully absorbed)
    pub overflow: f64,
}

impl ShieldAbsorption {
    fn pass_through(incoming: f64) -> Self {
        ShieldAbsorption {
            absorbed: 0.0,
            overflow: -incoming,
        }
    }

    /// Check if any damage is left for health
    pub fn has_overflow(&self) -> bool {
        self.overflow < 0.0
    }
}

/// Result of advancing the shield timer by one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShieldTick {
    /// Shield points restored this step
    pub recharged: f64,
    /// The recharge delay ran out during this step
    pub started_recharging: bool,
}

/// Per-damage-type shield multiplier in authoring data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMultiplier {
    pub damage_type: DamageType,
    pub multiplier: f64,
}

/// Authoring form of a shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldConfig {
    pub max: f64,
    /// Starting value, defaults to `max`
    #[serde(default)]
    pub current: Option<f64>,
    /// Shield restored per second once recharging
    #[serde(default)]
    pub recharge_rate: f64,
    /// Seconds without damage before recharging starts
    #[serde(default)]
    pub recharge_delay: f64,
    #[serde(default)]
    pub type_multipliers: Vec<TypeMultiplier>,
}

/// Shield pool owned by a defending entity.
///
/// `0 <= current <= max` holds after every operation. Every absorbed hit
/// restarts the recharge delay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShieldLedger {
    current: f64,
    max: f64,
    recharge_rate: f64,
    recharge_delay: f64,
    delay_remaining: f64,
    is_recharging: bool,
    type_multipliers: HashMap<DamageType, f64>,
}

impl ShieldLedger {
    /// Create a shield with no recharge
    pub fn new(current: f64, max: f64) -> Result<Self, ConfigError> {
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield max must be a non-negative number, got {}",
                max
            )));
        }
        if !current.is_finite() || current < 0.0 || current > max {
            return Err(ConfigError::ValidationError(format!(
                "shield current must be within [0, {}], got {}",
                max, current
            )));
        }

        Ok(ShieldLedger {
            current,
            max,
            recharge_rate: 0.0,
            recharge_delay: 0.0,
            delay_remaining: 0.0,
            is_recharging: false,
            type_multipliers: HashMap::new(),
        })
    }

    /// Build a shield from authoring data
    pub fn from_config(config: &ShieldConfig) -> Result<Self, ConfigError> {
        let mut shield = ShieldLedger::new(config.current.unwrap_or(config.max), config.max)?
            .with_recharge(config.recharge_rate, config.recharge_delay)?;
        for entry in &config.type_multipliers {
            shield = shield.with_type_multiplier(entry.damage_type, entry.multiplier)?;
        }
        Ok(shield)
    }

    /// Set recharge rate (per second) and delay (seconds)
    pub fn with_recharge(mut self, rate: f64, delay: f64) -> Result<Self, ConfigError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield recharge_rate must be a non-negative number, got {}",
                rate
            )));
        }
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield recharge_delay must be a non-negative number, got {}",
                delay
            )));
        }
        self.recharge_rate = rate;
        self.recharge_delay = delay;
        Ok(self)
    }

    /// Scale how hard a damage type hits the shield (e.g. 2.0 = double shield damage)
    pub fn with_type_multiplier(
        mut self,
        damage_type: DamageType,
        multiplier: f64,
    ) -> Result<Self, ConfigError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield multiplier for {} must be positive, got {}",
                damage_type, multiplier
            )));
        }
        self.type_multipliers.insert(damage_type, multiplier);
        Ok(self)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn recharge_rate(&self) -> f64 {
        self.recharge_rate
    }

    pub fn delay_remaining(&self) -> f64 {
        self.delay_remaining
    }

    pub fn is_recharging(&self) -> bool {
        self.is_recharging
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Shield as a percentage of max
    pub fn percent(&self) -> f64 {
        percent_of(self.current, self.max)
    }

    /// Multiplier applied to a damage type before absorption
    pub fn type_multiplier(&self, damage_type: DamageType) -> f64 {
        self.type_multipliers.get(&damage_type).copied().unwrap_or(1.0)
    }

    /// Absorb a mitigated hit.
    ///
    /// Returns the absorbed amount and the overflow as a non-positive delta
    /// for health. Penetrating hits and an empty shield pass everything
    /// through untouched. A type multiplier scales the whole hit, so the
    /// overflow stays in adjusted units.
    pub fn absorb_damage(
        &mut self,
        incoming: f64,
        damage_type: DamageType,
        penetrates: bool,
    ) -> ShieldAbsorption {
        if incoming <= 0.0 {
            return ShieldAbsorption::default();
        }
        if penetrates || self.current <= 0.0 {
            return ShieldAbsorption::pass_through(incoming);
        }

        let multiplier = self.type_multiplier(damage_type);
        let adjusted = incoming * multiplier;
        let absorbed = self.current.min(adjusted);
        self.current = clamp_logged(self.current - absorbed, 0.0, self.max, "shield current");
        self.reset_recharge_delay();

        ShieldAbsorption {
            absorbed,
            overflow: -(adjusted - absorbed),
        }
    }

    /// Restore shield, capped at max. Returns the amount actually restored.
    pub fn recharge(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - before
    }

    /// Restart the recharge delay and stop any active recharge
    pub fn reset_recharge_delay(&mut self) {
        self.delay_remaining = self.recharge_delay;
        self.is_recharging = false;
    }

    /// Advance the recharge timer using the configured rate
    pub fn tick(&mut self, dt: f64) -> ShieldTick {
        self.tick_with_rate(dt, self.recharge_rate)
    }

    /// Advance the recharge timer with an explicit per-second rate
    pub fn tick_with_rate(&mut self, dt: f64, rate: f64) -> ShieldTick {
        let dt = clamp_logged(dt, 0.0, f64::MAX, "shield tick dt");
        let mut result = ShieldTick::default();

        if !self.is_recharging {
            self.delay_remaining = (self.delay_remaining - dt).max(0.0);
            if self.delay_remaining <= 0.0 {
                self.is_recharging = true;
                result.started_recharging = true;
            }
        }

        if self.is_recharging && rate > 0.0 {
            result.recharged = self.recharge(rate * dt);
        }

        result
    }
}
