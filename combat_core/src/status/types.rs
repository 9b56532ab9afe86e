//! Status effect definitions

use crate::config::ConfigError;
use crate::damage::MAX_CRIT_CHANCE;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry key deciding whether a new application stacks onto an
/// existing instance.
///
/// Damage-over-time effects are keyed by name and damage type
/// (`"burning:fire"`), conditions by name alone (`"chilled"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectIdentity(pub String);

impl EffectIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectIdentity {
    fn from(s: &str) -> Self {
        EffectIdentity(s.to_string())
    }
}

impl From<String> for EffectIdentity {
    fn from(s: String) -> Self {
        EffectIdentity(s)
    }
}

impl fmt::Display for EffectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_crit_multiplier() -> f64 {
    1.0
}

/// What an effect does while active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Periodic damage: `base_damage * stacks` every `tick_rate` seconds
    DamageOverTime {
        damage_type: DamageType,
        base_damage: f64,
        #[serde(default)]
        crit_chance: f64,
        #[serde(default = "default_crit_multiplier")]
        crit_multiplier: f64,
    },
    /// Movement speed reduction, `min(reduction_per_stack * stacks, max_reduction)`
    Slow {
        reduction_per_stack: f64,
        max_reduction: f64,
    },
    /// Damage taken increase, `min(amplify_per_stack * stacks, max_amplify)`
    Vulnerable {
        amplify_per_stack: f64,
        max_amplify: f64,
    },
}

impl EffectKind {
    /// Damage-over-time with no crit chance
    pub fn dot(damage_type: DamageType, base_damage: f64) -> Self {
        EffectKind::DamageOverTime {
            damage_type,
            base_damage,
            crit_chance: 0.0,
            crit_multiplier: 1.0,
        }
    }

    pub fn is_damage_over_time(&self) -> bool {
        matches!(self, EffectKind::DamageOverTime { .. })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            EffectKind::DamageOverTime {
                base_damage,
                crit_chance,
                crit_multiplier,
                ..
            } => {
                non_negative("base_damage", *base_damage)?;
                if !crit_chance.is_finite() || !(0.0..=MAX_CRIT_CHANCE).contains(crit_chance) {
                    return Err(invalid("crit_chance", *crit_chance, "must be within [0, 100]"));
                }
                if !crit_multiplier.is_finite() || *crit_multiplier < 1.0 {
                    return Err(invalid("crit_multiplier", *crit_multiplier, "must be at least 1"));
                }
            }
            EffectKind::Slow {
                reduction_per_stack,
                max_reduction,
            } => {
                fraction("reduction_per_stack", *reduction_per_stack)?;
                fraction("max_reduction", *max_reduction)?;
            }
            EffectKind::Vulnerable {
                amplify_per_stack,
                max_amplify,
            } => {
                non_negative("amplify_per_stack", *amplify_per_stack)?;
                non_negative("max_amplify", *max_amplify)?;
            }
        }
        Ok(())
    }
}

/// Shortest allowed interval between periodic ticks, in seconds
pub const MIN_TICK_RATE: f64 = 0.01;

/// Most ticks one application may fire over its full duration
pub const MAX_TICKS_PER_APPLICATION: u32 = 10_000;

fn default_stackable() -> bool {
    true
}

fn default_max_stacks() -> u32 {
    1
}

/// Unvalidated authoring form, checked on the way into [`StatusEffectSpec`]
#[derive(Debug, Clone, Deserialize)]
struct StatusEffectFields {
    name: String,
    duration: f64,
    #[serde(default)]
    tick_rate: f64,
    #[serde(default = "default_stackable")]
    stackable: bool,
    #[serde(default = "default_max_stacks")]
    max_stacks: u32,
    kind: EffectKind,
}

/// Authored definition of a status effect.
///
/// Only constructed through [`StatusEffectSpec::new`] or deserialization,
/// both of which validate, so every spec in circulation is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatusEffectFields")]
pub struct StatusEffectSpec {
    name: String,
    duration: f64,
    tick_rate: f64,
    stackable: bool,
    max_stacks: u32,
    kind: EffectKind,
}

impl TryFrom<StatusEffectFields> for StatusEffectSpec {
    type Error = ConfigError;

    fn try_from(fields: StatusEffectFields) -> Result<Self, Self::Error> {
        let spec = StatusEffectSpec::from_parts(
            fields.name,
            fields.kind,
            fields.duration,
            fields.tick_rate,
            fields.stackable,
            fields.max_stacks,
        );
        spec.validate()?;
        Ok(spec)
    }
}

impl StatusEffectSpec {
    /// Create and validate a spec
    pub fn new(
        name: impl Into<String>,
        kind: EffectKind,
        duration: f64,
        tick_rate: f64,
        max_stacks: u32,
    ) -> Result<Self, ConfigError> {
        let spec = StatusEffectSpec::from_parts(name.into(), kind, duration, tick_rate, true, max_stacks);
        spec.validate()?;
        Ok(spec)
    }

    /// Assemble a spec without validation. Only for built-in definitions,
    /// which are covered by the catalog tests.
    pub(crate) fn from_parts(
        name: String,
        kind: EffectKind,
        duration: f64,
        tick_rate: f64,
        stackable: bool,
        max_stacks: u32,
    ) -> Self {
        StatusEffectSpec {
            name,
            duration,
            tick_rate,
            stackable,
            max_stacks,
            kind,
        }
    }

    /// Reapplication only refreshes duration
    pub fn non_stackable(mut self) -> Self {
        self.stackable = false;
        self
    }

    /// Effect type name (e.g. "burning", "chilled")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full duration in seconds, restored on every application
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds between periodic ticks (0 = never ticks)
    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    pub fn max_stacks(&self) -> u32 {
        self.max_stacks
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    /// Check authored values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "status effect name must not be empty".to_string(),
            ));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(invalid("duration", self.duration, "must be positive"));
        }
        non_negative("tick_rate", self.tick_rate)?;
        if self.kind.is_damage_over_time() {
            if self.tick_rate < MIN_TICK_RATE {
                return Err(invalid(
                    "tick_rate",
                    self.tick_rate,
                    "must be at least 0.01 for damage over time",
                ));
            }
            if self.tick_count() > MAX_TICKS_PER_APPLICATION {
                return Err(ConfigError::ValidationError(format!(
                    "{}: {} ticks per application exceeds the limit of {}",
                    self.name,
                    self.tick_count(),
                    MAX_TICKS_PER_APPLICATION
                )));
            }
        }
        if self.max_stacks == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: max_stacks must be at least 1",
                self.name
            )));
        }
        self.kind.validate().map_err(|e| match e {
            ConfigError::ValidationError(msg) => {
                ConfigError::ValidationError(format!("{}: {}", self.name, msg))
            }
            other => other,
        })
    }

    /// Key used to find an existing instance on the target
    pub fn identity(&self) -> EffectIdentity {
        match &self.kind {
            EffectKind::DamageOverTime { damage_type, .. } => {
                EffectIdentity(format!("{}:{}", self.name, damage_type))
            }
            _ => EffectIdentity(self.name.clone()),
        }
    }

    /// Stack cap, 1 when the effect does not stack
    pub fn effective_max_stacks(&self) -> u32 {
        if self.stackable {
            self.max_stacks.max(1)
        } else {
            1
        }
    }

    /// Check if this effect fires a tick hook
    pub fn is_periodic(&self) -> bool {
        self.kind.is_damage_over_time() && self.tick_rate > 0.0
    }

    /// Number of ticks over the full duration
    pub fn tick_count(&self) -> u32 {
        if !self.is_periodic() {
            return 0;
        }
        (self.duration / self.tick_rate).floor().min(u32::MAX as f64) as u32
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> ConfigError {
    ConfigError::ValidationError(format!("{} {}, got {}", field, reason, value))
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be a non-negative number"));
    }
    Ok(())
}

fn fraction(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, value, "must be within [0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burning() -> StatusEffectSpec {
        StatusEffectSpec::new("burning", EffectKind::dot(DamageType::Fire, 2.0), 5.0, 1.0, 3).unwrap()
    }

    #[test]
    fn test_dot_identity_includes_damage_type() {
        assert_eq!(burning().identity(), EffectIdentity::from("burning:fire"));
    }

    #[test]
    fn test_condition_identity_is_name() {
        let chilled = StatusEffectSpec::new(
            "chilled",
            EffectKind::Slow {
                reduction_per_stack: 0.1,
                max_reduction: 0.5,
            },
            3.0,
            0.0,
            5,
        )
        .unwrap();
        assert_eq!(chilled.identity(), EffectIdentity::from("chilled"));
        assert!(!chilled.is_periodic());
    }

    #[test]
    fn test_non_stackable_caps_at_one() {
        let spec = burning().non_stackable();
        assert_eq!(spec.effective_max_stacks(), 1);
        assert_eq!(burning().effective_max_stacks(), 3);
    }

    #[test]
    fn test_tick_count() {
        // 5s at one tick per second
        assert_eq!(burning().tick_count(), 5);
    }

    #[test]
    fn test_rejects_degenerate_specs() {
        let dot = EffectKind::dot(DamageType::Fire, 2.0);
        assert!(StatusEffectSpec::new("burning", dot.clone(), 0.0, 1.0, 1).is_err());
        assert!(StatusEffectSpec::new("burning", dot.clone(), f64::NAN, 1.0, 1).is_err());
        assert!(StatusEffectSpec::new("burning", dot.clone(), 5.0, 0.0, 1).is_err());
        assert!(StatusEffectSpec::new("burning", dot.clone(), 5.0, 1.0, 0).is_err());
        assert!(StatusEffectSpec::new("", dot, 5.0, 1.0, 1).is_err());
        assert!(StatusEffectSpec::new("burning", EffectKind::dot(DamageType::Fire, -1.0), 5.0, 1.0, 1).is_err());
        assert!(StatusEffectSpec::new(
            "chilled",
            EffectKind::Slow {
                reduction_per_stack: 1.5,
                max_reduction: 0.5,
            },
            3.0,
            0.0,
            1,
        )
        .is_err());
    }

    #[test]
    fn test_rejects_tick_rate_below_floor() {
        let dot = EffectKind::dot(DamageType::Fire, 1.0);
        assert!(StatusEffectSpec::new("burning", dot.clone(), 5.0, 1e-6, 1).is_err());
        assert!(StatusEffectSpec::new("burning", dot.clone(), 5.0, 0.009, 1).is_err());
        assert!(StatusEffectSpec::new("burning", dot.clone(), 5.0, MIN_TICK_RATE, 1).is_ok());
        // Conditions never tick, so their tick rate is free
        let slow = EffectKind::Slow {
            reduction_per_stack: 0.1,
            max_reduction: 0.5,
        };
        assert!(StatusEffectSpec::new("chilled", slow, 5.0, 1e-6, 1).is_ok());
    }

    #[test]
    fn test_rejects_too_many_ticks() {
        let dot = EffectKind::dot(DamageType::Poison, 1.0);
        assert!(StatusEffectSpec::new("poisoned", dot.clone(), 100.0, 0.01, 1).is_ok());
        assert!(StatusEffectSpec::new("poisoned", dot, 1_000.0, 0.01, 1).is_err());
    }

    #[test]
    fn test_deserialization_validates() {
        let valid = r#"{"name":"burning","duration":5.0,"tick_rate":1.0,
            "kind":{"type":"damage_over_time","damage_type":"fire","base_damage":2.0}}"#;
        let spec: StatusEffectSpec = serde_json::from_str(valid).unwrap();
        assert!(spec.is_stackable());
        assert_eq!(spec.max_stacks(), 1);

        let too_fast = valid.replace("\"tick_rate\":1.0", "\"tick_rate\":0.000001");
        assert!(serde_json::from_str::<StatusEffectSpec>(&too_fast).is_err());

        let negative = valid.replace("\"duration\":5.0", "\"duration\":-5.0");
        assert!(serde_json::from_str::<StatusEffectSpec>(&negative).is_err());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&EffectKind::dot(DamageType::Poison, 3.0)).unwrap();
        assert!(json.contains("damage_over_time"));
        assert!(json.contains("poison"));
    }
}
