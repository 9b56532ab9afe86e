//! Core types shared across the combat core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage type tag carried by every hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    /// Ignores every resistance
    True,
    Fire,
    Ice,
    Lightning,
    Poison,
    Magic,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Physical,
            DamageType::True,
            DamageType::Fire,
            DamageType::Ice,
            DamageType::Lightning,
            DamageType::Poison,
            DamageType::Magic,
        ]
    }

    /// Elemental types are mitigated by per-element resistance
    pub fn is_elemental(&self) -> bool {
        !matches!(self, DamageType::Physical | DamageType::True)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::True => "true",
            DamageType::Fire => "fire",
            DamageType::Ice => "ice",
            DamageType::Lightning => "lightning",
            DamageType::Poison => "poison",
            DamageType::Magic => "magic",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity-only reference to an entity (attacker, target, effect source)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(pub String);

impl EntityRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityRef {
    fn from(s: &str) -> Self {
        EntityRef(s.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(s: String) -> Self {
        EntityRef(s)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clamp a value into `[min, max]`, logging when the input was out of range.
///
/// NaN collapses to `min`.
pub(crate) fn clamp_logged(value: f64, min: f64, max: f64, what: &str) -> f64 {
    if value.is_nan() {
        tracing::warn!(what, "NaN clamped to {}", min);
        return min;
    }
    if value < min || value > max {
        tracing::warn!(what, value, min, max, "value outside range, clamping");
    }
    value.clamp(min, max)
}
