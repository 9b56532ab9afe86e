//! DefenseProfile - Validated resistance data owned by a defending entity

use super::constants::{MAX_CRIT_RESISTANCE, MAX_RESISTANCE};
use crate::config::ConfigError;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resistance profile checked once at construction.
///
/// Mitigation never re-validates these values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenseProfile {
    physical_resistance: f64,
    crit_resistance: f64,
    default_elemental_resistance: f64,
    elemental_resistance: HashMap<DamageType, f64>,
}

impl Default for DefenseProfile {
    fn default() -> Self {
        DefenseProfile {
            physical_resistance: 0.0,
            crit_resistance: 0.0,
            default_elemental_resistance: 0.0,
            elemental_resistance: HashMap::new(),
        }
    }
}

impl DefenseProfile {
    /// Create a profile with physical, crit and fallback elemental resistance
    pub fn new(
        physical_resistance: f64,
        crit_resistance: f64,
        default_elemental_resistance: f64,
    ) -> Result<Self, ConfigError> {
        Ok(DefenseProfile {
            physical_resistance: check_range(
                "physical_resistance",
                physical_resistance,
                MAX_RESISTANCE,
            )?,
            crit_resistance: check_range("crit_resistance", crit_resistance, MAX_CRIT_RESISTANCE)?,
            default_elemental_resistance: check_range(
                "default_elemental_resistance",
                default_elemental_resistance,
                MAX_RESISTANCE,
            )?,
            elemental_resistance: HashMap::new(),
        })
    }

    /// Set the resistance for one elemental damage type
    pub fn with_elemental(mut self, damage_type: DamageType, value: f64) -> Result<Self, ConfigError> {
        if !damage_type.is_elemental() {
            return Err(ConfigError::ValidationError(format!(
                "{} is not an elemental damage type",
                damage_type
            )));
        }
        let value = check_range(damage_type.as_str(), value, MAX_RESISTANCE)?;
        self.elemental_resistance.insert(damage_type, value);
        Ok(self)
    }

    pub fn physical_resistance(&self) -> f64 {
        self.physical_resistance
    }

    pub fn crit_resistance(&self) -> f64 {
        self.crit_resistance
    }

    pub fn default_elemental_resistance(&self) -> f64 {
        self.default_elemental_resistance
    }

    /// Resistance that applies to a damage type.
    ///
    /// True damage always resolves to zero.
    pub fn resistance_for(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::True => 0.0,
            DamageType::Physical => self.physical_resistance,
            elemental => self
                .elemental_resistance
                .get(&elemental)
                .copied()
                .unwrap_or(self.default_elemental_resistance),
        }
    }
}

fn check_range(field: &str, value: f64, max: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(ConfigError::ValidationError(format!(
            "{} must be within [0, {}], got {}",
            field, max, value
        )));
    }
    Ok(value)
}

/// Per-element resistance entry in authoring data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementalResistance {
    pub damage_type: DamageType,
    pub value: f64,
}

/// Authoring form of a defense profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseConfig {
    #[serde(default)]
    pub physical_resistance: f64,
    #[serde(default)]
    pub crit_resistance: f64,
    #[serde(default)]
    pub default_elemental_resistance: f64,
    #[serde(default)]
    pub elemental: Vec<ElementalResistance>,
}

impl TryFrom<&DefenseConfig> for DefenseProfile {
    type Error = ConfigError;

    fn try_from(config: &DefenseConfig) -> Result<Self, Self::Error> {
        let mut profile = DefenseProfile::new(
            config.physical_resistance,
            config.crit_resistance,
            config.default_elemental_resistance,
        )?;
        for entry in &config.elemental {
            profile = profile.with_elemental(entry.damage_type, entry.value)?;
        }
        Ok(profile)
    }
}
