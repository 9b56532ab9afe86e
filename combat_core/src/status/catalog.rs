//! EffectCatalog - Named status effect definitions loaded at startup

use super::{EffectKind, StatusEffectSpec};
use crate::config::ConfigError;
use crate::types::DamageType;
use std::collections::HashMap;

/// Status effect definitions by name
#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    specs: HashMap<String, StatusEffectSpec>,
}

impl EffectCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        EffectCatalog {
            specs: HashMap::new(),
        }
    }

    /// Validate and register a definition, replacing any with the same name
    pub fn register(&mut self, spec: StatusEffectSpec) -> Result<(), ConfigError> {
        spec.validate()?;
        self.specs.insert(spec.name().to_string(), spec);
        Ok(())
    }

    /// Get a definition by name
    pub fn get(&self, name: &str) -> Option<&StatusEffectSpec> {
        self.specs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Built-in effect set
    pub fn with_defaults() -> Self {
        let mut specs = HashMap::new();
        for spec in default_specs() {
            specs.insert(spec.name().to_string(), spec);
        }
        EffectCatalog { specs }
    }
}

fn default_specs() -> Vec<StatusEffectSpec> {
    vec![
        // Burning - fire DoT, stacks up to 3
        StatusEffectSpec::from_parts(
            "burning".to_string(),
            EffectKind::dot(DamageType::Fire, 2.0),
            5.0,
            1.0,
            true,
            3,
        ),
        // Poisoned - long, weak, deep stacking
        StatusEffectSpec::from_parts(
            "poisoned".to_string(),
            EffectKind::dot(DamageType::Poison, 1.0),
            8.0,
            0.5,
            true,
            10,
        ),
        // Shocked - short lightning DoT that can crit
        StatusEffectSpec::from_parts(
            "shocked".to_string(),
            EffectKind::DamageOverTime {
                    damage_type: DamageType::Lightning,
                    base_damage: 3.0,
                    crit_chance: 25.0,
                    crit_multiplier: 2.0,
                },
            2.0,
            0.5,
            false,
            1,
        ),
        // Chilled - movement slow per stack
        StatusEffectSpec::from_parts(
            "chilled".to_string(),
            EffectKind::Slow {
                    reduction_per_stack: 0.1,
                    max_reduction: 0.5,
                },
            3.0,
            0.0,
            true,
            5,
        ),
        // Frozen - heavy slow, capped short of a full stop
        StatusEffectSpec::from_parts(
            "frozen".to_string(),
            EffectKind::Slow {
                    reduction_per_stack: 0.3,
                    max_reduction: 0.8,
                },
            1.5,
            0.0,
            true,
            3,
        ),
        // Exposed - increases damage taken
        StatusEffectSpec::from_parts(
            "exposed".to_string(),
            EffectKind::Vulnerable {
                    amplify_per_stack: 0.1,
                    max_amplify: 0.3,
                },
            4.0,
            0.0,
            true,
            4,
        ),
    ]
}
