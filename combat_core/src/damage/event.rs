//! DamageEvent - One instance of prospective damage against a target

use crate::status::{EffectIdentity, StatusEffectSpec};
use crate::types::{clamp_logged, DamageType, EntityRef};
use serde::{Deserialize, Serialize};

/// Maximum crit chance, as a percentage
pub const MAX_CRIT_CHANCE: f64 = 100.0;

/// Where a damage event came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DamageOrigin {
    /// A hit delivered by the trigger/collision layer
    Direct,
    /// Periodic damage synthesized by an active status effect
    StatusTick { identity: EffectIdentity },
}

/// Immutable description of a hit before any resolution happens.
///
/// Values are normalized on construction: the amount is never negative,
/// `crit_chance` is within `[0, 100]` and `crit_multiplier` is at least 1.
/// Out-of-range inputs are clamped and logged.
#[derive(Debug, Clone, Serialize)]
pub struct DamageEvent {
    amount: f64,
    source: EntityRef,
    damage_type: DamageType,
    crit_chance: f64,
    crit_multiplier: f64,
    penetrates_shield: bool,
    status_effects: Vec<StatusEffectSpec>,
    origin: DamageOrigin,
}

impl DamageEvent {
    /// Create a direct hit with no crit chance
    pub fn new(amount: f64, damage_type: DamageType, source: impl Into<EntityRef>) -> Self {
        DamageEvent {
            amount: clamp_logged(amount, 0.0, f64::MAX, "damage amount"),
            source: source.into(),
            damage_type,
            crit_chance: 0.0,
            crit_multiplier: 1.0,
            penetrates_shield: false,
            status_effects: Vec::new(),
            origin: DamageOrigin::Direct,
        }
    }

    /// Create the periodic hit of a damage-over-time effect.
    ///
    /// Tick events never carry status effects.
    pub(crate) fn status_tick(
        identity: EffectIdentity,
        amount: f64,
        damage_type: DamageType,
        source: EntityRef,
    ) -> Self {
        DamageEvent {
            origin: DamageOrigin::StatusTick { identity },
            ..DamageEvent::new(amount, damage_type, source)
        }
    }

    /// Set crit chance (percentage) and crit multiplier
    pub fn with_crit(mut self, chance: f64, multiplier: f64) -> Self {
        self.crit_chance = clamp_logged(chance, 0.0, MAX_CRIT_CHANCE, "crit chance");
        self.crit_multiplier = clamp_logged(multiplier, 1.0, f64::MAX, "crit multiplier");
        self
    }

    /// Mark this hit as bypassing shields
    pub fn penetrating(mut self) -> Self {
        self.penetrates_shield = true;
        self
    }

    /// Attach a status effect to apply on resolution
    pub fn with_status_effect(mut self, spec: StatusEffectSpec) -> Self {
        self.status_effects.push(spec);
        self
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn source(&self) -> &EntityRef {
        &self.source
    }

    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    pub fn crit_chance(&self) -> f64 {
        self.crit_chance
    }

    pub fn crit_multiplier(&self) -> f64 {
        self.crit_multiplier
    }

    pub fn penetrates_shield(&self) -> bool {
        self.penetrates_shield
    }

    pub fn status_effects(&self) -> &[StatusEffectSpec] {
        &self.status_effects
    }

    pub fn origin(&self) -> &DamageOrigin {
        &self.origin
    }

    /// Check if this event was synthesized by a status effect tick
    pub fn is_status_tick(&self) -> bool {
        matches!(self.origin, DamageOrigin::StatusTick { .. })
    }
}
