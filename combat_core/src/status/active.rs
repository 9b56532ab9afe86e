//! StatusEffectInstance - An active effect on one target

use super::{EffectIdentity, EffectKind, StatusEffectSpec};
use crate::types::EntityRef;
use serde::{Deserialize, Serialize};

/// What a reapplication did to an existing instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reapplication {
    /// Stack count went up
    Stacked,
    /// Already at the cap, only the duration was restored
    Refreshed,
}

/// An active status effect instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub spec: StatusEffectSpec,
    pub identity: EffectIdentity,
    /// Entity that last applied this effect
    pub source: EntityRef,
    pub target: EntityRef,
    pub remaining_duration: f64,
    /// Time until the next periodic tick
    pub tick_timer: f64,
    pub stacks: u32,
}

impl StatusEffectInstance {
    /// Create a fresh single-stack instance
    pub fn new(spec: StatusEffectSpec, source: EntityRef, target: EntityRef) -> Self {
        StatusEffectInstance {
            identity: spec.identity(),
            remaining_duration: spec.duration(),
            tick_timer: spec.tick_rate(),
            stacks: 1,
            spec,
            source,
            target,
        }
    }

    /// Reapply the same effect: add a stack if below the cap and restore
    /// the full duration either way. The tick timer keeps running.
    pub fn reapply(&mut self, source: EntityRef) -> Reapplication {
        self.source = source;
        self.remaining_duration = self.spec.duration();

        let cap = self.spec.effective_max_stacks();
        if self.stacks < cap {
            self.stacks += 1;
            Reapplication::Stacked
        } else {
            if self.stacks > cap {
                tracing::warn!(
                    identity = %self.identity,
                    stacks = self.stacks,
                    cap,
                    "stack count above cap, clamping"
                );
                self.stacks = cap;
            }
            Reapplication::Refreshed
        }
    }

    /// Check if the effect ran out (inclusive: exactly 0 is expired)
    pub fn is_expired(&self) -> bool {
        self.remaining_duration <= 0.0
    }

    /// Damage dealt by one periodic tick at the current stack count
    pub fn tick_damage(&self) -> f64 {
        match self.spec.kind() {
            EffectKind::DamageOverTime { base_damage, .. } => base_damage * self.stacks as f64,
            _ => 0.0,
        }
    }

    /// Magnitude of a condition at the current stack count
    pub fn condition_magnitude(&self) -> f64 {
        let stacks = self.stacks as f64;
        match self.spec.kind() {
            EffectKind::Slow {
                reduction_per_stack,
                max_reduction,
            } => (reduction_per_stack * stacks).min(*max_reduction),
            EffectKind::Vulnerable {
                amplify_per_stack,
                max_amplify,
            } => (amplify_per_stack * stacks).min(*max_amplify),
            EffectKind::DamageOverTime { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DamageType;

    fn burning() -> StatusEffectSpec {
        StatusEffectSpec::new("burning", EffectKind::dot(DamageType::Fire, 2.0), 5.0, 1.0, 3).unwrap()
    }

    fn instance(spec: StatusEffectSpec) -> StatusEffectInstance {
        StatusEffectInstance::new(spec, "mage".into(), "goblin".into())
    }

    #[test]
    fn test_new_instance() {
        let inst = instance(burning());
        assert_eq!(inst.stacks, 1);
        assert!((inst.remaining_duration - 5.0).abs() < f64::EPSILON);
        assert!((inst.tick_timer - 1.0).abs() < f64::EPSILON);
        assert_eq!(inst.identity, EffectIdentity::from("burning:fire"));
    }

    #[test]
    fn test_reapply_stacks_then_refreshes() {
        let mut inst = instance(burning());
        inst.remaining_duration = 1.0;

        assert_eq!(inst.reapply("mage".into()), Reapplication::Stacked);
        assert_eq!(inst.reapply("mage".into()), Reapplication::Stacked);
        assert_eq!(inst.stacks, 3);

        inst.remaining_duration = 0.5;
        assert_eq!(inst.reapply("rogue".into()), Reapplication::Refreshed);
        assert_eq!(inst.stacks, 3);
        assert!((inst.remaining_duration - 5.0).abs() < f64::EPSILON);
        assert_eq!(inst.source, EntityRef::from("rogue"));
    }

    #[test]
    fn test_tick_damage_scales_with_stacks() {
        let mut inst = instance(burning());
        assert!((inst.tick_damage() - 2.0).abs() < f64::EPSILON);
        inst.reapply("mage".into());
        inst.reapply("mage".into());
        assert!((inst.tick_damage() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_condition_magnitude_capped() {
        let spec = StatusEffectSpec::new(
            "frozen",
            EffectKind::Slow {
                reduction_per_stack: 0.3,
                max_reduction: 0.8,
            },
            2.0,
            0.0,
            5,
        )
        .unwrap();
        let mut inst = instance(spec);
        assert!((inst.condition_magnitude() - 0.3).abs() < 1e-9);
        inst.reapply("mage".into());
        inst.reapply("mage".into());
        // 0.9 capped to 0.8
        assert!((inst.condition_magnitude() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let mut inst = instance(burning());
        inst.remaining_duration = 0.0;
        assert!(inst.is_expired());
        inst.remaining_duration = 0.001;
        assert!(!inst.is_expired());
    }
}
