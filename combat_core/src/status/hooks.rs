//! Per-kind lifecycle hooks: apply, stack, tick, remove

use super::{EffectKind, StatusEffectInstance};
use crate::damage::DamageEvent;
use crate::modifier::{ModifierOp, ModifierPoint, ModifierStack};

/// Entry into the active state
pub(crate) fn on_apply(instance: &StatusEffectInstance, modifiers: &mut ModifierStack) {
    if let Some((point, op)) = condition_modifier(instance) {
        modifiers.replace_source(instance.identity.as_str(), point, op);
    }
}

/// Reapplication while active.
///
/// Conditions rebuild their modifier from the new stack count. Damage over
/// time has no derived state: the tick reads the stack count directly.
pub(crate) fn on_stack(instance: &StatusEffectInstance, modifiers: &mut ModifierStack) {
    if instance.spec.kind().is_damage_over_time() {
        return;
    }
    on_remove(instance, modifiers);
    on_apply(instance, modifiers);
}

/// Periodic tick. Only damage over time produces a hit.
pub(crate) fn on_tick(instance: &StatusEffectInstance) -> Option<DamageEvent> {
    match instance.spec.kind() {
        EffectKind::DamageOverTime {
            damage_type,
            crit_chance,
            crit_multiplier,
            ..
        } => Some(
            DamageEvent::status_tick(
                instance.identity.clone(),
                instance.tick_damage(),
                *damage_type,
                instance.source.clone(),
            )
            .with_crit(*crit_chance, *crit_multiplier),
        ),
        _ => None,
    }
}

/// Exit from the active state
pub(crate) fn on_remove(instance: &StatusEffectInstance, modifiers: &mut ModifierStack) {
    if condition_modifier(instance).is_some() {
        modifiers.remove_source(instance.identity.as_str());
    }
}

fn condition_modifier(instance: &StatusEffectInstance) -> Option<(ModifierPoint, ModifierOp)> {
    let magnitude = instance.condition_magnitude();
    match instance.spec.kind() {
        EffectKind::Slow { .. } => Some((
            ModifierPoint::MovementSpeed,
            ModifierOp::Multiply(1.0 - magnitude),
        )),
        EffectKind::Vulnerable { .. } => Some((
            ModifierPoint::DamageTaken,
            ModifierOp::Multiply(1.0 + magnitude),
        )),
        EffectKind::DamageOverTime { .. } => None,
    }
}
