//! Damage resolution - Apply a DamageEvent to a Combatant

use super::crit::{apply_crit, roll_crit};
use super::error::CombatError;
use super::result::ResolutionOutcome;
use crate::damage::DamageEvent;
use crate::defense::{mitigate, DefenseProfile};
use crate::entity::Combatant;
use crate::events::{CombatNotification, NotificationSink};
use crate::ledger::HealthLedger;
use crate::modifier::ModifierPoint;
use rand::Rng;

/// Resolve a damage event against a combatant
///
/// This is the single entry point for every hit, direct or periodic. Steps
/// run in a fixed order:
/// 1. Roll for a crit against the target's crit resistance
/// 2. Multiply by the crit multiplier
/// 3. Mitigate by resistance, then fold damage-taken modifiers
/// 4. Absorb into the shield unless the hit penetrates
/// 5. Apply the overflow to health
/// 6. Emit notifications, reset the shield delay, handle death
/// 7. Apply attached status effects unless the target died
pub fn resolve_damage(
    target: &mut Combatant,
    event: &DamageEvent,
    sink: &mut dyn NotificationSink,
) -> Result<ResolutionOutcome, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_damage_with_rng(target, event, sink, &mut rng)
}

/// Resolve damage with a provided RNG (for deterministic testing)
pub fn resolve_damage_with_rng(
    target: &mut Combatant,
    event: &DamageEvent,
    sink: &mut dyn NotificationSink,
    rng: &mut impl Rng,
) -> Result<ResolutionOutcome, CombatError> {
    let (defense, health) = require_parts(target)?;

    let mut outcome = ResolutionOutcome::new();
    outcome.health_before = health.current();
    outcome.health_after = health.current();

    if health.is_dead() {
        tracing::debug!(target = %target.id, "ignoring damage against dead combatant");
        outcome.target_was_dead = true;
        return Ok(outcome);
    }

    // Steps 1-3: crit, then mitigation, then damage-taken modifiers
    outcome.is_crit = roll_crit(event.crit_chance(), defense.crit_resistance(), rng);
    let pre_mitigation = apply_crit(event.amount(), outcome.is_crit, event.crit_multiplier());
    let mitigated = mitigate(pre_mitigation, event.damage_type(), defense);
    outcome.final_amount = target
        .modifiers
        .apply(ModifierPoint::DamageTaken, mitigated)
        .max(0.0);

    tracing::trace!(
        target = %target.id,
        source = %event.source(),
        damage_type = %event.damage_type(),
        pre_mitigation,
        final_amount = outcome.final_amount,
        is_crit = outcome.is_crit,
        "resolving damage"
    );

    // Step 4: shield absorbs first
    let mut overflow = -outcome.final_amount;
    if let Some(shield) = target.shield.as_mut() {
        if !event.penetrates_shield() && outcome.final_amount > 0.0 {
            let absorption =
                shield.absorb_damage(outcome.final_amount, event.damage_type(), false);
            outcome.shield_absorbed = absorption.absorbed;
            overflow = absorption.overflow;
        }
    }
    if outcome.shield_absorbed > 0.0 {
        target.notify_shield(sink);
    }

    // Step 5: overflow reaches health
    if overflow < 0.0 {
        let change = target.apply_health_delta(overflow, sink);
        outcome.health_delta = change.applied_delta();
        outcome.health_after = change.current;
        outcome.died = change.became_dead;
    }

    // Step 6: hit notifications and death
    if outcome.landed() {
        if outcome.is_crit {
            sink.notify(CombatNotification::CriticalHit {
                target: target.id.clone(),
                source: event.source().clone(),
            });
        }
        sink.notify(CombatNotification::DamageTaken {
            target: target.id.clone(),
            source: event.source().clone(),
            amount: outcome.final_amount,
            damage_type: event.damage_type(),
            is_crit: outcome.is_crit,
        });
        if let Some(shield) = target.shield.as_mut() {
            shield.reset_recharge_delay();
        }
    }

    if outcome.died {
        target.handle_death(Some(event.source().clone()), sink);
        return Ok(outcome);
    }

    // Step 7: status effects ride along even when the shield ate the hit
    if event.status_effects().is_empty() {
        return Ok(outcome);
    }
    if event.is_status_tick() {
        tracing::warn!(
            target = %target.id,
            count = event.status_effects().len(),
            "periodic damage cannot apply status effects, dropping them"
        );
        return Ok(outcome);
    }
    for spec in event.status_effects() {
        let status_event = target.status.apply(spec, event.source(), &mut target.modifiers);
        outcome.effects_applied.push(status_event.identity().clone());
        target.notify_status(status_event, sink);
    }

    Ok(outcome)
}

/// Borrow the parts resolution and ticking need
pub(crate) fn require_parts(
    target: &Combatant,
) -> Result<(&DefenseProfile, &HealthLedger), CombatError> {
    let defense = target
        .defense
        .as_ref()
        .ok_or_else(|| CombatError::MissingDefenseProfile {
            target: target.id.clone(),
        })?;
    let health = target
        .health
        .as_ref()
        .ok_or_else(|| CombatError::MissingHealthLedger {
            target: target.id.clone(),
        })?;
    Ok((defense, health))
}
