//! Per-frame driver - Advance a combatant's shield and status effects

use super::error::CombatError;
use super::resolution::{require_parts, resolve_damage_with_rng};
use super::result::TickOutcome;
use crate::entity::Combatant;
use crate::events::NotificationSink;
use crate::modifier::ModifierPoint;
use crate::types::clamp_logged;
use rand::Rng;

/// Advance a combatant by `dt` seconds
///
/// Call once per combatant per simulation step. The shield recharges first,
/// then status effects tick, then each periodic hit is resolved in order.
pub fn tick_combatant(
    target: &mut Combatant,
    dt: f64,
    sink: &mut dyn NotificationSink,
) -> Result<TickOutcome, CombatError> {
    let mut rng = rand::thread_rng();
    tick_combatant_with_rng(target, dt, sink, &mut rng)
}

/// Advance a combatant with a provided RNG (for deterministic testing)
pub fn tick_combatant_with_rng(
    target: &mut Combatant,
    dt: f64,
    sink: &mut dyn NotificationSink,
    rng: &mut impl Rng,
) -> Result<TickOutcome, CombatError> {
    require_parts(target)?;

    let mut outcome = TickOutcome::new();
    if target.is_dead() {
        return Ok(outcome);
    }
    let dt = clamp_logged(dt, 0.0, f64::MAX, "combatant tick dt");

    if let Some(shield) = target.shield.as_mut() {
        let rate = target
            .modifiers
            .apply(ModifierPoint::ShieldRechargeRate, shield.recharge_rate())
            .max(0.0);
        outcome.shield_recharged = shield.tick_with_rate(dt, rate).recharged;
    }
    if outcome.shield_recharged > 0.0 {
        target.notify_shield(sink);
    }

    let report = target.status.tick(dt, &mut target.modifiers);
    for event in &report.events {
        target.notify_status(event.clone(), sink);
    }
    outcome.status_events = report.events;

    for event in &report.damage_events {
        if target.is_dead() {
            break;
        }
        let hit = resolve_damage_with_rng(target, event, sink, &mut *rng)?;
        outcome.died |= hit.died;
        outcome.periodic_hits.push(hit);
    }

    Ok(outcome)
}
