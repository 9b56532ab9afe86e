//! Status effect tick processing

use super::{hooks, EffectIdentity, StatusEffectInstance};
use crate::damage::DamageEvent;
use crate::modifier::ModifierStack;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why an instance left the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Duration ran out
    Expired,
    /// Removed by identity (dispel, cleanse)
    Dispelled,
    /// Cleared with everything else (e.g. on death)
    Cleared,
}

/// Lifecycle transition of one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    Applied { identity: EffectIdentity, stacks: u32 },
    Stacked { identity: EffectIdentity, stacks: u32 },
    Refreshed { identity: EffectIdentity, stacks: u32 },
    Ticked { identity: EffectIdentity, stacks: u32 },
    Removed { identity: EffectIdentity, reason: RemovalReason },
}

impl StatusEvent {
    pub fn identity(&self) -> &EffectIdentity {
        match self {
            StatusEvent::Applied { identity, .. }
            | StatusEvent::Stacked { identity, .. }
            | StatusEvent::Refreshed { identity, .. }
            | StatusEvent::Ticked { identity, .. }
            | StatusEvent::Removed { identity, .. } => identity,
        }
    }
}

/// Result of advancing every instance on a target
#[derive(Debug, Clone, Default)]
pub struct StatusTickReport {
    /// Periodic hits to resolve against the same target, in order
    pub damage_events: Vec<DamageEvent>,
    /// Ticks and removals, in order
    pub events: Vec<StatusEvent>,
}

impl StatusTickReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities that expired this step
    pub fn expired(&self) -> impl Iterator<Item = &EffectIdentity> {
        self.events.iter().filter_map(|e| match e {
            StatusEvent::Removed {
                identity,
                reason: RemovalReason::Expired,
            } => Some(identity),
            _ => None,
        })
    }
}

/// Advance every instance by `dt`, firing tick hooks and removing expired
/// instances.
///
/// Ticks are only counted for time the effect was actually alive, so a large
/// `dt` cannot fire ticks past expiry.
pub(crate) fn process_status_tick(
    active: &mut BTreeMap<EffectIdentity, StatusEffectInstance>,
    dt: f64,
    modifiers: &mut ModifierStack,
) -> StatusTickReport {
    let mut report = StatusTickReport::new();

    for instance in active.values_mut() {
        let elapsed = dt.min(instance.remaining_duration.max(0.0));
        instance.remaining_duration -= dt;

        if instance.spec.is_periodic() {
            instance.tick_timer -= elapsed;
            while instance.tick_timer <= 0.0 {
                if let Some(event) = hooks::on_tick(instance) {
                    report.damage_events.push(event);
                }
                report.events.push(StatusEvent::Ticked {
                    identity: instance.identity.clone(),
                    stacks: instance.stacks,
                });
                instance.tick_timer += instance.spec.tick_rate();
            }
        }
    }

    let expired: Vec<EffectIdentity> = active
        .values()
        .filter(|i| i.is_expired())
        .map(|i| i.identity.clone())
        .collect();

    for identity in expired {
        if let Some(instance) = active.remove(&identity) {
            hooks::on_remove(&instance, modifiers);
            tracing::trace!(%identity, "status effect expired");
            report.events.push(StatusEvent::Removed {
                identity,
                reason: RemovalReason::Expired,
            });
        }
    }

    report
}
