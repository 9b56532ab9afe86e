//! Status effect system - timed damage-over-time and condition effects

mod active;
mod catalog;
mod hooks;
pub mod tick;
mod types;

pub use active::{Reapplication, StatusEffectInstance};
pub use catalog::EffectCatalog;
pub use tick::{RemovalReason, StatusEvent, StatusTickReport};
pub use types::{EffectIdentity, EffectKind, StatusEffectSpec};

use crate::modifier::ModifierStack;
use crate::types::{clamp_logged, EntityRef};
use std::collections::BTreeMap;

/// Registry of active effects on a single target.
///
/// Instances are keyed by effect identity and iterated in identity order,
/// so ticking is deterministic. The engine never touches another target.
/// Nothing advances unless the owner calls [`StatusEffectEngine::tick`].
#[derive(Debug, Clone, Default)]
pub struct StatusEffectEngine {
    target: EntityRef,
    active: BTreeMap<EffectIdentity, StatusEffectInstance>,
}

impl StatusEffectEngine {
    /// Create an empty registry for `target`
    pub fn new(target: impl Into<EntityRef>) -> Self {
        StatusEffectEngine {
            target: target.into(),
            active: BTreeMap::new(),
        }
    }

    pub fn target(&self) -> &EntityRef {
        &self.target
    }

    /// Apply an effect: create a new instance or stack/refresh an existing one
    pub fn apply(
        &mut self,
        spec: &StatusEffectSpec,
        source: &EntityRef,
        modifiers: &mut ModifierStack,
    ) -> StatusEvent {
        let identity = spec.identity();

        if let Some(instance) = self.active.get_mut(&identity) {
            let outcome = instance.reapply(source.clone());
            let stacks = instance.stacks;
            return match outcome {
                Reapplication::Stacked => {
                    hooks::on_stack(instance, modifiers);
                    tracing::trace!(%identity, stacks, "status effect stacked");
                    StatusEvent::Stacked { identity, stacks }
                }
                Reapplication::Refreshed => {
                    tracing::trace!(%identity, stacks, "status effect refreshed");
                    StatusEvent::Refreshed { identity, stacks }
                }
            };
        }

        let instance = StatusEffectInstance::new(spec.clone(), source.clone(), self.target.clone());
        hooks::on_apply(&instance, modifiers);
        tracing::trace!(%identity, target = %self.target, "status effect applied");
        self.active.insert(identity.clone(), instance);
        StatusEvent::Applied {
            identity,
            stacks: 1,
        }
    }

    /// Advance every active effect by `dt` seconds
    pub fn tick(&mut self, dt: f64, modifiers: &mut ModifierStack) -> StatusTickReport {
        let dt = clamp_logged(dt, 0.0, f64::MAX, "status tick dt");
        tick::process_status_tick(&mut self.active, dt, modifiers)
    }

    /// Remove one effect by identity, firing its remove hook
    pub fn remove(
        &mut self,
        identity: &EffectIdentity,
        modifiers: &mut ModifierStack,
    ) -> Option<StatusEvent> {
        let instance = self.active.remove(identity)?;
        hooks::on_remove(&instance, modifiers);
        Some(StatusEvent::Removed {
            identity: instance.identity,
            reason: RemovalReason::Dispelled,
        })
    }

    /// Remove every effect, firing each remove hook
    pub fn clear_all(&mut self, modifiers: &mut ModifierStack) -> Vec<StatusEvent> {
        let active = std::mem::take(&mut self.active);
        active
            .into_values()
            .map(|instance| {
                hooks::on_remove(&instance, modifiers);
                StatusEvent::Removed {
                    identity: instance.identity,
                    reason: RemovalReason::Cleared,
                }
            })
            .collect()
    }

    pub fn get(&self, identity: &EffectIdentity) -> Option<&StatusEffectInstance> {
        self.active.get(identity)
    }

    /// Stack count of an effect, 0 when absent
    pub fn stacks(&self, identity: &EffectIdentity) -> u32 {
        self.active.get(identity).map(|i| i.stacks).unwrap_or(0)
    }

    pub fn contains(&self, identity: &EffectIdentity) -> bool {
        self.active.contains_key(identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.active.values()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
