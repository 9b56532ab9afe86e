//! Combatant - The combat-relevant parts owned by one entity

use crate::config::{CombatantConfig, ConfigError};
use crate::defense::DefenseProfile;
use crate::events::{CombatNotification, NotificationSink};
use crate::ledger::{HealthChange, HealthLedger, ShieldLedger};
use crate::modifier::{ModifierPoint, ModifierStack};
use crate::status::{EffectIdentity, StatusEffectEngine, StatusEffectSpec, StatusEvent};
use crate::types::EntityRef;

/// A damageable entity composed of optional capability parts.
///
/// Resolution requires a defense profile and a health ledger; the shield
/// is optional.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub(crate) id: EntityRef,
    pub(crate) defense: Option<DefenseProfile>,
    pub(crate) shield: Option<ShieldLedger>,
    pub(crate) health: Option<HealthLedger>,
    pub(crate) status: StatusEffectEngine,
    pub(crate) modifiers: ModifierStack,
}

impl Combatant {
    /// Create a combatant with defense and health
    pub fn new(id: impl Into<EntityRef>, defense: DefenseProfile, health: HealthLedger) -> Self {
        Combatant::unconfigured(id).with_defense(defense).with_health(health)
    }

    /// Create a combatant with no parts attached
    pub fn unconfigured(id: impl Into<EntityRef>) -> Self {
        let id = id.into();
        Combatant {
            status: StatusEffectEngine::new(id.clone()),
            id,
            defense: None,
            shield: None,
            health: None,
            modifiers: ModifierStack::new(),
        }
    }

    /// Build a combatant from authoring data, validating every part
    pub fn from_config(config: &CombatantConfig) -> Result<Self, ConfigError> {
        if config.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "combatant id must not be empty".to_string(),
            ));
        }

        let mut combatant = Combatant::unconfigured(config.id.as_str());
        if let Some(defense) = &config.defense {
            combatant.defense = Some(DefenseProfile::try_from(defense)?);
        }
        if let Some(shield) = &config.shield {
            combatant.shield = Some(ShieldLedger::from_config(shield)?);
        }
        if let Some(health) = &config.health {
            combatant.health = Some(HealthLedger::from_config(health)?);
        }

        if combatant.defense.is_none() || combatant.health.is_none() {
            tracing::warn!(
                id = %combatant.id,
                "combatant has no defense or health and cannot take damage"
            );
        }
        Ok(combatant)
    }

    pub fn with_defense(mut self, defense: DefenseProfile) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn with_shield(mut self, shield: ShieldLedger) -> Self {
        self.shield = Some(shield);
        self
    }

    pub fn with_health(mut self, health: HealthLedger) -> Self {
        self.health = Some(health);
        self
    }

    pub fn id(&self) -> &EntityRef {
        &self.id
    }

    pub fn defense(&self) -> Option<&DefenseProfile> {
        self.defense.as_ref()
    }

    pub fn shield(&self) -> Option<&ShieldLedger> {
        self.shield.as_ref()
    }

    pub fn health(&self) -> Option<&HealthLedger> {
        self.health.as_ref()
    }

    pub fn status_effects(&self) -> &StatusEffectEngine {
        &self.status
    }

    pub fn modifiers(&self) -> &ModifierStack {
        &self.modifiers
    }

    /// Talents and items register or retract their modifiers here
    pub fn modifiers_mut(&mut self) -> &mut ModifierStack {
        &mut self.modifiers
    }

    pub fn is_dead(&self) -> bool {
        self.health.as_ref().is_some_and(|h| h.is_dead())
    }

    /// Movement speed after slows and other modifiers
    pub fn movement_speed(&self, base: f64) -> f64 {
        self.modifiers.apply(ModifierPoint::MovementSpeed, base).max(0.0)
    }

    /// Restore health. Has no effect on a dead or health-less combatant.
    pub fn heal(&mut self, amount: f64, sink: &mut dyn NotificationSink) -> Option<HealthChange> {
        if amount <= 0.0 {
            return None;
        }
        Some(self.apply_health_delta(amount, sink))
    }

    /// Apply a status effect outside of a hit (auras, self-buffs)
    pub fn apply_status_effect(
        &mut self,
        spec: &StatusEffectSpec,
        source: &EntityRef,
        sink: &mut dyn NotificationSink,
    ) -> Option<StatusEvent> {
        if self.is_dead() {
            return None;
        }
        let event = self.status.apply(spec, source, &mut self.modifiers);
        self.notify_status(event.clone(), sink);
        Some(event)
    }

    /// Remove one status effect by identity
    pub fn dispel(&mut self, identity: &EffectIdentity, sink: &mut dyn NotificationSink) -> bool {
        match self.status.remove(identity, &mut self.modifiers) {
            Some(event) => {
                self.notify_status(event, sink);
                true
            }
            None => false,
        }
    }

    /// Remove every status effect
    pub fn clear_status_effects(&mut self, sink: &mut dyn NotificationSink) {
        for event in self.status.clear_all(&mut self.modifiers) {
            self.notify_status(event, sink);
        }
    }

    /// Apply a signed delta to health, emitting percent and low-health
    /// notifications. Death is left to the caller.
    pub(crate) fn apply_health_delta(
        &mut self,
        delta: f64,
        sink: &mut dyn NotificationSink,
    ) -> HealthChange {
        let Some(health) = self.health.as_mut() else {
            return HealthChange::default();
        };
        let change = health.apply(delta);
        let percent = health.percent();

        if change.changed() {
            sink.notify(CombatNotification::HealthChanged {
                target: self.id.clone(),
                percent,
            });
        }
        if change.became_low_health {
            sink.notify(CombatNotification::LowHealth {
                target: self.id.clone(),
            });
        }
        change
    }

    /// Emit the death notification and drop every status effect
    pub(crate) fn handle_death(&mut self, killer: Option<EntityRef>, sink: &mut dyn NotificationSink) {
        tracing::debug!(id = %self.id, killer = ?killer, "combatant died");
        sink.notify(CombatNotification::Died {
            target: self.id.clone(),
            killer,
        });
        self.clear_status_effects(sink);
    }

    pub(crate) fn notify_shield(&self, sink: &mut dyn NotificationSink) {
        if let Some(shield) = &self.shield {
            sink.notify(CombatNotification::ShieldChanged {
                target: self.id.clone(),
                percent: shield.percent(),
            });
        }
    }

    pub(crate) fn notify_status(&self, event: StatusEvent, sink: &mut dyn NotificationSink) {
        sink.notify(CombatNotification::Status {
            target: self.id.clone(),
            event,
        });
    }
}
