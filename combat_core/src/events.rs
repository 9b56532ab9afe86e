//! Combat notifications - the only channel from the core to presentation

use crate::status::StatusEvent;
use crate::types::{DamageType, EntityRef};
use serde::{Deserialize, Serialize};

/// Something observable happened to a combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatNotification {
    DamageTaken {
        target: EntityRef,
        source: EntityRef,
        amount: f64,
        damage_type: DamageType,
        is_crit: bool,
    },
    CriticalHit {
        target: EntityRef,
        source: EntityRef,
    },
    ShieldChanged {
        target: EntityRef,
        percent: f64,
    },
    HealthChanged {
        target: EntityRef,
        percent: f64,
    },
    LowHealth {
        target: EntityRef,
    },
    Died {
        target: EntityRef,
        killer: Option<EntityRef>,
    },
    Status {
        target: EntityRef,
        event: StatusEvent,
    },
}

impl CombatNotification {
    pub fn target(&self) -> &EntityRef {
        match self {
            CombatNotification::DamageTaken { target, .. }
            | CombatNotification::CriticalHit { target, .. }
            | CombatNotification::ShieldChanged { target, .. }
            | CombatNotification::HealthChanged { target, .. }
            | CombatNotification::LowHealth { target }
            | CombatNotification::Died { target, .. }
            | CombatNotification::Status { target, .. } => target,
        }
    }
}

/// Receiver for combat notifications (damage numbers, bars, status icons)
pub trait NotificationSink {
    fn notify(&mut self, notification: CombatNotification);
}

/// Collects notifications in order
impl NotificationSink for Vec<CombatNotification> {
    fn notify(&mut self, notification: CombatNotification) {
        self.push(notification);
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notification: CombatNotification) {}
}

/// Logs every notification at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: CombatNotification) {
        tracing::debug!(target: "combat_core::events", ?notification, "combat notification");
    }
}
