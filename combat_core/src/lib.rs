//! combat_core - Combat resolution and status effect simulation for game entities
//!
//! This library provides:
//! - DamageEvent: Immutable description of one hit
//! - Defense and crit resolvers: Pure mitigation and crit math
//! - ShieldLedger / HealthLedger: Clamped pools with recharge, low-health and death signals
//! - Damage Resolution: Fixed-order pipeline applying a hit to a Combatant
//! - StatusEffectEngine: Per-target timed DoT and condition effects
//! - Notifications: The only channel from the simulation to presentation

pub mod combat;
pub mod config;
pub mod damage;
pub mod defense;
pub mod entity;
pub mod events;
pub mod ledger;
pub mod modifier;
pub mod prelude;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    resolve_damage, resolve_damage_with_rng, tick_combatant, tick_combatant_with_rng, CombatError,
    ResolutionOutcome, TickOutcome,
};
pub use config::{load_combatant_config, load_effect_catalog, ConfigError};
pub use damage::{DamageEvent, DamageOrigin};
pub use defense::{mitigate, DefenseProfile};
pub use entity::Combatant;
pub use events::{CombatNotification, NotificationSink, NullSink, TracingSink};
pub use ledger::{HealthChange, HealthLedger, ShieldAbsorption, ShieldLedger};
pub use modifier::{ModifierOp, ModifierPoint, ModifierStack};
pub use status::{EffectCatalog, EffectIdentity, EffectKind, StatusEffectEngine, StatusEffectSpec, StatusEvent};
pub use types::{DamageType, EntityRef};
