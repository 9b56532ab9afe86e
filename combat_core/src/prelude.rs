//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::entity::Combatant;
pub use crate::types::{DamageType, EntityRef};

// Damage and defense
pub use crate::damage::DamageEvent;
pub use crate::defense::DefenseProfile;
pub use crate::ledger::{HealthLedger, ShieldLedger};

// Combat
pub use crate::combat::{resolve_damage, tick_combatant, CombatError, ResolutionOutcome, TickOutcome};

// Status effects
pub use crate::status::{EffectCatalog, EffectIdentity, EffectKind, StatusEffectSpec};

// Notifications
pub use crate::events::{CombatNotification, NotificationSink, NullSink};

// Config
pub use crate::config::{load_combatant_config, load_effect_catalog, ConfigError};
