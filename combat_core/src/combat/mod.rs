//! Combat resolution - Apply damage events to combatants and advance them per frame

mod crit;
mod error;
mod resolution;
mod result;
mod tick;

pub use crit::{apply_crit, effective_crit_chance, is_crit_draw, roll_crit};
pub use error::CombatError;
pub use resolution::{resolve_damage, resolve_damage_with_rng};
pub use result::{ResolutionOutcome, TickOutcome};
pub use tick::{tick_combatant, tick_combatant_with_rng};
