//! Damage events - the input to combat resolution

mod event;

pub use event::{DamageEvent, DamageOrigin, MAX_CRIT_CHANCE};
