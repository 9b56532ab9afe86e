//! Mitigation - Damage reduction from a resistance profile
//!
//! Formula:
//! - True damage: damage_taken = damage
//! - Otherwise: damage_taken = damage * (1 - resistance), floored at 0

use super::DefenseProfile;
use crate::types::DamageType;

/// Calculate damage after resistance mitigation
///
/// # Arguments
/// * `amount` - The incoming damage (post-crit)
/// * `damage_type` - Selects which resistance applies
/// * `profile` - The defender's resistance profile
///
/// # Returns
/// The damage after mitigation
pub fn mitigate(amount: f64, damage_type: DamageType, profile: &DefenseProfile) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    if damage_type == DamageType::True {
        return amount;
    }

    let resistance = profile.resistance_for(damage_type);
    (amount * (1.0 - resistance)).max(0.0)
}
