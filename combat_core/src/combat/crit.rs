//! Critical hit rolls
//!
//! Chances are percentages in `[0, 100]`. A roll draws uniformly from
//! `[0, 100)` and crits when the draw is strictly below the effective chance,
//! so 0 never crits and 100 always does.

use crate::damage::MAX_CRIT_CHANCE;
use rand::Rng;

/// Crit chance after the defender's crit resistance, clamped to `[0, 100]`
pub fn effective_crit_chance(base: f64, resistance: f64) -> f64 {
    let chance = base - resistance;
    if chance.is_nan() {
        return 0.0;
    }
    chance.clamp(0.0, MAX_CRIT_CHANCE)
}

/// Whether a draw in `[0, 100)` lands a crit at `effective` chance
pub fn is_crit_draw(draw: f64, effective: f64) -> bool {
    draw < effective
}

/// Roll for a critical hit
pub fn roll_crit(base: f64, resistance: f64, rng: &mut impl Rng) -> bool {
    let effective = effective_crit_chance(base, resistance);
    if effective <= 0.0 {
        return false;
    }
    let draw = rng.gen_range(0.0..MAX_CRIT_CHANCE);
    is_crit_draw(draw, effective)
}

/// Scale an amount by the crit multiplier when the hit crits
pub fn apply_crit(amount: f64, is_crit: bool, multiplier: f64) -> f64 {
    if is_crit {
        amount * multiplier
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_effective_chance_clamps() {
        assert!((effective_crit_chance(30.0, 10.0) - 20.0).abs() < f64::EPSILON);
        assert!((effective_crit_chance(10.0, 30.0) - 0.0).abs() < f64::EPSILON);
        assert!((effective_crit_chance(150.0, 0.0) - 100.0).abs() < f64::EPSILON);
        assert!((effective_crit_chance(f64::NAN, 0.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_draws() {
        assert!(!is_crit_draw(0.0, 0.0));
        assert!(is_crit_draw(0.0, 0.001));
        assert!(!is_crit_draw(50.0, 50.0));
        assert!(is_crit_draw(49.999, 50.0));
        assert!(is_crit_draw(99.999, 100.0));
    }

    #[test]
    fn test_zero_chance_never_crits() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let crits = (0..10_000).filter(|_| roll_crit(0.0, 0.0, &mut rng)).count();
        assert_eq!(crits, 0);

        let crits = (0..10_000).filter(|_| roll_crit(40.0, 60.0, &mut rng)).count();
        assert_eq!(crits, 0);
    }

    #[test]
    fn test_full_chance_always_crits() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let crits = (0..10_000).filter(|_| roll_crit(100.0, 0.0, &mut rng)).count();
        assert_eq!(crits, 10_000);
    }

    #[test]
    fn test_half_chance_is_roughly_half() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let crits = (0..10_000).filter(|_| roll_crit(50.0, 0.0, &mut rng)).count();
        assert!((4_500..5_500).contains(&crits), "got {} crits", crits);
    }

    #[test]
    fn test_apply_crit() {
        assert!((apply_crit(100.0, true, 2.0) - 200.0).abs() < f64::EPSILON);
        assert!((apply_crit(100.0, false, 2.0) - 100.0).abs() < f64::EPSILON);
    }
}
