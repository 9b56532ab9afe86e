//! Integration test: Load config -> Hit -> Tick status effects -> Recharge -> Kill
//!
//! This test validates the full flow from authoring data to death.

use combat_core::{
    combat::{resolve_damage_with_rng, tick_combatant_with_rng},
    config::{load_combatant_config, load_effect_catalog},
    CombatNotification, Combatant, DamageEvent, DamageType, EffectCatalog, EntityRef,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print a combatant's pools
fn print_combatant(combatant: &Combatant) {
    println!("  {}:", combatant.id());
    if let Some(health) = combatant.health() {
        println!("    Health: {:.1}/{:.0}", health.current(), health.max());
    }
    if let Some(shield) = combatant.shield() {
        println!("    Shield: {:.1}/{:.0}", shield.current(), shield.max());
    }
    for effect in combatant.status_effects().iter() {
        println!(
            "    {} x{} ({:.1}s left)",
            effect.identity, effect.stacks, effect.remaining_duration
        );
    }
}

fn config_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("config")
}

fn load_arena() -> (Combatant, Combatant, EffectCatalog) {
    let mut combatants = load_combatant_config(&config_dir().join("combatants.toml"))
        .expect("Failed to load combatants");
    let catalog =
        load_effect_catalog(&config_dir().join("effects.toml")).expect("Failed to load effects");

    assert_eq!(combatants.len(), 2);
    let goblin = combatants.pop().unwrap();
    let knight = combatants.pop().unwrap();
    (knight, goblin, catalog)
}

#[test]
fn test_full_combat_flow() {
    separator("INTEGRATION TEST: Config -> Hit -> DoT -> Recharge -> Kill");

    // =========================================================================
    // STEP 1: Load the arena
    // =========================================================================
    separator("STEP 1: Loading Arena Config");

    let (mut knight, mut goblin, catalog) = load_arena();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut sink: Vec<CombatNotification> = Vec::new();
    let knight_id: EntityRef = knight.id().clone();

    print_combatant(&knight);
    print_combatant(&goblin);
    assert_eq!(catalog.len(), 4);

    // =========================================================================
    // STEP 2: Goblin swings a burning club at the knight
    // =========================================================================
    separator("STEP 2: Burning Club Hits Knight");

    let burning = catalog.get("burning").expect("burning not found").clone();
    let club = DamageEvent::new(30.0, DamageType::Physical, "goblin").with_status_effect(burning);

    let outcome = resolve_damage_with_rng(&mut knight, &club, &mut sink, &mut rng).unwrap();
    println!("  {}", outcome.summary());
    print_combatant(&knight);

    // 30 * (1 - 0.5) = 15, all soaked by the shield
    assert!((outcome.final_amount - 15.0).abs() < 1e-9);
    assert!((outcome.shield_absorbed - 15.0).abs() < 1e-9);
    assert!((knight.shield().unwrap().current() - 25.0).abs() < 1e-9);
    assert!((knight.health().unwrap().current() - 150.0).abs() < 1e-9);
    assert_eq!(outcome.effects_applied, vec!["burning:fire".into()]);

    // =========================================================================
    // STEP 3: Lightning is doubled against the shield
    // =========================================================================
    separator("STEP 3: Lightning Bolt Hits Knight");

    let bolt = DamageEvent::new(20.0, DamageType::Lightning, "goblin");
    let outcome = resolve_damage_with_rng(&mut knight, &bolt, &mut sink, &mut rng).unwrap();
    println!("  {}", outcome.summary());
    print_combatant(&knight);

    // 20 * (1 - 0.2) = 16, doubled to 32: the shield takes 25, 7 spills over
    assert!((outcome.final_amount - 16.0).abs() < 1e-9);
    assert!((outcome.shield_absorbed - 25.0).abs() < 1e-9);
    assert!((outcome.health_delta - -7.0).abs() < 1e-9);
    assert!((knight.shield().unwrap().current() - 0.0).abs() < 1e-9);
    assert!((knight.health().unwrap().current() - 143.0).abs() < 1e-9);

    // =========================================================================
    // STEP 4: Burning ticks straight into health, then expires
    // =========================================================================
    separator("STEP 4: Burning Ticks");

    let mut dot_damage = 0.0;
    let mut expired = Vec::new();
    for second in 1..=4 {
        let tick = tick_combatant_with_rng(&mut knight, 1.0, &mut sink, &mut rng).unwrap();
        dot_damage += tick.periodic_damage();
        expired.extend(tick.expired().cloned());
        println!("  t={}s: {:.1} periodic damage", second, tick.periodic_damage());
    }
    print_combatant(&knight);

    // 4 ticks of 5 * (1 - 0.4) = 3
    assert!((dot_damage - 12.0).abs() < 1e-9);
    assert_eq!(expired, vec!["burning:fire".into()]);
    assert!(knight.status_effects().is_empty());
    assert!((knight.shield().unwrap().current() - 0.0).abs() < 1e-9);
    assert!((knight.health().unwrap().current() - 131.0).abs() < 1e-9);

    // =========================================================================
    // STEP 5: Shield recharges after the delay
    // =========================================================================
    separator("STEP 5: Shield Recharge");

    let tick = tick_combatant_with_rng(&mut knight, 3.0, &mut sink, &mut rng).unwrap();
    print_combatant(&knight);

    assert!((tick.shield_recharged - 40.0).abs() < 1e-9);
    assert!((knight.shield().unwrap().current() - 40.0).abs() < 1e-9);

    // =========================================================================
    // STEP 6: Knight exposes and finishes the goblin
    // =========================================================================
    separator("STEP 6: Knight Kills Goblin");

    let exposed = catalog.get("exposed").expect("exposed not found").clone();
    let swings = [
        DamageEvent::new(10.0, DamageType::Physical, "knight").with_status_effect(exposed),
        DamageEvent::new(10.0, DamageType::Physical, "knight"),
        DamageEvent::new(5.0, DamageType::Physical, "knight"),
        DamageEvent::new(100.0, DamageType::Physical, "knight").with_crit(100.0, 2.0),
    ];
    let mut outcomes = Vec::new();
    for swing in &swings {
        let outcome = resolve_damage_with_rng(&mut goblin, swing, &mut sink, &mut rng).unwrap();
        println!("  {}", outcome.summary());
        outcomes.push(outcome);
    }
    print_combatant(&goblin);

    // 10 * 0.9 = 9, then exposed amplifies by 1.2
    assert!((outcomes[0].final_amount - 9.0).abs() < 1e-9);
    assert!((outcomes[1].final_amount - 10.8).abs() < 1e-9);
    assert!((outcomes[2].final_amount - 5.4).abs() < 1e-9);
    assert!(outcomes[3].is_crit);
    assert!(outcomes[3].died);
    assert!(goblin.is_dead());
    assert!(goblin.status_effects().is_empty());
    assert!(goblin.modifiers().is_empty());

    let goblin_id: EntityRef = "goblin".into();
    let low_health: Vec<_> = sink
        .iter()
        .filter(|n| matches!(n, CombatNotification::LowHealth { target } if *target == goblin_id))
        .collect();
    assert_eq!(low_health.len(), 1);
    assert!(sink.contains(&CombatNotification::Died {
        target: goblin_id.clone(),
        killer: Some(knight_id),
    }));

    // =========================================================================
    // STEP 7: Dead targets are inert
    // =========================================================================
    separator("STEP 7: Hitting a Corpse");

    let before = sink.len();
    let outcome = resolve_damage_with_rng(
        &mut goblin,
        &DamageEvent::new(10.0, DamageType::Fire, "knight"),
        &mut sink,
        &mut rng,
    )
    .unwrap();
    println!("  {}", outcome.summary());

    assert!(outcome.target_was_dead);
    assert_eq!(sink.len(), before);
}

#[test]
fn test_default_catalog_against_loaded_combatant() {
    let (_, mut goblin, _) = load_arena();
    let catalog = EffectCatalog::with_defaults();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut sink = Vec::new();

    let frost = DamageEvent::new(1.0, DamageType::Ice, "knight")
        .with_status_effect(catalog.get("frozen").unwrap().clone());
    resolve_damage_with_rng(&mut goblin, &frost, &mut sink, &mut rng).unwrap();

    assert!((goblin.movement_speed(10.0) - 7.0).abs() < 1e-9);

    tick_combatant_with_rng(&mut goblin, 1.5, &mut sink, &mut rng).unwrap();
    assert!((goblin.movement_speed(10.0) - 10.0).abs() < 1e-9);
}
