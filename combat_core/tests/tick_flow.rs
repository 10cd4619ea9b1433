//! Integration test: a full tick loop across the public API
//!
//! Spawns entities into the arena, drives zone/timed effects through the
//! coordinator, levels a weapon, and resolves combat - checking the per-tick
//! ordering guarantee (events, then sweep, then recompute) end to end.

use combat_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const LEASE: Tick = 10;

fn player_block() -> StatBlock {
    StatBlock::new(BaseStats {
        max_health: 100.0,
        move_speed: 5.0,
        damage_multiplier: 1.0,
        crit_chance: 0.0,
        crit_multiplier: 2.0,
        armor: 0.0,
    })
}

fn enemy_block() -> StatBlock {
    StatBlock::new(BaseStats {
        max_health: 40.0,
        move_speed: 2.5,
        damage_multiplier: 1.0,
        crit_chance: 0.0,
        crit_multiplier: 1.5,
        armor: 10.0,
    })
}

#[test]
fn test_scripted_encounter_tick_flow() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut arena = EntityArena::new();
    let mut coordinator = EffectCoordinator::new();

    let player = arena.spawn(player_block());
    let enemy = arena.spawn(enemy_block());

    let tables = default_weapon_tables();
    let mut weapon = LevelState::new(tables["whip"].clone());
    assert_eq!(weapon.current_level(), 1);
    assert!((weapon.stats().damage - 10.0).abs() < f64::EPSILON);

    // Level 2 grants +5 damage
    assert!(weapon.level_up());
    assert!((weapon.stats().damage - 15.0).abs() < f64::EPSILON);

    // --- Tick 0: the player wades into a slow zone while already slowed ---
    let zone = SourceId(1);
    let slow = SourceId(2);
    {
        let block = arena.get_mut(player).unwrap();
        coordinator.apply_timed(block, slow, 50.0, 40, 0);
        coordinator.zone_contact(
            block,
            ZoneContact {
                source: zone,
                percentage: 70.0,
                lease: LEASE,
            },
            0,
        );
    }
    coordinator.sweep(0, arena.iter_mut().map(|(_, b)| b));
    assert_eq!(arena.recompute_dirty(), 1);
    // Zone governs over the stronger timed slow
    assert!((arena.get(player).unwrap().move_speed() - 3.5).abs() < 1e-9);

    // --- Tick 1: overlap ends; the timed slow takes over ---
    {
        let block = arena.get_mut(player).unwrap();
        coordinator.zone_exit(block, zone);
    }
    coordinator.sweep(1, arena.iter_mut().map(|(_, b)| b));
    arena.recompute_dirty();
    assert!((arena.get(player).unwrap().move_speed() - 2.5).abs() < 1e-9);

    // --- Tick 40: the sweep expires the timed slow, same-tick recompute ---
    coordinator.sweep(40, arena.iter_mut().map(|(_, b)| b));
    arena.recompute_dirty();
    assert!((arena.get(player).unwrap().move_speed() - 5.0).abs() < f64::EPSILON);

    // --- Combat: the leveled weapon chews through the armored enemy ---
    let mut kills = 0;
    for _ in 0..200 {
        let hit = {
            let attacker = arena.get(player).unwrap();
            roll_outgoing_for(attacker, weapon.stats().damage, 0.0, &mut rng)
        };
        let target = arena.get_mut(enemy).unwrap();
        let result = apply_incoming(target, hit.amount, None);
        if result.is_killing_blow {
            kills += 1;
        }
    }

    // 40 HP behind 10 armor against 15-damage hits lands 5 per hit:
    // exactly one death, then nothing but no-ops
    assert_eq!(kills, 1);
    let corpse = arena.get(enemy).unwrap();
    assert!(corpse.is_dead());
    assert_eq!(corpse.health(), 0.0);

    // Despawn goes back through the arena; the stale handle stops matching
    arena.despawn(enemy);
    assert!(arena.get(enemy).is_none());

    // Version counter moved with every observable change on the player
    assert!(arena.get(player).unwrap().stats_version() > 0);
}

#[test]
fn test_replacement_entity_does_not_inherit_effects() {
    let mut arena = EntityArena::new();
    let mut coordinator = EffectCoordinator::new();

    let first = arena.spawn(enemy_block());
    {
        let block = arena.get_mut(first).unwrap();
        coordinator.apply_timed(block, SourceId(9), 30.0, 1000, 0);
    }
    arena.recompute_dirty();
    arena.despawn(first);

    // The recycled slot hosts a fresh entity with a clean modifier set
    let second = arena.spawn(enemy_block());
    let block = arena.get(second).unwrap();
    assert!(block.modifiers().is_empty());
    assert!((block.move_speed() - 2.5).abs() < f64::EPSILON);

    // Removing the dead entity's effect by its old source is a safe no-op
    let block = arena.get_mut(second).unwrap();
    coordinator.zone_exit(block, SourceId(9));
    assert!(!block.is_dirty());
}
