//! Headless combat simulator
//!
//! Drives a scripted encounter through the combat core: a player with a
//! leveling weapon against respawning enemies, with a slow zone, a timed
//! slow and a shield interceptor in the mix.
//!
//! Usage:
//!   cargo run --bin combat_sim                 # default: seed 42, 3600 ticks
//!   cargo run --bin combat_sim -- --seed 7
//!   cargo run --bin combat_sim -- --ticks 7200 --json

use combat_core::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::env;
use tracing::info;

/// Simulation ticks per in-game second
const TICKS_PER_SECOND: Tick = 60;

/// Damage variance applied to every outgoing player hit
const PLAYER_VARIANCE: f64 = 0.15;

struct SimConfig {
    seed: u64,
    ticks: Tick,
    json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: 42,
            ticks: 3600,
            json: false,
        }
    }
}

/// Shield that eats one hit per charge
struct Barrier {
    charges: u32,
}

impl HitInterceptor for Barrier {
    fn intercept(&mut self, _raw_damage: f64) -> bool {
        if self.charges > 0 {
            self.charges -= 1;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Serialize)]
struct SimReport {
    seed: u64,
    ticks_run: Tick,
    kills: u32,
    hits_landed: u32,
    crits_landed: u32,
    damage_dealt: f64,
    damage_taken: f64,
    hits_blocked: u32,
    final_weapon_level: u32,
    final_weapon_damage: f64,
    final_move_speed: f64,
    player_survived: bool,
}

impl SimReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Simulation Report ===\n");
        out.push_str(&format!("Seed:            {}\n", self.seed));
        out.push_str(&format!("Ticks run:       {}\n", self.ticks_run));
        out.push_str(&format!("Kills:           {}\n", self.kills));
        out.push_str(&format!(
            "Hits landed:     {} ({} crits)\n",
            self.hits_landed, self.crits_landed
        ));
        out.push_str(&format!("Damage dealt:    {:.1}\n", self.damage_dealt));
        out.push_str(&format!(
            "Damage taken:    {:.1} ({} blocked)\n",
            self.damage_taken, self.hits_blocked
        ));
        out.push_str(&format!(
            "Weapon:          level {} ({:.1} damage)\n",
            self.final_weapon_level, self.final_weapon_damage
        ));
        out.push_str(&format!("Move speed:      {:.2}\n", self.final_move_speed));
        out.push_str(&format!(
            "Player:          {}\n",
            if self.player_survived { "survived" } else { "died" }
        ));
        out
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().unwrap_or(config.seed);
                    i += 1;
                }
            }
            "--ticks" => {
                if i + 1 < args.len() {
                    config.ticks = args[i + 1].parse().unwrap_or(config.ticks);
                    i += 1;
                }
            }
            "--json" => config.json = true,
            _ => {}
        }
        i += 1;
    }
    config
}

fn spawn_enemy(arena: &mut EntityArena, wave: u32) -> EntityId {
    arena.spawn(StatBlock::new(BaseStats {
        max_health: 30.0 + 10.0 * wave as f64,
        move_speed: 2.5,
        damage_multiplier: 1.0,
        crit_chance: 0.0,
        crit_multiplier: 1.5,
        armor: (wave / 2) as f64,
    }))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = parse_args(&env::args().collect::<Vec<_>>());
    info!(seed = config.seed, ticks = config.ticks, "starting scripted encounter");
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let tables = default_weapon_tables();
    let mut weapon = LevelState::new(tables["whip"].clone());

    let mut arena = EntityArena::new();
    let mut coordinator = EffectCoordinator::new();

    let player = arena.spawn(StatBlock::new(BaseStats {
        max_health: 120.0,
        move_speed: 5.0,
        damage_multiplier: 1.0,
        crit_chance: 0.10,
        crit_multiplier: 2.0,
        armor: 4.0,
    }));
    let mut barrier = Barrier { charges: 3 };

    let mut wave = 1;
    let mut enemy = spawn_enemy(&mut arena, wave);

    // Scripted slow zone the player wades through
    let slow_zone = SourceId(1000);
    let zone_window = 120..300;
    // A timed slow landing mid-run
    let timed_slow = SourceId(2000);
    let timed_slow_at: Tick = 600;

    let mut report = SimReport {
        seed: config.seed,
        ticks_run: 0,
        kills: 0,
        hits_landed: 0,
        crits_landed: 0,
        damage_dealt: 0.0,
        damage_taken: 0.0,
        hits_blocked: 0,
        final_weapon_level: 0,
        final_weapon_damage: 0.0,
        final_move_speed: 0.0,
        player_survived: true,
    };

    let mut next_attack: Tick = 0;
    let mut next_enemy_attack: Tick = 90;

    for now in 0..config.ticks {
        // --- External events feeding the coordinator ---
        if zone_window.contains(&now) {
            if let Some(block) = arena.get_mut(player) {
                coordinator.zone_contact(
                    block,
                    ZoneContact {
                        source: slow_zone,
                        percentage: 60.0,
                        lease: 10,
                    },
                    now,
                );
            }
        } else if now == zone_window.end {
            if let Some(block) = arena.get_mut(player) {
                coordinator.zone_exit(block, slow_zone);
            }
        }

        if now == timed_slow_at {
            if let Some(block) = arena.get_mut(player) {
                coordinator.apply_timed(block, timed_slow, 80.0, 3 * TICKS_PER_SECOND, now);
            }
        }

        // Weapon levels up on a fixed cadence until the table tops out
        if now > 0 && now % 360 == 0 {
            weapon.level_up();
        }

        // --- Per-tick maintenance: sweep, then recompute dirty blocks ---
        coordinator.sweep(now, arena.iter_mut().map(|(_, block)| block));
        arena.recompute_dirty();

        // --- Player attacks ---
        if now >= next_attack {
            let stats = *weapon.stats();
            let hit = {
                let attacker = arena.get(player).expect("player is alive");
                roll_outgoing_for(attacker, stats.damage, PLAYER_VARIANCE, &mut rng)
            };
            if let Some(target) = arena.get_mut(enemy) {
                let result = apply_incoming(target, hit.amount, None);
                report.hits_landed += 1;
                if hit.is_critical {
                    report.crits_landed += 1;
                }
                report.damage_dealt += result.damage_dealt;
                if result.is_killing_blow {
                    report.kills += 1;
                    arena.despawn(enemy);
                    wave += 1;
                    enemy = spawn_enemy(&mut arena, wave);
                }
            }
            next_attack = now + (stats.attack_cooldown * TICKS_PER_SECOND as f64) as Tick;
        }

        // --- Enemy strikes back on its own cadence ---
        if now >= next_enemy_attack {
            let raw = 6.0 + rng.gen_range(0.0..4.0) + wave as f64;
            if let Some(block) = arena.get_mut(player) {
                let result = apply_incoming(block, raw, Some(&mut barrier));
                if result.blocked {
                    report.hits_blocked += 1;
                }
                report.damage_taken += result.damage_dealt;
                if result.is_killing_blow {
                    report.player_survived = false;
                }
            }
            next_enemy_attack = now + 90;
        }

        report.ticks_run = now + 1;
        if !report.player_survived {
            break;
        }
    }

    report.final_weapon_level = weapon.current_level();
    report.final_weapon_damage = weapon.stats().damage;
    report.final_move_speed = arena.get(player).map(|b| b.move_speed()).unwrap_or(0.0);

    println!("{}", report.to_text());
    if config.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("failed to serialize report: {}", err),
        }
    }
}
