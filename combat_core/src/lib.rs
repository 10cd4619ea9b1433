//! combat_core - stat-modifier aggregation and combat resolution for game entities
//!
//! This library provides:
//! - StatBlock: per-entity base stats, speed modifiers and lazily recomputed derived stats
//! - EffectCoordinator: zone/timed effect lifecycle and the per-tick expiry sweep
//! - combat: outgoing crit/variance rolls and incoming armor resolution
//! - LevelTable/LevelState: data-driven weapon level progression
//! - EntityArena: generation-checked entity storage

pub mod arena;
pub mod combat;
pub mod config;
pub mod effects;
pub mod prelude;
pub mod progression;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use arena::{EntityArena, EntityId};
pub use combat::{
    apply_incoming, resolve_incoming, roll_outgoing, roll_outgoing_for, HitInterceptor, HitResult,
    OutgoingHit, MIN_CHIP_DAMAGE,
};
pub use config::{default_weapon_tables, ConfigError};
pub use effects::{EffectCoordinator, ZoneContact};
pub use progression::{
    BonusOp, LevelBonus, LevelEntry, LevelState, LevelTable, WeaponStatKind, WeaponStats,
    MIN_ATTACK_COOLDOWN,
};
pub use stats::{BaseStats, DamageOutcome, ModifierSet, SpeedModifier, StatBlock};
pub use types::{ModifierKind, SourceId, Tick};
