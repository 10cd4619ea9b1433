//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Entity state
pub use crate::arena::{EntityArena, EntityId};
pub use crate::stats::{BaseStats, StatBlock};

// Modifiers and effects
pub use crate::effects::{EffectCoordinator, ZoneContact};
pub use crate::stats::{ModifierSet, SpeedModifier};
pub use crate::types::{ModifierKind, SourceId, Tick};

// Damage pipeline
pub use crate::combat::{apply_incoming, roll_outgoing_for, HitInterceptor, HitResult, OutgoingHit};

// Progression
pub use crate::progression::{LevelState, LevelTable, WeaponStats};

// Config
pub use crate::config::default_weapon_tables;
