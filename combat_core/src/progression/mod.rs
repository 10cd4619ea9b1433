//! Data-driven weapon level progression

mod state;
mod table;

pub use state::LevelState;
pub use table::{
    BonusOp, LevelBonus, LevelEntry, LevelTable, WeaponStatKind, WeaponStats, MIN_ATTACK_COOLDOWN,
};
