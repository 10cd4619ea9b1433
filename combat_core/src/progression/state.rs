//! LevelState - the monotonic per-instance level walker

use super::table::{apply_bonus, LevelTable, WeaponStats, MIN_ATTACK_COOLDOWN};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Level state for one equipped weapon/skill instance
///
/// Created at equip time at level 1 with the table's base stats. The level
/// only moves forward through [`level_up`](LevelState::level_up); the debug
/// jump [`set_level`](LevelState::set_level) replays the whole table from
/// level 1 so its result is reproducible bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    table: LevelTable,
    current_level: u32,
    stats: WeaponStats,
}

impl LevelState {
    /// Equip-time construction at level 1
    pub fn new(table: LevelTable) -> Self {
        let stats = table.base;
        LevelState {
            table,
            current_level: 1,
            stats,
        }
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Accumulated stats for the current level
    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn is_max_level(&self) -> bool {
        self.current_level >= self.table.max_level
    }

    /// Advance one level and apply that level's bonus entry
    ///
    /// At max level this is a silent no-op. The attack cooldown is floored
    /// after every transition. Returns whether a transition happened.
    pub fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.current_level += 1;
        if let Some(entry) = self.table.entry_for(self.current_level) {
            for bonus in &entry.bonuses {
                apply_bonus(&mut self.stats, bonus);
            }
        }
        self.stats.attack_cooldown = self.stats.attack_cooldown.max(MIN_ATTACK_COOLDOWN);
        debug!(
            weapon = %self.table.id,
            level = self.current_level,
            damage = self.stats.damage,
            "weapon leveled up"
        );
        true
    }

    /// Debug tooling: jump to a level by replaying the table from level 1
    ///
    /// The target is clamped to `[1, max_level]`. Because replay is the only
    /// path, repeated calls land on identical accumulated stats.
    pub fn set_level(&mut self, level: u32) {
        let target = level.clamp(1, self.table.max_level);
        self.current_level = 1;
        self.stats = self.table.base;
        while self.current_level < target {
            self.level_up();
        }
    }
}
