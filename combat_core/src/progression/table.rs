//! Weapon level tables - authoring-time bonus data

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Attack cooldown can never drop below this, no matter how aggressive the
/// percentage reductions get.
pub const MIN_ATTACK_COOLDOWN: f64 = 0.1;

/// Accumulated combat stats for one weapon/skill instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f64,
    /// Seconds between attacks; floored at [`MIN_ATTACK_COOLDOWN`]
    pub attack_cooldown: f64,
    /// Kept as f64 so percentage bonuses compose deterministically;
    /// read the usable count through [`projectiles`](WeaponStats::projectiles)
    pub projectile_count: f64,
    pub area: f64,
    pub duration: f64,
    pub projectile_speed: f64,
}

impl Default for WeaponStats {
    fn default() -> Self {
        WeaponStats {
            damage: 10.0,
            attack_cooldown: 1.0,
            projectile_count: 1.0,
            area: 1.0,
            duration: 1.0,
            projectile_speed: 1.0,
        }
    }
}

impl WeaponStats {
    /// Whole projectile count, never negative
    pub fn projectiles(&self) -> u32 {
        self.projectile_count.round().max(0.0) as u32
    }
}

/// Which accumulated stat a bonus touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponStatKind {
    Damage,
    AttackCooldown,
    ProjectileCount,
    Area,
    Duration,
    ProjectileSpeed,
}

/// How a bonus combines with the current accumulated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusOp {
    /// Additive delta
    Add,
    /// Percentage delta against the current accumulated value
    /// (-10.0 means "10% less")
    Percent,
    /// Absolute replacement
    Set,
}

/// One bonus line within a level entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBonus {
    pub stat: WeaponStatKind,
    pub op: BonusOp,
    pub value: f64,
}

/// All bonuses granted by one level transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub level: u32,
    pub bonuses: Vec<LevelBonus>,
}

/// Authoring-time progression table for one weapon kind
///
/// Fixed once loaded; the per-instance walker is [`LevelState`](super::LevelState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub id: String,
    pub name: String,
    pub max_level: u32,
    pub base: WeaponStats,
    #[serde(rename = "levels", default)]
    pub entries: Vec<LevelEntry>,
}

impl LevelTable {
    /// Check authoring invariants
    ///
    /// `max_level ≥ 1`, positive base cooldown, entry levels unique, sorted
    /// and within `[2, max_level]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level < 1 {
            return Err(ConfigError::ValidationError(format!(
                "weapon '{}': max_level must be at least 1",
                self.id
            )));
        }
        if self.base.attack_cooldown <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "weapon '{}': base attack_cooldown must be positive",
                self.id
            )));
        }
        let mut previous = 1u32;
        for entry in &self.entries {
            if entry.level < 2 || entry.level > self.max_level {
                return Err(ConfigError::ValidationError(format!(
                    "weapon '{}': level {} outside [2, {}]",
                    self.id, entry.level, self.max_level
                )));
            }
            if entry.level <= previous {
                return Err(ConfigError::ValidationError(format!(
                    "weapon '{}': level {} out of order or duplicated",
                    self.id, entry.level
                )));
            }
            previous = entry.level;
        }
        Ok(())
    }

    /// The bonus entry for one level transition, if any
    pub fn entry_for(&self, level: u32) -> Option<&LevelEntry> {
        self.entries.iter().find(|e| e.level == level)
    }
}

/// Apply one bonus line to accumulated stats
pub(crate) fn apply_bonus(stats: &mut WeaponStats, bonus: &LevelBonus) {
    let slot = match bonus.stat {
        WeaponStatKind::Damage => &mut stats.damage,
        WeaponStatKind::AttackCooldown => &mut stats.attack_cooldown,
        WeaponStatKind::ProjectileCount => &mut stats.projectile_count,
        WeaponStatKind::Area => &mut stats.area,
        WeaponStatKind::Duration => &mut stats.duration,
        WeaponStatKind::ProjectileSpeed => &mut stats.projectile_speed,
    };
    match bonus.op {
        BonusOp::Add => *slot += bonus.value,
        BonusOp::Percent => *slot *= 1.0 + bonus.value / 100.0,
        BonusOp::Set => *slot = bonus.value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<LevelEntry>) -> LevelTable {
        LevelTable {
            id: "test".to_string(),
            name: "Test".to_string(),
            max_level: 5,
            base: WeaponStats::default(),
            entries,
        }
    }

    #[test]
    fn test_apply_bonus_ops() {
        let mut stats = WeaponStats::default();

        apply_bonus(
            &mut stats,
            &LevelBonus {
                stat: WeaponStatKind::Damage,
                op: BonusOp::Add,
                value: 5.0,
            },
        );
        assert!((stats.damage - 15.0).abs() < f64::EPSILON);

        apply_bonus(
            &mut stats,
            &LevelBonus {
                stat: WeaponStatKind::AttackCooldown,
                op: BonusOp::Percent,
                value: -10.0,
            },
        );
        assert!((stats.attack_cooldown - 0.9).abs() < 1e-9);

        apply_bonus(
            &mut stats,
            &LevelBonus {
                stat: WeaponStatKind::ProjectileCount,
                op: BonusOp::Set,
                value: 3.0,
            },
        );
        assert_eq!(stats.projectiles(), 3);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let t = table(vec![
            LevelEntry {
                level: 2,
                bonuses: vec![],
            },
            LevelEntry {
                level: 4,
                bonuses: vec![],
            },
        ]);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_level() {
        let t = table(vec![LevelEntry {
            level: 9,
            bonuses: vec![],
        }]);
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_level() {
        let t = table(vec![
            LevelEntry {
                level: 3,
                bonuses: vec![],
            },
            LevelEntry {
                level: 3,
                bonuses: vec![],
            },
        ]);
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_cooldown() {
        let mut t = table(vec![]);
        t.base.attack_cooldown = 0.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_shape() {
        let toml = r#"
id = "whip"
name = "Whip"
max_level = 3

[base]
damage = 10.0
attack_cooldown = 1.35
projectile_count = 1.0
area = 1.0
duration = 0.5
projectile_speed = 1.0

[[levels]]
level = 2
bonuses = [{ stat = "damage", op = "add", value = 5.0 }]
"#;
        let parsed: LevelTable = toml::from_str(toml).unwrap();
        assert_eq!(parsed.id, "whip");
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(
            parsed.entries[0].bonuses[0],
            LevelBonus {
                stat: WeaponStatKind::Damage,
                op: BonusOp::Add,
                value: 5.0,
            }
        );
        assert!(parsed.validate().is_ok());
    }
}
