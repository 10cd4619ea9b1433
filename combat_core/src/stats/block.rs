//! StatBlock - per-entity stat state with lazy recomputation

use crate::stats::modifier::{ModifierSet, SpeedModifier};
use crate::types::{ModifierKind, SourceId, Tick};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Authoring-time base stats for an entity kind
///
/// Derived values are always rebuilt from these, never from a previous
/// derived value, so repeated apply/remove cycles cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_health: f64,
    pub move_speed: f64,
    pub damage_multiplier: f64,
    /// Chance of a critical hit, 0.0..=1.0
    pub crit_chance: f64,
    /// Damage factor applied on a critical hit
    pub crit_multiplier: f64,
    pub armor: f64,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            max_health: 100.0,
            move_speed: 5.0,
            damage_multiplier: 1.0,
            crit_chance: 0.05,
            crit_multiplier: 2.0,
            armor: 0.0,
        }
    }
}

/// Outcome of applying already-resolved damage to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub health_before: f64,
    pub health_after: f64,
    /// True only on the hit that crossed the death threshold
    pub died: bool,
}

/// Complete runtime stat state for one entity
///
/// Owns the base stats, the speed-modifier set and the scalar speed buff,
/// and recomputes derived values lazily behind a dirty flag. Mutations
/// report changes through their return values and through the
/// [`stats_version`](StatBlock::stats_version) counter; there is no
/// callback registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBlock {
    base: BaseStats,
    current_health: f64,
    current_move_speed: f64,
    current_damage_multiplier: f64,
    current_crit_chance: f64,
    current_crit_multiplier: f64,
    armor: f64,
    /// Last-write-wins scalar speed buff as a decimal fraction (0.2 = +20%);
    /// not source-tracked.
    speed_buff: f64,
    modifiers: ModifierSet,
    dirty: bool,
    is_dead: bool,
    stats_version: u64,
}

impl StatBlock {
    /// Create a live entity at full health with derived stats at base
    pub fn new(base: BaseStats) -> Self {
        StatBlock {
            base,
            current_health: base.max_health,
            current_move_speed: base.move_speed,
            current_damage_multiplier: base.damage_multiplier,
            current_crit_chance: base.crit_chance,
            current_crit_multiplier: base.crit_multiplier,
            armor: base.armor,
            speed_buff: 0.0,
            modifiers: ModifierSet::new(),
            dirty: false,
            is_dead: false,
            stats_version: 0,
        }
    }

    /// The authoring-time base stats
    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    // === Speed modifiers ===

    /// Insert or update the speed modifier for a source
    ///
    /// Marks the block dirty only when the stored percentage or kind actually
    /// changed; expiry-only updates land without a dirty transition. Returns
    /// whether a dirty transition occurred.
    pub fn apply_speed_modifier(
        &mut self,
        source: SourceId,
        percentage: f64,
        kind: ModifierKind,
        expires_at: Tick,
    ) -> bool {
        let changed = self.modifiers.apply(
            source,
            SpeedModifier {
                kind,
                percentage,
                expires_at,
            },
        );
        if changed {
            trace!(%source, percentage, ?kind, "speed modifier applied");
            self.dirty = true;
        }
        changed
    }

    /// Remove the speed modifier for a source
    ///
    /// A source that never applied anything (or already expired) is a silent
    /// no-op. Returns whether a modifier was removed.
    pub fn remove_speed_modifier(&mut self, source: SourceId) -> bool {
        if self.modifiers.remove(source).is_some() {
            trace!(%source, "speed modifier removed");
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Move only the expiry lease of a source's modifier; never marks dirty
    pub fn refresh_modifier_expiry(&mut self, source: SourceId, expires_at: Tick) -> bool {
        self.modifiers.refresh_expiry(source, expires_at)
    }

    /// The active modifier set
    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// Overwrite the scalar speed buff; dirty only on change
    pub fn set_speed_buff(&mut self, buff: f64) -> bool {
        if self.speed_buff == buff {
            return false;
        }
        self.speed_buff = buff;
        self.dirty = true;
        true
    }

    /// Current scalar speed buff
    pub fn speed_buff(&self) -> f64 {
        self.speed_buff
    }

    // === Recomputation ===

    /// Whether derived stats are stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild derived stats from base; harmless no-op when not dirty
    ///
    /// Derivation always starts from `base.move_speed`: the strongest zone
    /// slow governs while any zone modifier exists (timed ignored), otherwise
    /// the strongest timed slow, otherwise base; the scalar buff multiplies
    /// last. Returns whether anything was recomputed.
    pub fn recompute(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.current_move_speed =
            self.base.move_speed * self.modifiers.speed_factor() * (1.0 + self.speed_buff);
        self.dirty = false;
        self.bump_version();
        true
    }

    /// Change counter polled by display collaborators
    ///
    /// Bumped by every successful recompute and every health mutation.
    pub fn stats_version(&self) -> u64 {
        self.stats_version
    }

    fn bump_version(&mut self) {
        self.stats_version = self.stats_version.wrapping_add(1);
    }

    // === Derived stats ===

    /// Effective movement speed as of the last recompute
    pub fn move_speed(&self) -> f64 {
        self.current_move_speed
    }

    pub fn damage_multiplier(&self) -> f64 {
        self.current_damage_multiplier
    }

    pub fn crit_chance(&self) -> f64 {
        self.current_crit_chance
    }

    pub fn crit_multiplier(&self) -> f64 {
        self.current_crit_multiplier
    }

    pub fn armor(&self) -> f64 {
        self.armor
    }

    // === Passive-upgrade mutations ===

    pub fn set_armor(&mut self, armor: f64) {
        self.armor = armor;
        self.bump_version();
    }

    pub fn set_damage_multiplier(&mut self, multiplier: f64) {
        self.current_damage_multiplier = multiplier;
        self.bump_version();
    }

    pub fn set_crit_chance(&mut self, chance: f64) {
        self.current_crit_chance = chance;
        self.bump_version();
    }

    pub fn set_crit_multiplier(&mut self, multiplier: f64) {
        self.current_crit_multiplier = multiplier;
        self.bump_version();
    }

    // === Health and death ===

    pub fn health(&self) -> f64 {
        self.current_health
    }

    pub fn max_health(&self) -> f64 {
        self.base.max_health
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Restore health, capped at max; dead entities stay dead
    pub fn heal(&mut self, amount: f64) {
        if self.is_dead || amount <= 0.0 {
            return;
        }
        let healed = (self.current_health + amount).min(self.base.max_health);
        if healed != self.current_health {
            self.current_health = healed;
            self.bump_version();
        }
    }

    /// Apply already-resolved damage to health
    ///
    /// Health is clamped to `[0, max_health]` and the death transition fires
    /// exactly once per life; every call after death is a no-op.
    pub fn apply_damage(&mut self, final_damage: f64) -> DamageOutcome {
        let health_before = self.current_health;
        if self.is_dead || final_damage <= 0.0 {
            return DamageOutcome {
                health_before,
                health_after: health_before,
                died: false,
            };
        }

        self.current_health = (self.current_health - final_damage).max(0.0);
        let died = self.current_health <= 0.0;
        if died {
            self.is_dead = true;
            debug!(health_before, final_damage, "entity died");
        }
        self.bump_version();
        DamageOutcome {
            health_before,
            health_after: self.current_health,
            died,
        }
    }

    /// Reset to spawn state: full health, no modifiers, no buff, alive
    pub fn respawn(&mut self) {
        self.current_health = self.base.max_health;
        self.current_move_speed = self.base.move_speed;
        self.current_damage_multiplier = self.base.damage_multiplier;
        self.current_crit_chance = self.base.crit_chance;
        self.current_crit_multiplier = self.base.crit_multiplier;
        self.armor = self.base.armor;
        self.speed_buff = 0.0;
        self.modifiers = ModifierSet::new();
        self.dirty = false;
        self.is_dead = false;
        self.bump_version();
    }
}
