//! HitResult - outcome of one resolved incoming hit

use serde::{Deserialize, Serialize};

/// What a single incoming hit did to the defender
///
/// Returned from [`apply_incoming`](super::apply_incoming) for the caller to
/// consume fire-and-forget: damage popups, loot spawns and kill counters all
/// read from here rather than subscribing to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    /// Damage as delivered by the attacker, before mitigation
    pub raw_damage: f64,
    /// Health actually lost
    pub damage_dealt: f64,
    /// The hit was consumed by a pre-armor interceptor
    pub blocked: bool,
    /// This hit crossed the death threshold
    pub is_killing_blow: bool,
    pub health_before: f64,
    pub health_after: f64,
}

impl HitResult {
    /// A hit that never reached resolution (dead defender, negative damage)
    pub(crate) fn untouched(raw_damage: f64, health: f64) -> Self {
        HitResult {
            raw_damage,
            damage_dealt: 0.0,
            blocked: false,
            is_killing_blow: false,
            health_before: health,
            health_after: health,
        }
    }

    /// A hit fully consumed by an interceptor before armor math
    pub(crate) fn blocked(raw_damage: f64, health: f64) -> Self {
        HitResult {
            blocked: true,
            ..HitResult::untouched(raw_damage, health)
        }
    }

    /// Signed health change (always ≤ 0)
    pub fn health_change(&self) -> f64 {
        self.health_after - self.health_before
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        if self.blocked {
            return "blocked".to_string();
        }
        if self.damage_dealt <= 0.0 {
            return "no damage".to_string();
        }
        let mut text = format!("{:.1} damage", self.damage_dealt);
        if self.is_killing_blow {
            text.push_str(", FATAL");
        }
        text
    }
}
