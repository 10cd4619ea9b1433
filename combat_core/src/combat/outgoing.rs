//! Outgoing damage rolls - crit and variance

use crate::stats::StatBlock;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A rolled outgoing hit, before the defender's mitigation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutgoingHit {
    pub amount: f64,
    pub is_critical: bool,
}

/// Roll one outgoing hit
///
/// One uniform draw decides the crit; on a hit the amount is multiplied by
/// `crit_multiplier`. A positive `variance` then spreads the result uniformly
/// in `[1 - variance, 1 + variance]`. The amount never goes negative.
pub fn roll_outgoing(
    base_damage: f64,
    damage_multiplier: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    variance: f64,
    rng: &mut impl Rng,
) -> OutgoingHit {
    let mut amount = base_damage * damage_multiplier;

    let is_critical = rng.gen::<f64>() < crit_chance;
    if is_critical {
        amount *= crit_multiplier;
    }

    if variance > 0.0 {
        amount *= rng.gen_range(1.0 - variance..=1.0 + variance);
    }

    OutgoingHit {
        amount: amount.max(0.0),
        is_critical,
    }
}

/// Roll one outgoing hit using an attacker's current stats
pub fn roll_outgoing_for(
    attacker: &StatBlock,
    base_damage: f64,
    variance: f64,
    rng: &mut impl Rng,
) -> OutgoingHit {
    roll_outgoing(
        base_damage,
        attacker.damage_multiplier(),
        attacker.crit_chance(),
        attacker.crit_multiplier(),
        variance,
        rng,
    )
}
