//! Incoming damage resolution - armor, chip floor, death transition

use super::result::HitResult;
use crate::stats::StatBlock;
use tracing::debug;

/// Minimum damage a non-negative hit always deals, no matter the armor
///
/// Keeps stacked armor from making a target fully unkillable by attrition.
pub const MIN_CHIP_DAMAGE: f64 = 0.1;

/// Flat armor reduction with a chip-damage floor
///
/// `max(raw - armor, 0.1)` for non-negative raw damage. Negative raw damage
/// is rejected and yields 0.0: an incoming hit never heals.
pub fn resolve_incoming(raw_damage: f64, armor: f64) -> f64 {
    if raw_damage < 0.0 {
        return 0.0;
    }
    (raw_damage - armor).max(MIN_CHIP_DAMAGE)
}

/// Pre-armor hit interception (shields and similar capabilities)
pub trait HitInterceptor {
    /// Inspect an incoming hit before any armor math runs
    ///
    /// Returning true consumes the hit entirely: no health mutation follows.
    /// The implementation's own side effects (stack consumption, internal
    /// cooldowns) must happen inside this call, exactly once per hit.
    fn intercept(&mut self, raw_damage: f64) -> bool;
}

/// Resolve and apply one incoming hit to a defender
///
/// Order: death guard, negative-damage rejection, optional interceptor,
/// armor resolution, health mutation. The death transition fires exactly
/// once per life; hits against a dead defender are no-ops.
pub fn apply_incoming(
    defender: &mut StatBlock,
    raw_damage: f64,
    mut interceptor: Option<&mut dyn HitInterceptor>,
) -> HitResult {
    let health_before = defender.health();

    if defender.is_dead() || raw_damage < 0.0 {
        return HitResult::untouched(raw_damage, health_before);
    }

    if let Some(interceptor) = interceptor.as_deref_mut() {
        if interceptor.intercept(raw_damage) {
            debug!(raw_damage, "hit fully blocked before armor");
            return HitResult::blocked(raw_damage, health_before);
        }
    }

    let final_damage = resolve_incoming(raw_damage, defender.armor());
    let outcome = defender.apply_damage(final_damage);

    HitResult {
        raw_damage,
        damage_dealt: outcome.health_before - outcome.health_after,
        blocked: false,
        is_killing_blow: outcome.died,
        health_before: outcome.health_before,
        health_after: outcome.health_after,
    }
}
