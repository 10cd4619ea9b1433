//! Effect lifecycle - zone and timed speed effects
//!
//! Bridges spatial overlap and timer events into stat-block mutations, and
//! runs the once-per-tick batched expiry sweep. Within a tick, route all
//! contact/apply/exit traffic through here first, then sweep, then let dirty
//! blocks recompute.

use crate::stats::StatBlock;
use crate::types::{ModifierKind, SourceId, Tick};
use tracing::debug;

/// A zone's contact parameters, as delivered by the spatial collaborator
#[derive(Debug, Clone, Copy)]
pub struct ZoneContact {
    pub source: SourceId,
    /// Speed while inside, percent of base (70.0 = move at 70%)
    pub percentage: f64,
    /// Lease ticks granted per enter/stay signal. Exit removal is
    /// authoritative; the lease only lets the sweep reclaim a modifier whose
    /// exit signal was lost.
    pub lease: Tick,
}

/// Bridges overlap and timer events into per-entity modifier transitions
#[derive(Debug, Default)]
pub struct EffectCoordinator {
    expired_scratch: Vec<(SourceId, ModifierKind)>,
}

impl EffectCoordinator {
    pub fn new() -> Self {
        EffectCoordinator::default()
    }

    /// Overlap enter or stay for a zone effect
    ///
    /// First contact activates the modifier; every subsequent contact
    /// refreshes the lease (and picks up a changed percentage). Enter and
    /// stay are deliberately the same upsert.
    pub fn zone_contact(&mut self, block: &mut StatBlock, contact: ZoneContact, now: Tick) {
        let expires_at = now.saturating_add(contact.lease);
        block.apply_speed_modifier(
            contact.source,
            contact.percentage,
            ModifierKind::Zone,
            expires_at,
        );
    }

    /// Overlap exit: immediate removal, no grace period
    ///
    /// Exits for sources with no active modifier are silent no-ops; the zone
    /// may already have despawned.
    pub fn zone_exit(&mut self, block: &mut StatBlock, source: SourceId) {
        block.remove_speed_modifier(source);
    }

    /// Apply or extend a position-independent timed effect
    ///
    /// A repeat apply from the same source extends the expiry; with identical
    /// percentage it causes no dirty transition.
    pub fn apply_timed(
        &mut self,
        block: &mut StatBlock,
        source: SourceId,
        percentage: f64,
        duration: Tick,
        now: Tick,
    ) {
        let expires_at = now.saturating_add(duration);
        block.apply_speed_modifier(source, percentage, ModifierKind::Timed, expires_at);
    }

    /// Batched expiry sweep across all entities
    ///
    /// Run exactly once per tick, before dirty blocks recompute, so every
    /// expiry lands in the same tick's derived values. Timed expiry is
    /// authoritative here; a zone entry is only reclaimed when its lease
    /// lapsed without an exit signal. Returns how many modifiers expired.
    pub fn sweep<'a>(
        &mut self,
        now: Tick,
        blocks: impl IntoIterator<Item = &'a mut StatBlock>,
    ) -> usize {
        let mut removed = 0;
        for block in blocks {
            block
                .modifiers()
                .collect_expired(now, &mut self.expired_scratch);
            for (source, kind) in self.expired_scratch.drain(..) {
                if kind == ModifierKind::Zone {
                    debug!(%source, "zone lease lapsed without an exit signal");
                }
                block.remove_speed_modifier(source);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BaseStats;

    const LEASE: Tick = 10;

    fn block() -> StatBlock {
        StatBlock::new(BaseStats {
            move_speed: 5.0,
            ..BaseStats::default()
        })
    }

    fn contact(source: u64, percentage: f64) -> ZoneContact {
        ZoneContact {
            source: SourceId(source),
            percentage,
            lease: LEASE,
        }
    }

    #[test]
    fn test_zone_enter_and_exit() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();

        coordinator.zone_contact(&mut entity, contact(1, 70.0), 0);
        entity.recompute();
        assert!((entity.move_speed() - 3.5).abs() < 1e-9);

        coordinator.zone_exit(&mut entity, SourceId(1));
        entity.recompute();
        assert!((entity.move_speed() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stay_refreshes_lease_without_dirtying() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();

        coordinator.zone_contact(&mut entity, contact(1, 70.0), 0);
        entity.recompute();

        // Stay signals keep arriving; none of them dirties the block
        for now in 1..=5 {
            coordinator.zone_contact(&mut entity, contact(1, 70.0), now);
            assert!(!entity.is_dirty());
        }
        assert_eq!(entity.modifiers().get(SourceId(1)).unwrap().expires_at, 5 + LEASE);

        // Because the lease was refreshed, a sweep inside the window removes nothing
        assert_eq!(coordinator.sweep(LEASE, std::iter::once(&mut entity)), 0);
        assert!((entity.move_speed() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_lost_exit_reclaimed_by_lease_sweep() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();

        coordinator.zone_contact(&mut entity, contact(1, 70.0), 0);
        entity.recompute();

        // No exit ever arrives; once the lease lapses the sweep reclaims it
        assert_eq!(coordinator.sweep(LEASE, std::iter::once(&mut entity)), 1);
        assert!(entity.is_dirty());
        entity.recompute();
        assert!((entity.move_speed() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timed_expiry_is_batched_and_marks_dirty_before_recompute() {
        let mut coordinator = EffectCoordinator::new();
        let mut a = block();
        let mut b = block();

        coordinator.apply_timed(&mut a, SourceId(1), 50.0, 30, 0);
        coordinator.apply_timed(&mut b, SourceId(2), 60.0, 50, 0);
        a.recompute();
        b.recompute();

        // Tick 30: only the first effect has run out
        let removed = coordinator.sweep(30, [&mut a, &mut b]);
        assert_eq!(removed, 1);
        assert!(a.is_dirty());
        assert!(!b.is_dirty());

        a.recompute();
        b.recompute();
        assert!((a.move_speed() - 5.0).abs() < f64::EPSILON);
        assert!((b.move_speed() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeat_timed_apply_extends_expiry() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();

        coordinator.apply_timed(&mut entity, SourceId(1), 50.0, 30, 0);
        entity.recompute();
        coordinator.apply_timed(&mut entity, SourceId(1), 50.0, 30, 20);
        assert!(!entity.is_dirty());

        // The original expiry has passed, but the extension holds
        assert_eq!(coordinator.sweep(30, std::iter::once(&mut entity)), 0);
        assert_eq!(coordinator.sweep(50, std::iter::once(&mut entity)), 1);
    }

    #[test]
    fn test_zone_priority_through_coordinator() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();

        coordinator.zone_contact(&mut entity, contact(1, 70.0), 0);
        coordinator.apply_timed(&mut entity, SourceId(2), 50.0, 100, 0);
        entity.recompute();
        assert!((entity.move_speed() - 3.5).abs() < 1e-9);

        coordinator.zone_exit(&mut entity, SourceId(1));
        entity.recompute();
        assert!((entity.move_speed() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_exit_for_vanished_source_is_safe() {
        let mut coordinator = EffectCoordinator::new();
        let mut entity = block();
        coordinator.zone_exit(&mut entity, SourceId(404));
        assert!(!entity.is_dirty());
    }
}
