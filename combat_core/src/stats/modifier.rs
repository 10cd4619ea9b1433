//! Speed modifiers keyed by source identity
//!
//! One consolidated set serves every entity kind. Zone modifiers override
//! timed modifiers outright; within a tier the strongest slow (lowest
//! percentage) governs.

use crate::types::{ModifierKind, SourceId, Tick};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A single speed modifier applied by one source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedModifier {
    pub kind: ModifierKind,
    /// Speed as a percentage of base: 70.0 means "move at 70% speed"
    pub percentage: f64,
    /// Expiry tick. Authoritative for timed modifiers; for zone modifiers it
    /// is a lease refreshed on every stay signal and only reclaimed by the
    /// sweep when an exit signal was lost.
    pub expires_at: Tick,
}

/// The set of active speed modifiers on one entity, keyed by source
///
/// At most one modifier per source; reapplying from the same source updates
/// in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierSet {
    entries: HashMap<SourceId, SpeedModifier>,
}

impl ModifierSet {
    /// Create an empty set
    pub fn new() -> Self {
        ModifierSet::default()
    }

    /// Insert or update the modifier for a source
    ///
    /// Returns true when the stored percentage or kind actually changed.
    /// An update that only moves the expiry tick returns false, since the
    /// derived speed is unaffected.
    pub fn apply(&mut self, source: SourceId, modifier: SpeedModifier) -> bool {
        match self.entries.entry(source) {
            Entry::Occupied(mut occupied) => {
                let stored = occupied.get_mut();
                let changed =
                    stored.percentage != modifier.percentage || stored.kind != modifier.kind;
                *stored = modifier;
                changed
            }
            Entry::Vacant(vacant) => {
                vacant.insert(modifier);
                true
            }
        }
    }

    /// Remove the modifier for a source
    ///
    /// Absent sources are fine; the source may already have despawned.
    pub fn remove(&mut self, source: SourceId) -> Option<SpeedModifier> {
        self.entries.remove(&source)
    }

    /// Move only the expiry lease for a source; derived speed is unaffected
    ///
    /// Returns false if the source has no modifier.
    pub fn refresh_expiry(&mut self, source: SourceId, expires_at: Tick) -> bool {
        match self.entries.get_mut(&source) {
            Some(stored) => {
                stored.expires_at = expires_at;
                true
            }
            None => false,
        }
    }

    /// Get the modifier for a source
    pub fn get(&self, source: SourceId) -> Option<&SpeedModifier> {
        self.entries.get(&source)
    }

    /// Whether a source currently has a modifier
    pub fn contains(&self, source: SourceId) -> bool {
        self.entries.contains_key(&source)
    }

    /// Number of active modifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multiplicative speed factor for the current set
    ///
    /// While any zone modifier is present the strongest zone slow governs and
    /// timed modifiers are ignored entirely, regardless of their values.
    /// Otherwise the strongest timed slow governs. An empty set yields 1.0.
    pub fn speed_factor(&self) -> f64 {
        let strongest = |kind: ModifierKind| {
            self.entries
                .values()
                .filter(|m| m.kind == kind)
                .map(|m| m.percentage)
                .fold(f64::INFINITY, f64::min)
        };

        let zone = strongest(ModifierKind::Zone);
        let percentage = if zone.is_finite() {
            zone
        } else {
            let timed = strongest(ModifierKind::Timed);
            if !timed.is_finite() {
                return 1.0;
            }
            timed
        };

        percentage / 100.0
    }

    /// Collect every source whose expiry tick has passed
    ///
    /// Used by the batched per-tick sweep; does not mutate the set so the
    /// caller can route removals through the owning entity's dirty tracking.
    pub fn collect_expired(&self, now: Tick, out: &mut Vec<(SourceId, ModifierKind)>) {
        for (source, modifier) in &self.entries {
            if now >= modifier.expires_at {
                out.push((*source, modifier.kind));
            }
        }
    }
}
