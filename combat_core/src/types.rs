//! Core identity and time types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation time, counted in discrete ticks by the authoritative loop
pub type Tick = u64;

/// Opaque identity token for whoever applied an effect
///
/// Used for idempotent upsert and later removal of modifiers. This is a
/// lookup key only, never an owning reference: a token whose source has
/// despawned simply fails to match on the next lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub u64);

impl From<u64> for SourceId {
    fn from(raw: u64) -> Self {
        SourceId(raw)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// How a speed modifier lives and dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Active while a spatial overlap holds; removed immediately on exit
    Zone,
    /// Active until an absolute expiration tick, independent of position
    Timed,
}
