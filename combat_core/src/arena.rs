//! Generational entity storage
//!
//! Entities are spawned into recycled slots. A handle carries the slot's
//! generation, so a handle kept past despawn fails to resolve instead of
//! aliasing the slot's next occupant.

use crate::stats::StatBlock;
use serde::{Deserialize, Serialize};

/// Handle to an entity in an [`EntityArena`]
///
/// Compared by slot index and generation; a stale handle returns `None`
/// from every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    block: Option<StatBlock>,
}

/// Slot arena owning every live entity's stat state
#[derive(Debug, Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl EntityArena {
    /// Create an empty arena
    pub fn new() -> Self {
        EntityArena::default()
    }

    /// Spawn an entity, reusing a free slot when one exists
    pub fn spawn(&mut self, block: StatBlock) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.block = Some(block);
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                block: Some(block),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    /// Remove an entity, returning its final stat state
    ///
    /// The slot's generation is bumped so outstanding handles go stale.
    /// Despawning with a stale handle is a no-op.
    pub fn despawn(&mut self, id: EntityId) -> Option<StatBlock> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.block.is_none() {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        slot.block.take()
    }

    /// Look up an entity; `None` for stale or unknown handles
    pub fn get(&self, id: EntityId) -> Option<&StatBlock> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.block.as_ref()
    }

    /// Mutable lookup; `None` for stale or unknown handles
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut StatBlock> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.block.as_mut()
    }

    /// Whether a handle still resolves to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.block.is_some()).count()
    }

    /// Whether no entities are alive
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over live entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &StatBlock)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.block.as_ref().map(|block| {
                (
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    block,
                )
            })
        })
    }

    /// Iterate mutably over live entities
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut StatBlock)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.block.as_mut().map(move |block| {
                (
                    EntityId {
                        index: index as u32,
                        generation,
                    },
                    block,
                )
            })
        })
    }

    /// Recompute every dirty entity, returning how many changed
    ///
    /// Call once per tick, after the expiry sweep and after all apply/remove
    /// traffic for the tick has landed.
    pub fn recompute_dirty(&mut self) -> usize {
        self.iter_mut()
            .map(|(_, block)| block.recompute())
            .filter(|&changed| changed)
            .count()
    }
}
