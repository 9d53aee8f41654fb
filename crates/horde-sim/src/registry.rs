//! Slot registries for enemies and pickups.
//!
//! Slots are never removed. A slot whose entity is gone (or no longer
//! counts as live) is overwritten by the next insert before the list grows.

use hecs::Entity;

#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    slots: Vec<Option<Entity>>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` in the first vacant slot. `is_live` decides whether
    /// an occupied slot still holds a live entity.
    pub fn insert(&mut self, entity: Entity, is_live: impl Fn(Entity) -> bool) -> usize {
        let vacant = self
            .slots
            .iter()
            .position(|slot| slot.map_or(true, |e| !is_live(e)));
        match vacant {
            Some(index) => {
                self.slots[index] = Some(entity);
                index
            }
            None => {
                self.slots.push(Some(entity));
                self.slots.len() - 1
            }
        }
    }

    /// Tombstone the slot holding `entity`, if any.
    pub fn remove(&mut self, entity: Entity) {
        for slot in &mut self.slots {
            if *slot == Some(entity) {
                *slot = None;
            }
        }
    }

    /// Slot index of `entity`.
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(entity))
    }

    /// Occupied slots in slot order. May include dead entities.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Total slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
