//! Per-entity record storage
//!
//! Presence in a store is itself state: a record is attached when the
//! entity has an entry, absent otherwise.

use ahash::{AHashMap, AHashSet};

use crate::core::types::EntityId;

/// Typed records keyed by entity
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    items: AHashMap<EntityId, T>,
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            items: AHashMap::new(),
        }
    }

    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        self.items.insert(entity, value)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.items.remove(&entity)
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.items.get(&entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.items.get_mut(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.items.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities holding this record, in ascending id order
    ///
    /// Rules iterate this snapshot so their visiting order (and anything
    /// they append to ordered logs) is reproducible across runs.
    pub fn entities_sorted(&self) -> Vec<EntityId> {
        let mut entities: Vec<EntityId> = self.items.keys().copied().collect();
        entities.sort_unstable();
        entities
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(entity, value)| (*entity, value))
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-sized marker records keyed by entity
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    entities: AHashSet<EntityId>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tag was newly added
    pub fn insert(&mut self, entity: EntityId) -> bool {
        self.entities.insert(entity)
    }

    pub fn remove(&mut self, entity: EntityId) -> bool {
        self.entities.remove(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities_sorted(&self) -> Vec<EntityId> {
        let mut entities: Vec<EntityId> = self.entities.iter().copied().collect();
        entities.sort_unstable();
        entities
    }
}
