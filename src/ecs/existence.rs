//! Existence oracle - cached per-tick liveness of entity handles
//!
//! Entities can be destroyed by unrelated systems between ticks, so a
//! snapshot from an earlier tick is wrong, not merely old. Rules call
//! `ensure_fresh` before dereferencing any stored cross-entity reference.

use ahash::AHashSet;

use crate::core::error::{FleetError, Result};
use crate::core::types::{EntityId, Tick};

#[derive(Debug, Clone, Default)]
pub struct ExistenceOracle {
    live: AHashSet<EntityId>,
    refreshed_at: Option<Tick>,
}

impl ExistenceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the snapshot for `tick`
    pub fn refresh(&mut self, live: impl IntoIterator<Item = EntityId>, tick: Tick) {
        self.live.clear();
        self.live.extend(live);
        self.refreshed_at = Some(tick);
    }

    pub fn refreshed_at(&self) -> Option<Tick> {
        self.refreshed_at
    }

    /// Fails if the snapshot was not taken on `tick`
    pub fn ensure_fresh(&self, tick: Tick) -> Result<()> {
        if self.refreshed_at == Some(tick) {
            Ok(())
        } else {
            Err(FleetError::StaleExistenceCache {
                refreshed: self.refreshed_at,
                current: tick,
            })
        }
    }

    pub fn exists(&self, entity: EntityId) -> bool {
        self.live.contains(&entity)
    }

    /// Passes a reference through only if it still points at a live entity
    pub fn validate(&self, entity: Option<EntityId>) -> Option<EntityId> {
        entity.filter(|e| self.exists(*e))
    }
}
