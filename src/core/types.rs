//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a simulated entity
///
/// `index` is the raw identifier used for deterministic tie-breaks.
/// `generation` is bumped when an index is recycled, so a handle to a
/// despawned entity never reads as alive again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw identifier, lower wins on near-ties
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Simulation tick counter (simulation time unit)
pub type Tick = u64;

/// World-space position
pub type Position = glam::Vec3;
