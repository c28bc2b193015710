//! Per-vessel records read or written by the order rules

pub mod ai_state;

pub use ai_state::{VesselAiState, VesselGoal, VesselState};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;

/// Link from a carried craft to its parent carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChildTether {
    pub parent: Option<EntityId>,
    /// Set once the craft may resume autonomous patrol
    pub free_to_patrol: bool,
}

impl ChildTether {
    pub fn to_parent(parent: EntityId) -> Self {
        Self {
            parent: Some(parent),
            free_to_patrol: false,
        }
    }

    pub fn release(&mut self) {
        self.parent = None;
        self.free_to_patrol = true;
    }
}

/// Read-only capability snapshot maintained by the damage model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    pub is_alive: bool,
    pub is_mobile: bool,
}

impl CapabilitySnapshot {
    /// Alive but unable to move under its own power
    pub fn is_stranded(&self) -> bool {
        self.is_alive && !self.is_mobile
    }
}

impl Default for CapabilitySnapshot {
    fn default() -> Self {
        Self {
            is_alive: true,
            is_mobile: true,
        }
    }
}

/// Thrust control for a swarm anchor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SwarmThrust {
    pub active: bool,
    pub desired_direction: Vec3,
    pub current_thrust: f32,
}

impl SwarmThrust {
    pub fn engage(&mut self, direction: Vec3) {
        self.active = true;
        self.desired_direction = direction;
    }

    pub fn disengage(&mut self) {
        self.active = false;
        self.current_thrust = 0.0;
    }
}
