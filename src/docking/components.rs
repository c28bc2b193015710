//! Docking records

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick};

/// Kind of bay a docking craft needs on its carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockingSlot {
    #[default]
    Utility,
    StrikeCraft,
}

/// Pending request to dock with a carrier
///
/// Its presence excludes the entity from the proximity gate, so at most one
/// request exists per entity until the docking subsystem consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingRequest {
    pub target_carrier: EntityId,
    pub required_slot: DockingSlot,
    pub request_tick: Tick,
    pub priority: u8,
}

/// Carrier-side docking rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockingPolicy {
    pub allow_docking: bool,
    /// Non-positive means "use the configured default"
    pub docking_range: f32,
}

impl DockingPolicy {
    pub fn closed() -> Self {
        Self {
            allow_docking: false,
            docking_range: 0.0,
        }
    }

    /// Squared range to compare against, falling back to `default_range`
    pub fn effective_range_sq(&self, default_range: f32) -> f32 {
        let range = if self.docking_range > 0.0 {
            self.docking_range
        } else {
            default_range
        };
        range * range
    }
}

impl Default for DockingPolicy {
    fn default() -> Self {
        Self {
            allow_docking: true,
            docking_range: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DockingPhase {
    #[default]
    None,
    Docking,
}

/// Progress of a craft through the docking sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DockingState {
    pub phase: DockingPhase,
    pub target: Option<EntityId>,
    pub slot: DockingSlot,
    pub request_tick: Tick,
    pub phase_tick: Tick,
}

impl DockingState {
    /// State entered when a request is raised
    pub fn docking(request: &DockingRequest) -> Self {
        Self {
            phase: DockingPhase::Docking,
            target: Some(request.target_carrier),
            slot: request.required_slot,
            request_tick: request.request_tick,
            phase_tick: request.request_tick,
        }
    }
}
