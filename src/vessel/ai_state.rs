//! High-level vessel AI state shared by several rules
//!
//! `target_entity == None` must never be observed together with a state
//! that needs a target. The setters below are the only way rules in this
//! crate change the target/state pair.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VesselGoal {
    #[default]
    None,
    Escort,
    Patrol,
    Mine,
    ReturnToBase,
    Engage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VesselState {
    #[default]
    Idle,
    MovingToTarget,
    Engaging,
    Returning,
    Docking,
}

impl VesselState {
    /// States that are meaningless without a target entity
    pub fn requires_target(&self) -> bool {
        matches!(self, VesselState::MovingToTarget | VesselState::Engaging)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VesselAiState {
    pub goal: VesselGoal,
    pub state: VesselState,
    pub target_entity: Option<EntityId>,
    pub target_position: Position,
}

impl VesselAiState {
    /// Neutral defaults: no goal, idle, no target
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Head for a target entity
    pub fn pursue(goal: VesselGoal, target: EntityId, target_position: Position) -> Self {
        Self {
            goal,
            state: VesselState::MovingToTarget,
            target_entity: Some(target),
            target_position,
        }
    }

    /// Head home toward `base`; the proximity gate watches this state
    pub fn returning_to(base: EntityId) -> Self {
        Self {
            goal: VesselGoal::ReturnToBase,
            state: VesselState::Returning,
            target_entity: Some(base),
            target_position: Position::ZERO,
        }
    }

    /// Drop the target; demotes target-bound states to Idle
    pub fn clear_target(&mut self) {
        self.target_entity = None;
        self.target_position = Position::ZERO;
        if self.state.requires_target() {
            self.state = VesselState::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::neutral();
    }

    pub fn is_consistent(&self) -> bool {
        self.target_entity.is_some() || !self.state.requires_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_consistent() {
        assert!(VesselAiState::neutral().is_consistent());
    }

    #[test]
    fn test_clear_target_demotes_state() {
        let mut ai = VesselAiState::pursue(VesselGoal::Escort, EntityId::new(1, 0), Position::ONE);
        assert!(ai.is_consistent());
        ai.clear_target();
        assert_eq!(ai.state, VesselState::Idle);
        assert_eq!(ai.goal, VesselGoal::Escort);
        assert!(ai.is_consistent());
    }

    #[test]
    fn test_returning_keeps_state_without_demotion() {
        let mut ai = VesselAiState::returning_to(EntityId::new(2, 0));
        ai.clear_target();
        assert_eq!(ai.state, VesselState::Returning);
        assert!(ai.is_consistent());
    }
}
