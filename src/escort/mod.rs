//! Escort state machine
//!
//! Unassigned -> Assigned -> Released. Assignments are created by an
//! external authority; this rule only levels the vessel's AI state toward
//! the assignment every tick and performs the one-way release.

use serde::{Deserialize, Serialize};

use crate::core::clock::TickContext;
use crate::core::error::Result;
use crate::core::types::{EntityId, Position, Tick};
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::world::World;
use crate::vessel::{VesselAiState, VesselGoal, VesselState};

/// Per-vessel escort duty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EscortAssignment {
    pub target: Option<EntityId>,
    /// 0 = never released
    pub release_tick: Tick,
    /// Terminal once set
    pub released: bool,
}

impl EscortAssignment {
    pub fn new(target: EntityId, release_tick: Tick) -> Self {
        Self {
            target: Some(target),
            release_tick,
            released: false,
        }
    }

    pub fn should_release(&self, tick: Tick) -> bool {
        !self.released && self.release_tick != 0 && tick >= self.release_tick
    }
}

/// Counts from one escort pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EscortReport {
    pub leveled: usize,
    pub released: usize,
    pub targets_lost: usize,
    pub ai_states_staged: usize,
}

/// Level escort AI state and release expired assignments
pub fn run_escort_tether(world: &mut World, ctx: &TickContext) -> Result<EscortReport> {
    let mut report = EscortReport::default();
    if !ctx.is_recording() {
        return Ok(report);
    }
    world.existence.ensure_fresh(ctx.tick)?;

    let mut commands = CommandBuffer::new();

    for entity in world.escort_assignments.entities_sorted() {
        let Some(assignment) = world.escort_assignments.get_mut(entity) else {
            continue;
        };
        if assignment.released {
            continue;
        }

        if assignment.should_release(ctx.tick) {
            assignment.released = true;

            match world.ai_states.get_mut(entity) {
                Some(ai) => ai.reset(),
                None => {
                    commands.push(Command::InsertAiState(entity, VesselAiState::neutral()));
                    report.ai_states_staged += 1;
                }
            }

            if let Some(tether) = world.child_tethers.get_mut(entity) {
                tether.release();
            }

            tracing::info!("Escort {} released at tick {}", entity, ctx.tick);
            report.released += 1;
            continue;
        }

        let desired = match world.existence.validate(assignment.target) {
            Some(target) => {
                let target_position = world
                    .positions
                    .get(target)
                    .copied()
                    .or_else(|| world.ai_states.get(entity).map(|ai| ai.target_position))
                    .unwrap_or(Position::ZERO);
                VesselAiState::pursue(VesselGoal::Escort, target, target_position)
            }
            None => {
                report.targets_lost += 1;
                VesselAiState {
                    goal: VesselGoal::Escort,
                    state: VesselState::Idle,
                    target_entity: None,
                    target_position: Position::ZERO,
                }
            }
        };

        match world.ai_states.get_mut(entity) {
            Some(ai) => *ai = desired,
            None => {
                commands.push(Command::InsertAiState(entity, desired));
                report.ai_states_staged += 1;
            }
        }
        report.leveled += 1;
    }

    commands.playback(world);
    Ok(report)
}
