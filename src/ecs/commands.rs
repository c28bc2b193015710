//! Deferred structural commands
//!
//! Rules never attach or detach records while walking a store. When the
//! record already exists they update it in place; otherwise they stage the
//! change here and play the buffer back once their pass is complete.

use crate::core::types::EntityId;
use crate::docking::{DockingRequest, DockingState};
use crate::ecs::world::World;
use crate::orders::OrderIntent;
use crate::swarm::SwarmBehavior;
use crate::telemetry::OrderDecision;
use crate::vessel::VesselAiState;

/// A staged structural change
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    InsertOrderIntent(EntityId, OrderIntent),
    InsertAiState(EntityId, VesselAiState),
    InsertSwarmBehavior(EntityId, SwarmBehavior),
    InsertDockingRequest(EntityId, DockingRequest),
    InsertDockingState(EntityId, DockingState),
    InsertOrderDecision(EntityId, OrderDecision),
    InsertDecisionBuffer(EntityId),
    RemoveRescueRequest(EntityId),
}

impl Command {
    pub fn entity(&self) -> EntityId {
        match self {
            Command::InsertOrderIntent(e, _)
            | Command::InsertAiState(e, _)
            | Command::InsertSwarmBehavior(e, _)
            | Command::InsertDockingRequest(e, _)
            | Command::InsertDockingState(e, _)
            | Command::InsertOrderDecision(e, _)
            | Command::InsertDecisionBuffer(e)
            | Command::RemoveRescueRequest(e) => *e,
        }
    }
}

/// Outcome of replaying a command buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub applied: usize,
    /// Commands whose entity was despawned before playback
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Apply every staged command in order. Consumes the buffer.
    pub fn playback(self, world: &mut World) -> PlaybackStats {
        let mut stats = PlaybackStats::default();

        for command in self.commands {
            let entity = command.entity();
            if !world.is_alive(entity) {
                tracing::trace!("Skipping command for despawned entity {}", entity);
                stats.skipped += 1;
                continue;
            }

            match command {
                Command::InsertOrderIntent(e, intent) => {
                    world.order_intents.insert(e, intent);
                }
                Command::InsertAiState(e, ai) => {
                    world.ai_states.insert(e, ai);
                }
                Command::InsertSwarmBehavior(e, behavior) => {
                    world.swarm_behaviors.insert(e, behavior);
                }
                Command::InsertDockingRequest(e, request) => {
                    world.docking_requests.insert(e, request);
                }
                Command::InsertDockingState(e, state) => {
                    world.docking_states.insert(e, state);
                }
                Command::InsertOrderDecision(e, decision) => {
                    world.order_decisions.insert(e, decision);
                }
                Command::InsertDecisionBuffer(e) => {
                    world.decision_buffers.insert(e, Vec::new());
                }
                Command::RemoveRescueRequest(e) => {
                    // Removing an absent request is a no-op
                    world.rescue_requests.remove(e);
                }
            }
            stats.applied += 1;
        }

        stats
    }
}
