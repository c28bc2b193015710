//! Scaffolding ensure-passes
//!
//! Tagged entities are guaranteed their companion records: vessels get an
//! AI state and a decision buffer, strike craft an order decision, drones a
//! swarm behavior. Additions go through a command buffer. The one-shot
//! bootstrap creates the process-wide registry and action event log.

use serde::{Deserialize, Serialize};

use crate::core::clock::TickContext;
use crate::core::types::Tick;
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::world::World;
use crate::swarm::SwarmBehavior;
use crate::telemetry::{ActionEventLog, OrderDecision};
use crate::vessel::VesselAiState;

/// Process-wide fleet registry singleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetRegistry {
    pub registered_tick: Tick,
    pub max_action_events: usize,
}

/// Periodic companion-record ensure pass
#[derive(Debug, Clone, Default)]
pub struct ScaffoldPass {
    last_run: Option<Tick>,
}

impl ScaffoldPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_run(&self) -> Option<Tick> {
        self.last_run
    }

    /// First run is always eligible; afterwards once per `cadence` ticks
    pub fn is_due(&self, tick: Tick, cadence: Tick) -> bool {
        match self.last_run {
            None => true,
            Some(last) => tick >= last.saturating_add(cadence),
        }
    }

    /// Stage missing companions and play them back. Returns the add count.
    pub fn run(&mut self, world: &mut World, ctx: &TickContext) -> usize {
        if !ctx.is_recording() || !self.is_due(ctx.tick, world.config.scaffold_cadence_ticks) {
            return 0;
        }
        self.last_run = Some(ctx.tick);

        let mut commands = CommandBuffer::new();

        for vessel in world.vessels.entities_sorted() {
            if !world.ai_states.contains(vessel) {
                commands.push(Command::InsertAiState(vessel, VesselAiState::neutral()));
            }
            if !world.decision_buffers.contains(vessel) {
                commands.push(Command::InsertDecisionBuffer(vessel));
            }
        }
        for craft in world.strike_craft.entities_sorted() {
            if !world.order_decisions.contains(craft) {
                commands.push(Command::InsertOrderDecision(craft, OrderDecision::default()));
            }
        }
        for drone in world.drones.entities_sorted() {
            if !world.swarm_behaviors.contains(drone) {
                commands.push(Command::InsertSwarmBehavior(drone, SwarmBehavior::default()));
            }
        }

        let stats = commands.playback(world);
        if stats.applied > 0 {
            tracing::debug!("Scaffold pass at tick {} added {} records", ctx.tick, stats.applied);
        }
        stats.applied
    }
}

/// One-shot creation of the registry and action event log singletons
#[derive(Debug, Clone)]
pub struct RegistryBootstrap {
    enabled: bool,
}

impl Default for RegistryBootstrap {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RegistryBootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns true on the single run that did the work
    pub fn run(&mut self, world: &mut World, ctx: &TickContext) -> bool {
        if !self.enabled || !ctx.is_recording() {
            return false;
        }

        let max_events = world.config.max_action_events;
        if world.registry.is_none() {
            world.registry = Some(FleetRegistry {
                registered_tick: ctx.tick,
                max_action_events: max_events,
            });
        }
        if world.action_log.is_none() {
            world.action_log = Some(ActionEventLog::new(max_events));
        }

        self.enabled = false;
        tracing::info!("Fleet registry bootstrapped at tick {} (event capacity {})", ctx.tick, max_events);
        true
    }
}
