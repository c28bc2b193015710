//! Proximity gate: raise a docking request once a returning craft is in range

use serde::Serialize;

use crate::core::clock::TickContext;
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::world::World;
use crate::vessel::VesselState;

use super::components::{DockingRequest, DockingSlot, DockingState};

/// Counts from one proximity pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DockingReport {
    pub candidates: usize,
    pub requested: usize,
    pub out_of_range: usize,
    pub blocked_by_policy: usize,
}

pub fn run_docking_proximity_gate(world: &mut World, ctx: &TickContext) -> Result<DockingReport> {
    let mut report = DockingReport::default();
    if !ctx.is_recording() {
        return Ok(report);
    }
    world.existence.ensure_fresh(ctx.tick)?;

    let default_range = world.config.default_docking_range;
    let mut commands = CommandBuffer::new();

    for entity in world.ai_states.entities_sorted() {
        if world.docking_requests.contains(entity)
            || world.docked.contains(entity)
            || world.docking_complete.contains(entity)
            || world.simulation_disabled.contains(entity)
        {
            continue;
        }
        let Some(ai) = world.ai_states.get(entity) else {
            continue;
        };
        if ai.state != VesselState::Returning {
            continue;
        }
        let Some(position) = world.positions.get(entity).copied() else {
            continue;
        };
        let Some(carrier) = world.existence.validate(ai.target_entity) else {
            continue;
        };
        let Some(carrier_position) = world.positions.get(carrier).copied() else {
            continue;
        };
        report.candidates += 1;

        let policy = world.docking_policies.get(carrier).copied().unwrap_or_default();
        if !policy.allow_docking {
            report.blocked_by_policy += 1;
            continue;
        }

        let distance_sq = position.distance_squared(carrier_position);
        if distance_sq > policy.effective_range_sq(default_range) {
            report.out_of_range += 1;
            continue;
        }

        let request = DockingRequest {
            target_carrier: carrier,
            required_slot: slot_for(world, entity),
            request_tick: ctx.tick,
            priority: 0,
        };
        let state = DockingState::docking(&request);
        commands.push(Command::InsertDockingRequest(entity, request));
        match world.docking_states.get_mut(entity) {
            Some(existing) => *existing = state,
            None => commands.push(Command::InsertDockingState(entity, state)),
        }

        tracing::trace!("{} requests docking with {} at tick {}", entity, carrier, ctx.tick);
        report.requested += 1;
    }

    commands.playback(world);
    Ok(report)
}

fn slot_for(world: &World, entity: EntityId) -> DockingSlot {
    if world.strike_craft.contains(entity) {
        DockingSlot::StrikeCraft
    } else {
        DockingSlot::Utility
    }
}
