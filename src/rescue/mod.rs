//! Rescue / tow resolution
//!
//! Validates each rescuer's request against the target's capability snapshot
//! and steers the rescuer's swarm thrust toward the nearest anchor. Invalid
//! requests are removed through the command buffer after the pass.

pub mod anchor;
pub mod request;

pub use anchor::{nearest_anchor, rescue_direction, FALLBACK_DIRECTION};
pub use request::{issue_rescue_request, validate_request, RescueRequest, RescueValidity};

use serde::Serialize;

use crate::core::clock::TickContext;
use crate::core::error::Result;
use crate::core::types::{EntityId, Position};
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::world::World;

/// Counts from one rescue pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RescueReport {
    pub valid: usize,
    pub removed: usize,
    pub thrust_engaged: usize,
}

pub fn run_rescue_resolution(world: &mut World, ctx: &TickContext) -> Result<RescueReport> {
    let mut report = RescueReport::default();
    if !ctx.is_recording() {
        return Ok(report);
    }
    world.existence.ensure_fresh(ctx.tick)?;

    let grace = world.config.rescue_grace_ticks;
    let tie_epsilon = world.config.anchor_tie_epsilon;

    // Snapshot anchors once; the scan is shared by every rescuer this tick
    let anchors: Vec<(EntityId, Position)> = world
        .anchors
        .entities_sorted()
        .into_iter()
        .filter(|anchor| world.existence.exists(*anchor))
        .filter_map(|anchor| world.positions.get(anchor).map(|pos| (anchor, *pos)))
        .collect();

    let mut commands = CommandBuffer::new();

    for entity in world.rescue_requests.entities_sorted() {
        let Some(request) = world.rescue_requests.get(entity).copied() else {
            continue;
        };

        let validity = validate_request(&request, ctx.tick, grace, &world.existence, &world.capabilities);
        if !validity.is_valid() {
            commands.push(Command::RemoveRescueRequest(entity));
            if let Some(thrust) = world.swarm_thrust.get_mut(entity) {
                thrust.disengage();
            }
            tracing::debug!("Rescue request on {} dropped: {:?}", entity, validity);
            report.removed += 1;
            continue;
        }
        report.valid += 1;

        let origin = world.positions.get(entity).copied();
        let Some(thrust) = world.swarm_thrust.get_mut(entity) else {
            continue;
        };
        let anchor = origin.and_then(|from| nearest_anchor(from, anchors.iter().copied(), tie_epsilon));
        thrust.engage(rescue_direction(origin, anchor.map(|(_, pos)| pos)));
        report.thrust_engaged += 1;
    }

    commands.playback(world);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Tick;
    use crate::vessel::{CapabilitySnapshot, SwarmThrust};
    use glam::Vec3;

    fn run_at(world: &mut World, tick: Tick) -> RescueReport {
        let live: Vec<EntityId> = world.alive_entities().collect();
        world.existence.refresh(live, tick);
        run_rescue_resolution(world, &TickContext::recording(tick)).unwrap()
    }

    fn stranded_target(world: &mut World) -> EntityId {
        let target = world.spawn_at(Position::new(0.0, 50.0, 0.0));
        world.capabilities.insert(
            target,
            CapabilitySnapshot {
                is_alive: true,
                is_mobile: false,
            },
        );
        target
    }

    #[test]
    fn test_valid_request_steers_toward_nearest_anchor() {
        let mut world = World::new();
        let target = stranded_target(&mut world);
        let rescuer = world.spawn_at(Position::ZERO);
        let near = world.spawn_at(Position::new(0.0, 0.0, 5.0));
        let far = world.spawn_at(Position::new(40.0, 0.0, 0.0));
        world.anchors.insert(near);
        world.anchors.insert(far);
        world.rescue_requests.insert(rescuer, RescueRequest::new(target, 0, 0));
        world.swarm_thrust.insert(rescuer, SwarmThrust::default());

        let report = run_at(&mut world, 1);
        assert_eq!(report.valid, 1);
        assert_eq!(report.thrust_engaged, 1);

        let thrust = world.swarm_thrust.get(rescuer).unwrap();
        assert!(thrust.active);
        assert!((thrust.desired_direction - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_no_anchor_falls_back_to_x() {
        let mut world = World::new();
        let target = stranded_target(&mut world);
        let rescuer = world.spawn_at(Position::ZERO);
        world.rescue_requests.insert(rescuer, RescueRequest::new(target, 0, 0));
        world.swarm_thrust.insert(rescuer, SwarmThrust::default());

        run_at(&mut world, 1);
        assert_eq!(world.swarm_thrust.get(rescuer).unwrap().desired_direction, Vec3::X);
    }

    #[test]
    fn test_expired_request_removed_after_grace() {
        let mut world = World::new();
        let target = stranded_target(&mut world);
        let rescuer = world.spawn_at(Position::ZERO);
        world.rescue_requests.insert(rescuer, RescueRequest::new(target, 0, 50));
        world.swarm_thrust.insert(
            rescuer,
            SwarmThrust {
                active: true,
                desired_direction: Vec3::Y,
                current_thrust: 3.0,
            },
        );

        run_at(&mut world, 110);
        assert!(world.rescue_requests.contains(rescuer));

        let report = run_at(&mut world, 111);
        assert_eq!(report.removed, 1);
        assert!(!world.rescue_requests.contains(rescuer));
        let thrust = world.swarm_thrust.get(rescuer).unwrap();
        assert!(!thrust.active);
        assert_eq!(thrust.current_thrust, 0.0);
    }

    #[test]
    fn test_recovered_target_clears_request() {
        let mut world = World::new();
        let target = stranded_target(&mut world);
        let rescuer = world.spawn();
        world.rescue_requests.insert(rescuer, RescueRequest::new(target, 0, 0));

        world.capabilities.get_mut(target).unwrap().is_mobile = true;
        let report = run_at(&mut world, 2);
        assert_eq!(report.removed, 1);
        assert!(!world.rescue_requests.contains(rescuer));
    }

    #[test]
    fn test_destroyed_target_clears_request() {
        let mut world = World::new();
        let target = stranded_target(&mut world);
        let rescuer = world.spawn();
        world.rescue_requests.insert(rescuer, RescueRequest::new(target, 0, 0));
        world.despawn(target);

        run_at(&mut world, 2);
        assert!(!world.rescue_requests.contains(rescuer));
    }

    #[test]
    fn test_paused_tick_leaves_requests() {
        let mut world = World::new();
        let rescuer = world.spawn();
        world
            .rescue_requests
            .insert(rescuer, RescueRequest::new(EntityId::new(99, 0), 0, 0));

        let mut ctx = TickContext::recording(0);
        ctx.is_paused = true;
        let report = run_rescue_resolution(&mut world, &ctx).unwrap();
        assert_eq!(report, RescueReport::default());
        assert!(world.rescue_requests.contains(rescuer));
    }
}
