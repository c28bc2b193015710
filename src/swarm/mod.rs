//! Swarm order mapping
//!
//! Translates a drone's abstract control order into a swarm behavior mode
//! and a validated target. The behavior is rewritten in full every tick.

use serde::{Deserialize, Serialize};

use crate::core::clock::TickContext;
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::existence::ExistenceOracle;
use crate::ecs::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlOrderKind {
    #[default]
    Idle,
    Tow,
    Attack,
    Return,
    Screen,
    Hold,
    Patrol,
    Intercept,
}

/// Abstract order issued to a drone by its controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlOrder {
    pub kind: ControlOrderKind,
    pub target: Option<EntityId>,
}

impl ControlOrder {
    pub fn new(kind: ControlOrderKind) -> Self {
        Self { kind, target: None }
    }

    pub fn attack(target: EntityId) -> Self {
        Self {
            kind: ControlOrderKind::Attack,
            target: Some(target),
        }
    }
}

/// Command link between a drone and its controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlLink {
    pub is_lost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwarmMode {
    #[default]
    Screen,
    Tug,
    Attack,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwarmBehavior {
    pub mode: SwarmMode,
    pub target: Option<EntityId>,
}

/// Map one control order to its swarm behavior
pub fn map_control_order(order: &ControlOrder, existence: &ExistenceOracle) -> SwarmBehavior {
    match order.kind {
        ControlOrderKind::Tow => SwarmBehavior {
            mode: SwarmMode::Tug,
            target: None,
        },
        ControlOrderKind::Attack => SwarmBehavior {
            mode: SwarmMode::Attack,
            target: existence.validate(order.target),
        },
        ControlOrderKind::Return => SwarmBehavior {
            mode: SwarmMode::Return,
            target: None,
        },
        _ => SwarmBehavior {
            mode: SwarmMode::Screen,
            target: None,
        },
    }
}

/// Counts from one mapping pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwarmReport {
    pub mapped: usize,
    pub staged: usize,
    pub link_lost: usize,
}

pub fn run_swarm_order_mapping(world: &mut World, ctx: &TickContext) -> Result<SwarmReport> {
    let mut report = SwarmReport::default();
    if !ctx.is_recording() {
        return Ok(report);
    }
    world.existence.ensure_fresh(ctx.tick)?;

    let mut commands = CommandBuffer::new();

    for entity in world.control_orders.entities_sorted() {
        if world.control_links.get(entity).is_some_and(|link| link.is_lost) {
            report.link_lost += 1;
            continue;
        }
        let Some(order) = world.control_orders.get(entity) else {
            continue;
        };

        let behavior = map_control_order(order, &world.existence);
        match world.swarm_behaviors.get_mut(entity) {
            Some(existing) => *existing = behavior,
            None => {
                commands.push(Command::InsertSwarmBehavior(entity, behavior));
                report.staged += 1;
            }
        }
        report.mapped += 1;
    }

    commands.playback(world);
    Ok(report)
}
