//! Core tick - runs every order execution rule once, in a fixed order
//!
//! snapshot context -> refresh existence -> bootstrap -> scaffold ->
//! arbitration -> escort -> swarm -> rescue -> docking -> event emission ->
//! advance clock
//!
//! Each rule applies its own gate and plays back its own command buffer, so
//! a later rule sees every structural change an earlier one made.

use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::docking::{run_docking_proximity_gate, DockingReport};
use crate::ecs::world::World;
use crate::escort::{run_escort_tether, EscortReport};
use crate::orders::{run_decision_arbitration, ArbitrationReport};
use crate::rescue::{run_rescue_resolution, RescueReport};
use crate::scaffold::{RegistryBootstrap, ScaffoldPass};
use crate::swarm::{run_swarm_order_mapping, SwarmReport};
use crate::telemetry::{emit_order_decision_events, EmissionReport};

/// Stateful passes that persist across ticks
#[derive(Debug, Clone, Default)]
pub struct CoreSchedule {
    pub scaffold: ScaffoldPass,
    pub bootstrap: RegistryBootstrap,
}

impl CoreSchedule {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What each rule did during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    /// False when paused or not in Record mode; every rule no-oped
    pub recorded: bool,
    pub bootstrapped: bool,
    pub scaffolded: usize,
    pub arbitration: ArbitrationReport,
    pub escort: EscortReport,
    pub swarm: SwarmReport,
    pub rescue: RescueReport,
    pub docking: DockingReport,
    pub emission: EmissionReport,
}

/// Run one core tick and advance the clock
pub fn run_core_tick(world: &mut World, schedule: &mut CoreSchedule) -> Result<TickReport> {
    let ctx = world.clock.context();
    world.refresh_existence();

    let report = TickReport {
        tick: ctx.tick,
        recorded: ctx.is_recording(),
        bootstrapped: schedule.bootstrap.run(world, &ctx),
        scaffolded: schedule.scaffold.run(world, &ctx),
        arbitration: run_decision_arbitration(world, &ctx),
        escort: run_escort_tether(world, &ctx)?,
        swarm: run_swarm_order_mapping(world, &ctx)?,
        rescue: run_rescue_resolution(world, &ctx)?,
        docking: run_docking_proximity_gate(world, &ctx)?,
        emission: emit_order_decision_events(world, &ctx)?,
    };

    tracing::debug!(
        "Tick {}: {} intents, {} escorts, {} drones, {} rescues, {} docking, {} events",
        report.tick,
        report.arbitration.committed(),
        report.escort.leveled,
        report.swarm.mapped,
        report.rescue.valid,
        report.docking.requested,
        report.emission.emitted
    );

    world.clock.advance();
    Ok(report)
}
