//! Fleet Order Core - tick-gated order execution for a fleet simulation
//!
//! Decision arbitration, escort tethering, swarm order mapping, rescue/tow
//! resolution, docking proximity requests, bounded action telemetry and
//! companion-record scaffolding, all gated on the simulation clock.

pub mod core;
pub mod docking;
pub mod ecs;
pub mod escort;
pub mod orders;
pub mod rescue;
pub mod scaffold;
pub mod simulation;
pub mod swarm;
pub mod telemetry;
pub mod vessel;
