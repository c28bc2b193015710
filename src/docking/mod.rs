//! Docking requests raised by proximity
//!
//! The gate only raises requests. Slot assignment, the docking sequence and
//! undocking belong to the docking subsystem that consumes them.

pub mod components;
pub mod proximity;

pub use components::{DockingPhase, DockingPolicy, DockingRequest, DockingSlot, DockingState};
pub use proximity::{run_docking_proximity_gate, DockingReport};
