//! Core timing and spatial constants - all tunable defaults in one place
//!
//! These seed `CoreConfig::default()`; a loaded config may override them.

use crate::core::types::Tick;

// Rescue
/// Ticks a rescue request stays valid past its expire tick
pub const RESCUE_GRACE_TICKS: Tick = 60;
/// Ticks before an unchanged rescue request is refreshed by its issuer
pub const RESCUE_REISSUE_TICKS: Tick = 60;
/// Distances closer than this are treated as equal when picking an anchor
pub const ANCHOR_TIE_EPSILON: f32 = 0.01;

// Scaffolding
/// Ticks between companion-record ensure passes
pub const SCAFFOLD_CADENCE_TICKS: Tick = 60;

// Docking
/// Docking range used when the target carries no policy range (world units)
pub const DEFAULT_DOCKING_RANGE: f32 = 4.5;

// Telemetry
/// Capacity of the action event log
pub const DEFAULT_MAX_ACTION_EVENTS: usize = 256;
/// Magnitude recorded for an obeyed directive
pub const OBEY_EVENT_MAGNITUDE: u16 = 50;
/// Magnitude recorded for a disobeyed directive
pub const DISOBEY_EVENT_MAGNITUDE: u16 = 100;
