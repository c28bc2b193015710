//! Tick orchestration and the seeded scenario harness

pub mod scenario;
pub mod tick;

pub use scenario::{Scenario, ScenarioParams, ScenarioSummary, ScenarioTotals};
pub use tick::{run_core_tick, CoreSchedule, TickReport};
