pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use clock::{ReplayMode, SimClock, TickClock, TickContext};
pub use config::CoreConfig;
pub use error::{FleetError, Result};
pub use types::{EntityId, Position, Tick};
