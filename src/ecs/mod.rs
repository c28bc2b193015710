//! Minimal entity/record store the order rules run against

pub mod commands;
pub mod existence;
pub mod store;
pub mod world;

pub use commands::{Command, CommandBuffer, PlaybackStats};
pub use existence::ExistenceOracle;
pub use store::{ComponentStore, TagStore};
pub use world::World;
