use thiserror::Error;

use crate::core::types::{EntityId, Tick};

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Existence cache is stale: refreshed at {refreshed:?}, current tick {current}")]
    StaleExistenceCache {
        refreshed: Option<Tick>,
        current: Tick,
    },

    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FleetError>;
