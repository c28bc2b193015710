//! Committed order intent - the arbitrator's only output

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::orders::decision::{DecisionCandidate, OrderPayload};

/// The entity's current order. At most one per entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub payload: OrderPayload,
    pub received_tick: Tick,
    pub priority: u8,
    pub confidence: f32,
    pub inferred: bool,
}

impl OrderIntent {
    pub fn from_candidate(candidate: &DecisionCandidate, tick: Tick) -> Self {
        Self {
            payload: candidate.payload.clone(),
            received_tick: tick,
            priority: candidate.priority,
            confidence: candidate.confidence,
            inferred: candidate.inferred,
        }
    }

    /// Overwrite every field from a newer winner
    pub fn overwrite_from(&mut self, candidate: &DecisionCandidate, tick: Tick) {
        *self = Self::from_candidate(candidate, tick);
    }
}
