//! Decision candidates queued by upstream decision producers

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Position, Tick};

/// How the producer classified a candidate. Only Accepted ones compete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecisionClass {
    #[default]
    Accepted,
    Rejected,
    Deferred,
    Ignored,
}

/// Verb carried by a comm order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderVerb {
    #[default]
    None,
    Attack,
    FocusFire,
    Suppress,
    DrawFire,
    Spearhead,
    Flank,
    Escort,
    Hold,
    Retreat,
    Rendezvous,
}

/// Ticks during which an order applies. `end_tick == 0` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimingWindow {
    pub start_tick: Tick,
    pub end_tick: Tick,
}

/// Order content carried from candidate to committed intent unchanged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderPayload {
    pub verb: OrderVerb,
    pub sender: Option<EntityId>,
    pub target: Option<EntityId>,
    pub target_position: Position,
    pub side: u8,
    pub window: TimingWindow,
    pub context_hash: u32,
    pub source_message_id: u32,
}

impl OrderPayload {
    pub fn new(verb: OrderVerb) -> Self {
        Self {
            verb,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_sender(mut self, sender: EntityId) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.target_position = position;
        self
    }
}

/// One pending decision in an entity's per-tick buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionCandidate {
    pub classification: DecisionClass,
    /// Higher wins
    pub priority: u8,
    /// Tie-break between equal priorities only
    pub confidence: f32,
    pub payload: OrderPayload,
    pub inferred: bool,
}

impl DecisionCandidate {
    pub fn accepted(priority: u8, confidence: f32, payload: OrderPayload) -> Self {
        Self {
            classification: DecisionClass::Accepted,
            priority,
            confidence,
            payload,
            inferred: false,
        }
    }

    pub fn with_class(mut self, classification: DecisionClass) -> Self {
        self.classification = classification;
        self
    }

    pub fn inferred(mut self) -> Self {
        self.inferred = true;
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.classification == DecisionClass::Accepted
    }
}
