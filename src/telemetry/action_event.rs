//! Action events: what an actor did, on whose authority, and why

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionToken {
    #[default]
    None,
    OrderObeyed,
    OrderDisobeyed,
}

/// What the actor meant to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntentFlags(pub u8);

impl IntentFlags {
    pub const NONE: Self = Self(0);
    pub const SELF_INTEREST: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Why the actor claims it was entitled to act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct JustificationFlags(pub u8);

impl JustificationFlags {
    pub const ORDERED: Self = Self(1 << 0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// What came of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutcomeFlags(pub u8);

impl OutcomeFlags {
    pub const COMPLIED: Self = Self(1 << 0);
    pub const REFUSED: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Seat and current occupant of an authority position on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthoritySeat {
    pub seat: Option<EntityId>,
    pub occupant: Option<EntityId>,
}

/// Issuing and acting authority for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorityPair {
    pub issuing_seat: Option<EntityId>,
    pub issuing_occupant: Option<EntityId>,
    pub acting_seat: Option<EntityId>,
    pub acting_occupant: Option<EntityId>,
}

impl AuthorityPair {
    pub fn new(issuing: Option<AuthoritySeat>, acting: Option<AuthoritySeat>) -> Self {
        let issuing = issuing.unwrap_or_default();
        let acting = acting.unwrap_or_default();
        Self {
            issuing_seat: issuing.seat,
            issuing_occupant: issuing.occupant,
            acting_seat: acting.seat,
            acting_occupant: acting.occupant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionEvent {
    pub token: ActionToken,
    pub intent_flags: IntentFlags,
    pub justification_flags: JustificationFlags,
    pub outcome_flags: OutcomeFlags,
    pub magnitude: u16,
    pub actor: Option<EntityId>,
    pub target: Option<EntityId>,
    pub issued_by: AuthorityPair,
    pub tick: Tick,
}
