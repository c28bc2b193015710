//! Decision buffers, arbitration, and committed order intents
//!
//! Upstream producers append candidates -> arbitration picks one per entity ->
//! the winner is committed as the entity's `OrderIntent`.

pub mod arbitration;
pub mod decision;
pub mod intent;

pub use arbitration::{arbitrate, run_decision_arbitration, ArbitrationReport};
pub use decision::{DecisionCandidate, DecisionClass, OrderPayload, OrderVerb, TimingWindow};
pub use intent::OrderIntent;
