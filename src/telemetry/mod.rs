//! Action event telemetry
//!
//! Bounded, append-only event log plus the rule that turns directive
//! decisions into obey/disobey events.

pub mod action_event;
pub mod log;
pub mod order_decision;

pub use action_event::{
    ActionEvent, ActionToken, AuthorityPair, AuthoritySeat, IntentFlags, JustificationFlags, OutcomeFlags,
};
pub use log::{try_append, ActionEventLog, ActionStreamHeader};
pub use order_decision::{emit_order_decision_events, DirectiveDecision, EmissionReport, OrderDecision};
