//! Obey/disobey event emission for directed craft

use serde::{Deserialize, Serialize};

use crate::core::clock::TickContext;
use crate::core::constants::{DISOBEY_EVENT_MAGNITUDE, OBEY_EVENT_MAGNITUDE};
use crate::core::error::Result;
use crate::core::types::{EntityId, Tick};
use crate::ecs::world::World;

use super::action_event::{
    ActionEvent, ActionToken, AuthorityPair, IntentFlags, JustificationFlags, OutcomeFlags,
};

/// Latest response of a craft to a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectiveDecision {
    #[default]
    None,
    Obey,
    Disobey,
}

/// Per-craft directive bookkeeping plus the emission watermark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderDecision {
    pub last_decision: DirectiveDecision,
    pub last_directive_tick: Tick,
    /// Watermark: the directive tick last turned into an event
    pub last_emitted_tick: Tick,
    pub directive_source: Option<EntityId>,
}

impl OrderDecision {
    /// Record a fresh decision from the directive pipeline
    pub fn record(&mut self, decision: DirectiveDecision, tick: Tick, source: Option<EntityId>) {
        self.last_decision = decision;
        self.last_directive_tick = tick;
        self.directive_source = source;
    }

    pub fn has_pending_event(&self) -> bool {
        self.last_decision != DirectiveDecision::None && self.last_directive_tick > self.last_emitted_tick
    }
}

/// Counts from one emission pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmissionReport {
    pub emitted: usize,
    pub dropped: usize,
}

fn decision_event(
    decision: &OrderDecision,
    actor: EntityId,
    target: Option<EntityId>,
    issued_by: AuthorityPair,
    tick: Tick,
) -> Option<ActionEvent> {
    let (token, intent, outcome, magnitude) = match decision.last_decision {
        DirectiveDecision::None => return None,
        DirectiveDecision::Obey => (
            ActionToken::OrderObeyed,
            IntentFlags::NONE,
            OutcomeFlags::COMPLIED,
            OBEY_EVENT_MAGNITUDE,
        ),
        // Refusing an order puts the actor's own judgement ahead of the chain
        DirectiveDecision::Disobey => (
            ActionToken::OrderDisobeyed,
            IntentFlags::SELF_INTEREST,
            OutcomeFlags::REFUSED,
            DISOBEY_EVENT_MAGNITUDE,
        ),
    };
    Some(ActionEvent {
        token,
        intent_flags: intent,
        justification_flags: JustificationFlags::ORDERED,
        outcome_flags: outcome,
        magnitude,
        actor: Some(actor),
        target,
        issued_by,
        tick,
    })
}

/// Turn new obey/disobey decisions into action events
///
/// The watermark advances even when the log refuses the append, so a full
/// log never causes the same decision to be retried.
pub fn emit_order_decision_events(world: &mut World, ctx: &TickContext) -> Result<EmissionReport> {
    let mut report = EmissionReport::default();
    if !ctx.is_recording() {
        return Ok(report);
    }
    let Some(log) = world.action_log.as_mut() else {
        return Ok(report);
    };
    world.existence.ensure_fresh(ctx.tick)?;

    for entity in world.order_decisions.entities_sorted() {
        let Some(decision) = world.order_decisions.get_mut(entity) else {
            continue;
        };
        if !decision.has_pending_event() {
            continue;
        }

        let source = world.existence.validate(decision.directive_source);
        let issued_by = AuthorityPair::new(
            source.and_then(|s| world.authority_seats.get(s).copied()),
            world.authority_seats.get(entity).copied(),
        );

        if let Some(event) = decision_event(decision, entity, source, issued_by, ctx.tick) {
            if log.try_push(event) {
                report.emitted += 1;
            } else {
                report.dropped += 1;
            }
        }
        decision.last_emitted_tick = decision.last_directive_tick;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{ActionEventLog, AuthoritySeat};

    fn run_at(world: &mut World, tick: Tick) -> EmissionReport {
        let live: Vec<EntityId> = world.alive_entities().collect();
        world.existence.refresh(live, tick);
        emit_order_decision_events(world, &TickContext::recording(tick)).unwrap()
    }

    fn decided(world: &mut World, decision: DirectiveDecision, tick: Tick) -> EntityId {
        let craft = world.spawn();
        let mut record = OrderDecision::default();
        record.record(decision, tick, None);
        world.order_decisions.insert(craft, record);
        craft
    }

    #[test]
    fn test_obey_emits_once() {
        let mut world = World::new();
        world.action_log = Some(ActionEventLog::new(16));
        let craft = decided(&mut world, DirectiveDecision::Obey, 5);

        assert_eq!(run_at(&mut world, 6).emitted, 1);
        assert_eq!(run_at(&mut world, 7).emitted, 0);

        let log = world.action_log.as_ref().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].token, ActionToken::OrderObeyed);
        assert_eq!(log.events()[0].actor, Some(craft));
        assert_eq!(log.events()[0].intent_flags, IntentFlags::NONE);
        assert!(log.events()[0].outcome_flags.contains(OutcomeFlags::COMPLIED));
        assert_eq!(world.order_decisions.get(craft).unwrap().last_emitted_tick, 5);
    }

    #[test]
    fn test_disobey_marks_self_interest_and_refusal() {
        let mut world = World::new();
        world.action_log = Some(ActionEventLog::new(4));
        decided(&mut world, DirectiveDecision::Disobey, 2);

        run_at(&mut world, 3);
        let event = world.action_log.as_ref().unwrap().events()[0];
        assert_eq!(event.token, ActionToken::OrderDisobeyed);
        assert!(event.intent_flags.contains(IntentFlags::SELF_INTEREST));
        assert!(event.outcome_flags.contains(OutcomeFlags::REFUSED));
        assert!(!event.outcome_flags.contains(OutcomeFlags::COMPLIED));
        assert_eq!(event.magnitude, DISOBEY_EVENT_MAGNITUDE);
    }

    #[test]
    fn test_full_log_still_advances_watermark() {
        let mut world = World::new();
        let mut log = ActionEventLog::new(100);
        for _ in 0..100 {
            assert!(log.try_push(ActionEvent::default()));
        }
        world.action_log = Some(log);
        let craft = decided(&mut world, DirectiveDecision::Disobey, 9);

        let report = run_at(&mut world, 10);
        assert_eq!(report.dropped, 1);
        assert_eq!(world.order_decisions.get(craft).unwrap().last_emitted_tick, 9);

        let log = world.action_log.as_ref().unwrap();
        assert_eq!(log.len(), 100);
        assert_eq!(log.header.dropped_count, 1);

        // Not retried
        assert_eq!(run_at(&mut world, 11), EmissionReport::default());
    }

    #[test]
    fn test_no_decision_no_event() {
        let mut world = World::new();
        world.action_log = Some(ActionEventLog::new(4));
        let craft = world.spawn();
        world.order_decisions.insert(
            craft,
            OrderDecision {
                last_directive_tick: 3,
                ..OrderDecision::default()
            },
        );

        assert_eq!(run_at(&mut world, 4).emitted, 0);
        assert_eq!(world.order_decisions.get(craft).unwrap().last_emitted_tick, 0);
    }

    #[test]
    fn test_missing_log_leaves_watermark() {
        let mut world = World::new();
        let craft = decided(&mut world, DirectiveDecision::Obey, 5);

        assert_eq!(run_at(&mut world, 6), EmissionReport::default());
        assert_eq!(world.order_decisions.get(craft).unwrap().last_emitted_tick, 0);
    }

    #[test]
    fn test_authority_resolved_from_seats() {
        let mut world = World::new();
        world.action_log = Some(ActionEventLog::new(4));
        let carrier = world.spawn();
        let captain = world.spawn();
        let pilot = world.spawn();
        world.authority_seats.insert(
            carrier,
            AuthoritySeat {
                seat: Some(carrier),
                occupant: Some(captain),
            },
        );

        let craft = decided(&mut world, DirectiveDecision::Obey, 2);
        world.order_decisions.get_mut(craft).unwrap().directive_source = Some(carrier);
        world.authority_seats.insert(
            craft,
            AuthoritySeat {
                seat: Some(craft),
                occupant: Some(pilot),
            },
        );

        run_at(&mut world, 3);
        let event = world.action_log.as_ref().unwrap().events()[0];
        assert_eq!(event.target, Some(carrier));
        assert_eq!(event.issued_by.issuing_occupant, Some(captain));
        assert_eq!(event.issued_by.acting_occupant, Some(pilot));
        assert!(event.justification_flags.contains(JustificationFlags::ORDERED));
    }
}
