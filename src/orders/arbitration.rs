//! Decision arbitration - pick one winning decision per entity per tick
//!
//! Ranking: higher priority wins; equal priority falls back to higher
//! confidence; anything still tied keeps the candidate seen first.
//! Buffers are drained every recording tick whether or not a winner exists.

use crate::core::clock::TickContext;
use crate::ecs::commands::{Command, CommandBuffer};
use crate::ecs::world::World;
use crate::orders::decision::DecisionCandidate;
use crate::orders::intent::OrderIntent;

/// Counts from one arbitration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArbitrationReport {
    pub buffers_drained: usize,
    pub candidates_drained: usize,
    pub committed_in_place: usize,
    pub committed_deferred: usize,
}

impl ArbitrationReport {
    pub fn committed(&self) -> usize {
        self.committed_in_place + self.committed_deferred
    }
}

/// Select the winning Accepted candidate in a single pass
pub fn arbitrate(buffer: &[DecisionCandidate]) -> Option<&DecisionCandidate> {
    let mut best: Option<&DecisionCandidate> = None;

    for candidate in buffer.iter().filter(|c| c.is_accepted()) {
        let replace = match best {
            None => true,
            Some(current) => outranks(candidate, current),
        };
        if replace {
            best = Some(candidate);
        }
    }

    best
}

/// Strictly better; equal candidates never displace the incumbent
fn outranks(challenger: &DecisionCandidate, incumbent: &DecisionCandidate) -> bool {
    if challenger.priority != incumbent.priority {
        return challenger.priority > incumbent.priority;
    }
    challenger.confidence > incumbent.confidence
}

/// Drain every decision buffer and commit winners as order intents
pub fn run_decision_arbitration(world: &mut World, ctx: &TickContext) -> ArbitrationReport {
    let mut report = ArbitrationReport::default();
    if !ctx.is_recording() {
        return report;
    }

    let mut commands = CommandBuffer::new();

    for entity in world.decision_buffers.entities_sorted() {
        let Some(buffer) = world.decision_buffers.get_mut(entity) else {
            continue;
        };

        let winner = arbitrate(buffer).cloned();
        report.candidates_drained += buffer.len();
        report.buffers_drained += 1;
        buffer.clear();

        let Some(winner) = winner else {
            continue;
        };

        tracing::trace!(
            "Entity {} committed {:?} (priority {}, confidence {:.2})",
            entity,
            winner.payload.verb,
            winner.priority,
            winner.confidence
        );

        match world.order_intents.get_mut(entity) {
            Some(intent) => {
                intent.overwrite_from(&winner, ctx.tick);
                report.committed_in_place += 1;
            }
            None => {
                commands.push(Command::InsertOrderIntent(
                    entity,
                    OrderIntent::from_candidate(&winner, ctx.tick),
                ));
                report.committed_deferred += 1;
            }
        }
    }

    commands.playback(world);
    report
}
