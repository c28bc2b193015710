//! Property tests for arbitration, anchor selection and the bounded log

use fleet_order_core::core::types::{EntityId, Position};
use fleet_order_core::orders::{arbitrate, DecisionCandidate, DecisionClass, OrderPayload, OrderVerb};
use fleet_order_core::rescue::nearest_anchor;
use fleet_order_core::telemetry::{try_append, ActionEvent, ActionStreamHeader};
use proptest::prelude::*;

fn class_strategy() -> impl Strategy<Value = DecisionClass> {
    prop_oneof![
        Just(DecisionClass::Accepted),
        Just(DecisionClass::Rejected),
        Just(DecisionClass::Deferred),
        Just(DecisionClass::Ignored),
    ]
}

fn candidate_strategy() -> impl Strategy<Value = DecisionCandidate> {
    (class_strategy(), 0u8..4, 0u8..4, any::<u32>()).prop_map(|(class, priority, confidence_step, message)| {
        let mut payload = OrderPayload::new(OrderVerb::Attack);
        payload.source_message_id = message;
        // Coarse confidence steps so exact ties are common
        DecisionCandidate::accepted(priority, confidence_step as f32 * 0.25, payload).with_class(class)
    })
}

proptest! {
    #[test]
    fn arbitration_winner_is_first_best_accepted(buffer in prop::collection::vec(candidate_strategy(), 0..24)) {
        let winner = arbitrate(&buffer);
        let accepted: Vec<(usize, &DecisionCandidate)> = buffer
            .iter()
            .enumerate()
            .filter(|(_, c)| c.classification == DecisionClass::Accepted)
            .collect();

        match winner {
            None => prop_assert!(accepted.is_empty()),
            Some(w) => {
                prop_assert_eq!(w.classification, DecisionClass::Accepted);
                for (_, c) in &accepted {
                    prop_assert!(
                        c.priority < w.priority
                            || (c.priority == w.priority && c.confidence <= w.confidence)
                    );
                }
                let first_best = accepted
                    .iter()
                    .find(|(_, c)| c.priority == w.priority && c.confidence == w.confidence)
                    .map(|(i, _)| *i);
                let winner_index = buffer.iter().position(|c| std::ptr::eq(c, w));
                prop_assert_eq!(first_best, winner_index);
            }
        }
    }

    #[test]
    fn anchor_choice_ignores_scan_order(
        steps in prop::collection::vec(0u32..400, 1..12),
        rotate in 0usize..12,
    ) {
        // 0.004 steps put neighbours inside the 0.01 epsilon, so near-ties chain
        let anchors: Vec<(EntityId, Position)> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| (EntityId::new(i as u32, 0), Position::new(10.0 + *step as f32 * 0.004, 0.0, 0.0)))
            .collect();

        let mut rotated = anchors.clone();
        rotated.rotate_left(rotate % anchors.len());
        let mut reversed = anchors.clone();
        reversed.reverse();

        let forward = nearest_anchor(Position::ZERO, anchors.iter().copied(), 0.01).map(|(e, _)| e);
        prop_assert_eq!(forward, nearest_anchor(Position::ZERO, rotated, 0.01).map(|(e, _)| e));
        prop_assert_eq!(forward, nearest_anchor(Position::ZERO, reversed, 0.01).map(|(e, _)| e));

        // Winner is the lowest index within epsilon of the closest anchor
        let distances: Vec<f32> = anchors.iter().map(|(_, p)| Position::ZERO.distance(*p)).collect();
        let closest = distances.iter().copied().fold(f32::INFINITY, f32::min);
        let expected = anchors
            .iter()
            .zip(&distances)
            .filter(|(_, d)| **d - closest < 0.01)
            .map(|((e, _), _)| *e)
            .min_by_key(|e| e.index());
        prop_assert_eq!(forward, expected);
    }

    #[test]
    fn log_never_exceeds_capacity(max_events in 0usize..32, attempts in 0usize..64) {
        let mut header = ActionStreamHeader::default();
        let mut buffer = Vec::new();
        let mut accepted = 0usize;

        for tick in 0..attempts {
            let event = ActionEvent { tick: tick as u64, ..ActionEvent::default() };
            if try_append(&mut header, &mut buffer, event, max_events) {
                accepted += 1;
            }
        }

        prop_assert!(buffer.len() <= max_events);
        prop_assert_eq!(accepted, attempts.min(max_events));
        prop_assert_eq!(header.dropped_count as usize, attempts - accepted);
        prop_assert_eq!(header.event_count as usize, accepted);
    }
}
