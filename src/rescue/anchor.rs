//! Nearest-anchor resolution for tow direction

use glam::Vec3;

use crate::core::types::{EntityId, Position};

/// Direction used when no usable anchor or vector exists
pub const FALLBACK_DIRECTION: Vec3 = Vec3::X;

/// Exhaustive nearest-anchor scan
///
/// Every anchor within `tie_epsilon` of the global minimum distance counts
/// as tied, and the tie goes to the lowest raw index. The winner depends
/// only on the set of anchors, never on scan order.
pub fn nearest_anchor(
    origin: Position,
    anchors: impl IntoIterator<Item = (EntityId, Position)>,
    tie_epsilon: f32,
) -> Option<(EntityId, Position)> {
    let scored: Vec<(EntityId, Position, f32)> = anchors
        .into_iter()
        .map(|(anchor, position)| (anchor, position, origin.distance(position)))
        .collect();

    let min_distance = scored
        .iter()
        .map(|(_, _, distance)| *distance)
        .fold(f32::INFINITY, f32::min);

    scored
        .into_iter()
        .filter(|(_, _, distance)| *distance - min_distance < tie_epsilon)
        .min_by_key(|(anchor, _, _)| anchor.index())
        .map(|(anchor, position, _)| (anchor, position))
}

/// Unit vector from the rescuer toward the anchor, or +X when degenerate
pub fn rescue_direction(rescuer: Option<Position>, anchor: Option<Position>) -> Vec3 {
    match (rescuer, anchor) {
        (Some(from), Some(to)) => (to - from).try_normalize().unwrap_or(FALLBACK_DIRECTION),
        _ => FALLBACK_DIRECTION,
    }
}
