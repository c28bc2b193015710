//! Rescue request record and its validity predicate

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick};
use crate::ecs::existence::ExistenceOracle;
use crate::ecs::store::ComponentStore;
use crate::ecs::world::World;
use crate::vessel::CapabilitySnapshot;

/// Request to tow a stranded vessel, carried by the rescuer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RescueRequest {
    pub target: Option<EntityId>,
    pub issued_tick: Tick,
    pub last_updated_tick: Tick,
    /// 0 = never expires
    pub expire_tick: Tick,
    pub priority: u8,
}

impl RescueRequest {
    pub fn new(target: EntityId, tick: Tick, expire_tick: Tick) -> Self {
        Self {
            target: Some(target),
            issued_tick: tick,
            last_updated_tick: tick,
            expire_tick,
            priority: 1,
        }
    }
}

/// Why a request is (in)valid. The first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RescueValidity {
    Valid,
    TargetMissing,
    Expired,
    NoCapability,
    NotStranded,
}

impl RescueValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, RescueValidity::Valid)
    }
}

/// Check a request against the current tick and the target's capabilities
///
/// Order matters: existence, then expiry (with grace window), then the
/// capability snapshot, then the alive-and-immobile predicate.
pub fn validate_request(
    request: &RescueRequest,
    tick: Tick,
    grace_ticks: Tick,
    existence: &ExistenceOracle,
    capabilities: &ComponentStore<CapabilitySnapshot>,
) -> RescueValidity {
    let Some(target) = existence.validate(request.target) else {
        return RescueValidity::TargetMissing;
    };

    if request.expire_tick != 0 && tick > request.expire_tick.saturating_add(grace_ticks) {
        return RescueValidity::Expired;
    }

    let Some(capability) = capabilities.get(target) else {
        return RescueValidity::NoCapability;
    };

    if !capability.is_stranded() {
        return RescueValidity::NotStranded;
    }

    RescueValidity::Valid
}

/// Insert or refresh a rescuer's request (upstream producer API)
///
/// An existing request is rewritten when the target changes or the reissue
/// interval has passed; an expired one only has its deadline pushed out.
/// Returns true when the stored request changed.
pub fn issue_rescue_request(world: &mut World, rescuer: EntityId, target: EntityId, tick: Tick) -> bool {
    if !world.is_alive(rescuer) {
        return false;
    }
    let reissue = world.config.rescue_reissue_ticks;

    let Some(request) = world.rescue_requests.get_mut(rescuer) else {
        world
            .rescue_requests
            .insert(rescuer, RescueRequest::new(target, tick, tick + reissue));
        return true;
    };

    if request.target != Some(target) || tick >= request.last_updated_tick + reissue {
        request.target = Some(target);
        request.priority = 1;
        request.last_updated_tick = tick;
        request.expire_tick = tick + reissue;
        true
    } else if tick >= request.expire_tick {
        request.expire_tick = tick + reissue;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRACE: Tick = 60;

    fn fixture(capability: Option<CapabilitySnapshot>) -> (ExistenceOracle, ComponentStore<CapabilitySnapshot>, EntityId) {
        let target = EntityId::new(1, 0);
        let mut oracle = ExistenceOracle::new();
        oracle.refresh([target], 0);
        let mut capabilities = ComponentStore::new();
        if let Some(capability) = capability {
            capabilities.insert(target, capability);
        }
        (oracle, capabilities, target)
    }

    fn stranded() -> Option<CapabilitySnapshot> {
        Some(CapabilitySnapshot {
            is_alive: true,
            is_mobile: false,
        })
    }

    #[test]
    fn test_grace_window_boundary() {
        let (oracle, caps, target) = fixture(stranded());
        let request = RescueRequest::new(target, 0, 50);

        assert_eq!(validate_request(&request, 110, GRACE, &oracle, &caps), RescueValidity::Valid);
        assert_eq!(validate_request(&request, 111, GRACE, &oracle, &caps), RescueValidity::Expired);
    }

    #[test]
    fn test_zero_expire_never_expires() {
        let (oracle, caps, target) = fixture(stranded());
        let request = RescueRequest::new(target, 0, 0);
        assert!(validate_request(&request, 1_000_000, GRACE, &oracle, &caps).is_valid());
    }

    #[test]
    fn test_missing_target() {
        let (oracle, caps, _) = fixture(stranded());
        let request = RescueRequest::new(EntityId::new(9, 0), 0, 0);
        assert_eq!(validate_request(&request, 0, GRACE, &oracle, &caps), RescueValidity::TargetMissing);
    }

    #[test]
    fn test_capability_checks() {
        let (oracle, caps, target) = fixture(None);
        let request = RescueRequest::new(target, 0, 0);
        assert_eq!(validate_request(&request, 0, GRACE, &oracle, &caps), RescueValidity::NoCapability);

        let (oracle, caps, target) = fixture(Some(CapabilitySnapshot { is_alive: true, is_mobile: true }));
        let request = RescueRequest::new(target, 0, 0);
        assert_eq!(validate_request(&request, 0, GRACE, &oracle, &caps), RescueValidity::NotStranded);

        let (oracle, caps, target) = fixture(Some(CapabilitySnapshot { is_alive: false, is_mobile: false }));
        let request = RescueRequest::new(target, 0, 0);
        assert_eq!(validate_request(&request, 0, GRACE, &oracle, &caps), RescueValidity::NotStranded);
    }

    #[test]
    fn test_issue_and_reissue() {
        let mut world = World::new();
        let rescuer = world.spawn();
        let target = world.spawn();
        let other = world.spawn();

        assert!(issue_rescue_request(&mut world, rescuer, target, 10));
        let request = world.rescue_requests.get(rescuer).unwrap();
        assert_eq!(request.expire_tick, 70);
        assert_eq!(request.priority, 1);

        // Same target inside the reissue interval: untouched
        assert!(!issue_rescue_request(&mut world, rescuer, target, 20));

        // New target: rewritten immediately
        assert!(issue_rescue_request(&mut world, rescuer, other, 21));
        let request = world.rescue_requests.get(rescuer).unwrap();
        assert_eq!(request.target, Some(other));
        assert_eq!(request.last_updated_tick, 21);
        assert_eq!(request.issued_tick, 10);
    }
}
