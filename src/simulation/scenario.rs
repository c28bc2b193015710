//! Seeded scenario harness
//!
//! Lays out a small fleet and plays the upstream producers (decision
//! candidates, directives, control orders, rescue requests, simple
//! kinematics) around the core tick. The same seed always yields the same
//! run.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::CoreConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Position, Tick};
use crate::ecs::world::World;
use crate::escort::EscortAssignment;
use crate::orders::{DecisionCandidate, DecisionClass, OrderPayload, OrderVerb};
use crate::rescue::issue_rescue_request;
use crate::swarm::{ControlOrder, ControlOrderKind};
use crate::telemetry::{AuthoritySeat, DirectiveDecision};
use crate::vessel::{CapabilitySnapshot, ChildTether, SwarmThrust, VesselAiState, VesselState};

use super::tick::{run_core_tick, CoreSchedule, TickReport};

/// Fleet layout for a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    pub carriers: usize,
    pub escorts_per_carrier: usize,
    pub strike_craft_per_carrier: usize,
    pub drones_per_carrier: usize,
    pub stranded_vessels: usize,
    pub anchors: usize,
    /// Escorts are released this many ticks in (0 = never)
    pub escort_release_after: Tick,
    /// Half-width of the cube entities are scattered in
    pub spread: f32,
    /// Distance a returning craft closes per tick
    pub craft_speed: f32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            carriers: 2,
            escorts_per_carrier: 2,
            strike_craft_per_carrier: 4,
            drones_per_carrier: 3,
            stranded_vessels: 2,
            anchors: 5,
            escort_release_after: 120,
            spread: 200.0,
            craft_speed: 1.5,
        }
    }
}

/// Sum of every tick report in a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioTotals {
    pub recorded_ticks: u64,
    pub scaffolded: usize,
    pub candidates_drained: usize,
    pub intents_committed: usize,
    pub escorts_released: usize,
    pub drones_mapped: usize,
    pub rescues_valid: usize,
    pub rescues_removed: usize,
    pub docking_requested: usize,
    pub events_emitted: usize,
    pub events_dropped: usize,
}

impl ScenarioTotals {
    pub fn absorb(&mut self, report: &TickReport) {
        if report.recorded {
            self.recorded_ticks += 1;
        }
        self.scaffolded += report.scaffolded;
        self.candidates_drained += report.arbitration.candidates_drained;
        self.intents_committed += report.arbitration.committed();
        self.escorts_released += report.escort.released;
        self.drones_mapped += report.swarm.mapped;
        self.rescues_valid += report.rescue.valid;
        self.rescues_removed += report.rescue.removed;
        self.docking_requested += report.docking.requested;
        self.events_emitted += report.emission.emitted;
        self.events_dropped += report.emission.dropped;
    }
}

/// End-of-run snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub seed: u64,
    pub final_tick: Tick,
    pub entities: usize,
    pub totals: ScenarioTotals,
    pub order_intents: usize,
    pub docking_requests: usize,
    pub open_rescue_requests: usize,
    pub logged_events: usize,
}

pub struct Scenario {
    world: World,
    schedule: CoreSchedule,
    rng: ChaCha8Rng,
    params: ScenarioParams,
    seed: u64,
    carriers: Vec<EntityId>,
    strike_craft: Vec<(EntityId, EntityId)>,
    escorts: Vec<EntityId>,
    drones: Vec<EntityId>,
    rescues: Vec<(EntityId, EntityId)>,
    totals: ScenarioTotals,
}

impl Scenario {
    pub fn new(config: CoreConfig, params: ScenarioParams, seed: u64) -> Self {
        let mut scenario = Self {
            world: World::with_config(config),
            schedule: CoreSchedule::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            params,
            seed,
            carriers: Vec::new(),
            strike_craft: Vec::new(),
            escorts: Vec::new(),
            drones: Vec::new(),
            rescues: Vec::new(),
            totals: ScenarioTotals::default(),
        };
        scenario.lay_out();
        scenario
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn totals(&self) -> ScenarioTotals {
        self.totals
    }

    fn random_position(&mut self) -> Position {
        let s = self.params.spread;
        Position::new(
            self.rng.gen_range(-s..=s),
            self.rng.gen_range(-s..=s),
            self.rng.gen_range(-s..=s),
        )
    }

    fn offset_from(&mut self, origin: Position, min: f32, max: f32) -> Position {
        let direction = Position::new(
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
        )
        .try_normalize()
        .unwrap_or(Position::X);
        origin + direction * self.rng.gen_range(min..=max)
    }

    fn lay_out(&mut self) {
        for _ in 0..self.params.anchors {
            let position = self.random_position();
            let anchor = self.world.spawn_at(position);
            self.world.anchors.insert(anchor);
        }

        for _ in 0..self.params.carriers {
            let carrier_position = self.random_position();
            let carrier = self.world.spawn_at(carrier_position);
            self.world.vessels.insert(carrier);
            let captain = self.world.spawn();
            self.world.authority_seats.insert(
                carrier,
                AuthoritySeat {
                    seat: Some(carrier),
                    occupant: Some(captain),
                },
            );
            self.carriers.push(carrier);

            for _ in 0..self.params.escorts_per_carrier {
                let position = self.offset_from(carrier_position, 10.0, 30.0);
                let escort = self.world.spawn_at(position);
                self.world.vessels.insert(escort);
                let release_tick = match self.params.escort_release_after {
                    0 => 0,
                    after => after + self.rng.gen_range(0..after),
                };
                self.world
                    .escort_assignments
                    .insert(escort, EscortAssignment::new(carrier, release_tick));
                self.world.child_tethers.insert(escort, ChildTether::to_parent(carrier));
                self.escorts.push(escort);
            }

            for _ in 0..self.params.strike_craft_per_carrier {
                let position = self.offset_from(carrier_position, 5.0, 60.0);
                let craft = self.world.spawn_at(position);
                self.world.vessels.insert(craft);
                self.world.strike_craft.insert(craft);
                self.world.ai_states.insert(craft, VesselAiState::returning_to(carrier));
                self.strike_craft.push((craft, carrier));
            }

            for _ in 0..self.params.drones_per_carrier {
                let position = self.offset_from(carrier_position, 2.0, 8.0);
                let drone = self.world.spawn_at(position);
                self.world.drones.insert(drone);
                self.world.control_orders.insert(drone, ControlOrder::new(ControlOrderKind::Screen));
                self.drones.push(drone);
            }
        }

        for _ in 0..self.params.stranded_vessels {
            let wreck_position = self.random_position();
            let wreck = self.world.spawn_at(wreck_position);
            self.world.vessels.insert(wreck);
            self.world.capabilities.insert(
                wreck,
                CapabilitySnapshot {
                    is_alive: true,
                    is_mobile: false,
                },
            );

            let tug_position = self.offset_from(wreck_position, 3.0, 10.0);
            let tug = self.world.spawn_at(tug_position);
            self.world.swarm_thrust.insert(tug, SwarmThrust::default());
            self.rescues.push((tug, wreck));
        }

        tracing::info!(
            "Scenario laid out: {} entities, seed {}",
            self.world.entity_count(),
            self.seed
        );
    }

    /// Upstream producers for the tick about to run
    fn produce_inputs(&mut self) -> Result<()> {
        let tick = self.world.clock.tick();

        let vessels: Vec<EntityId> = self.world.vessels.entities_sorted();
        for vessel in vessels {
            if !self.rng.gen_bool(0.3) {
                continue;
            }
            for _ in 0..self.rng.gen_range(1..=3) {
                let candidate = self.random_candidate(tick);
                self.world.enqueue_decision(vessel, candidate)?;
            }
        }

        for i in 0..self.strike_craft.len() {
            let (craft, carrier) = self.strike_craft[i];
            if !self.rng.gen_bool(0.1) {
                continue;
            }
            let decision = if self.rng.gen_bool(0.8) {
                DirectiveDecision::Obey
            } else {
                DirectiveDecision::Disobey
            };
            if let Some(record) = self.world.order_decisions.get_mut(craft) {
                record.record(decision, tick, Some(carrier));
            }
        }

        for i in 0..self.drones.len() {
            let drone = self.drones[i];
            if !self.rng.gen_bool(0.05) {
                continue;
            }
            let order = match self.rng.gen_range(0..4) {
                0 => ControlOrder::new(ControlOrderKind::Tow),
                1 => ControlOrder::new(ControlOrderKind::Return),
                2 => {
                    let carrier = self.carriers[self.rng.gen_range(0..self.carriers.len())];
                    ControlOrder::attack(carrier)
                }
                _ => ControlOrder::new(ControlOrderKind::Hold),
            };
            self.world.control_orders.insert(drone, order);
        }

        for i in 0..self.rescues.len() {
            let (tug, wreck) = self.rescues[i];
            if self.world.is_alive(wreck) {
                issue_rescue_request(&mut self.world, tug, wreck, tick);
            }
            if self.rng.gen_bool(0.005) {
                if let Some(capability) = self.world.capabilities.get_mut(wreck) {
                    capability.is_mobile = true;
                }
            }
        }

        Ok(())
    }

    fn random_candidate(&mut self, tick: Tick) -> DecisionCandidate {
        const VERBS: [OrderVerb; 6] = [
            OrderVerb::Attack,
            OrderVerb::FocusFire,
            OrderVerb::Escort,
            OrderVerb::Hold,
            OrderVerb::Retreat,
            OrderVerb::Rendezvous,
        ];
        let class = match self.rng.gen_range(0..10) {
            0 => DecisionClass::Rejected,
            1 => DecisionClass::Deferred,
            2 => DecisionClass::Ignored,
            _ => DecisionClass::Accepted,
        };
        let verb = VERBS[self.rng.gen_range(0..VERBS.len())];
        let mut payload = OrderPayload::new(verb);
        if !self.carriers.is_empty() {
            // Orders come down from a carrier and point at another one
            let sender = self.carriers[self.rng.gen_range(0..self.carriers.len())];
            let target = self.carriers[self.rng.gen_range(0..self.carriers.len())];
            let position = self.world.positions.get(target).copied().unwrap_or(Position::ZERO);
            payload = payload.with_sender(sender).with_target(target).with_position(position);
        }
        payload.window.start_tick = tick;
        payload.source_message_id = self.rng.gen();

        DecisionCandidate::accepted(self.rng.gen_range(0..4), self.rng.gen_range(0.0..1.0), payload)
            .with_class(class)
    }

    /// Move returning craft toward their carrier
    fn integrate(&mut self) {
        let speed = self.params.craft_speed;
        for &(craft, _) in &self.strike_craft {
            if self.world.docking_requests.contains(craft) {
                continue;
            }
            let Some(ai) = self.world.ai_states.get(craft) else {
                continue;
            };
            if ai.state != VesselState::Returning {
                continue;
            }
            let Some(target) = ai.target_entity.and_then(|t| self.world.positions.get(t).copied()) else {
                continue;
            };
            if let Some(position) = self.world.positions.get_mut(craft) {
                let to_target = target - *position;
                let step = to_target.length().min(speed);
                *position += to_target.normalize_or_zero() * step;
            }
        }
    }

    /// Produce inputs, run the core tick, then move craft
    pub fn step(&mut self) -> Result<TickReport> {
        if self.world.clock.context().is_recording() {
            self.produce_inputs()?;
        }
        let report = run_core_tick(&mut self.world, &mut self.schedule)?;
        if report.recorded {
            self.integrate();
        }
        self.totals.absorb(&report);
        Ok(report)
    }

    pub fn run(&mut self, ticks: u64) -> Result<ScenarioSummary> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            seed: self.seed,
            final_tick: self.world.clock.tick(),
            entities: self.world.entity_count(),
            totals: self.totals,
            order_intents: self.world.order_intents.len(),
            docking_requests: self.world.docking_requests.len(),
            open_rescue_requests: self.world.rescue_requests.len(),
            logged_events: self.world.action_log.as_ref().map_or(0, |log| log.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Scenario::new(CoreConfig::default(), ScenarioParams::default(), 42);
        let mut b = Scenario::new(CoreConfig::default(), ScenarioParams::default(), 42);

        let sa = a.run(200).unwrap();
        let sb = b.run(200).unwrap();
        assert_eq!(sa.totals, sb.totals);
        assert_eq!(sa.logged_events, sb.logged_events);
        assert_eq!(sa.final_tick, 200);
    }

    #[test]
    fn test_craft_eventually_request_docking() {
        let params = ScenarioParams {
            strike_craft_per_carrier: 3,
            craft_speed: 5.0,
            ..ScenarioParams::default()
        };
        let mut scenario = Scenario::new(CoreConfig::default(), params, 7);
        let summary = scenario.run(60).unwrap();
        assert_eq!(summary.docking_requests, 6);
    }

    #[test]
    fn test_escorts_released() {
        let params = ScenarioParams {
            escort_release_after: 10,
            ..ScenarioParams::default()
        };
        let mut scenario = Scenario::new(CoreConfig::default(), params, 3);
        let summary = scenario.run(25).unwrap();
        assert_eq!(summary.totals.escorts_released, 4);
    }

    #[test]
    fn test_supplied_config_reaches_world() {
        let config = CoreConfig {
            max_action_events: 3,
            ..CoreConfig::default()
        };
        let scenario = Scenario::new(config, ScenarioParams::default(), 11);
        assert_eq!(scenario.world.config.max_action_events, 3);
    }

    #[test]
    fn test_committed_intents_carry_carrier_sender() {
        let mut scenario = Scenario::new(CoreConfig::default(), ScenarioParams::default(), 5);
        scenario.run(50).unwrap();

        let intents: Vec<EntityId> = scenario.world.order_intents.entities_sorted();
        assert!(!intents.is_empty());
        for vessel in intents {
            let payload = &scenario.world.order_intents.get(vessel).unwrap().payload;
            let sender = payload.sender.unwrap();
            let target = payload.target.unwrap();
            assert!(scenario.carriers.contains(&sender));
            assert!(scenario.carriers.contains(&target));
            assert_eq!(payload.target_position, *scenario.world.positions.get(target).unwrap());
        }
    }
}
