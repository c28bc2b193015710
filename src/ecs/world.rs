//! ECS World - manages all entities and their records

use crate::core::clock::SimClock;
use crate::core::config::CoreConfig;
use crate::core::error::{FleetError, Result};
use crate::core::types::{EntityId, Position};
use crate::docking::{DockingPolicy, DockingRequest, DockingState};
use crate::ecs::existence::ExistenceOracle;
use crate::ecs::store::{ComponentStore, TagStore};
use crate::escort::EscortAssignment;
use crate::orders::{DecisionCandidate, OrderIntent};
use crate::rescue::RescueRequest;
use crate::scaffold::FleetRegistry;
use crate::swarm::{ControlLink, ControlOrder, SwarmBehavior};
use crate::telemetry::{ActionEventLog, AuthoritySeat, OrderDecision};
use crate::vessel::{CapabilitySnapshot, ChildTether, SwarmThrust, VesselAiState};

/// The simulation world containing all entities
pub struct World {
    pub clock: SimClock,
    pub config: CoreConfig,
    pub existence: ExistenceOracle,

    generations: Vec<u32>,
    alive: Vec<bool>,
    free_indices: Vec<u32>,

    // Spatial
    pub positions: ComponentStore<Position>,

    // Orders
    pub decision_buffers: ComponentStore<Vec<DecisionCandidate>>,
    pub order_intents: ComponentStore<OrderIntent>,

    // Vessel AI
    pub ai_states: ComponentStore<VesselAiState>,
    pub escort_assignments: ComponentStore<EscortAssignment>,
    pub child_tethers: ComponentStore<ChildTether>,
    pub capabilities: ComponentStore<CapabilitySnapshot>,

    // Swarm and rescue
    pub control_orders: ComponentStore<ControlOrder>,
    pub control_links: ComponentStore<ControlLink>,
    pub swarm_behaviors: ComponentStore<SwarmBehavior>,
    pub swarm_thrust: ComponentStore<SwarmThrust>,
    pub rescue_requests: ComponentStore<RescueRequest>,

    // Docking
    pub docking_requests: ComponentStore<DockingRequest>,
    pub docking_states: ComponentStore<DockingState>,
    pub docking_policies: ComponentStore<DockingPolicy>,

    // Telemetry
    pub order_decisions: ComponentStore<OrderDecision>,
    pub authority_seats: ComponentStore<AuthoritySeat>,

    // Tags
    pub vessels: TagStore,
    pub strike_craft: TagStore,
    pub drones: TagStore,
    pub anchors: TagStore,
    pub docked: TagStore,
    pub docking_complete: TagStore,
    pub simulation_disabled: TagStore,

    // Singletons
    pub registry: Option<FleetRegistry>,
    pub action_log: Option<ActionEventLog>,
}

impl World {
    /// World with default tunables
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> Self {
        Self {
            clock: SimClock::new(),
            config,
            existence: ExistenceOracle::new(),
            generations: Vec::new(),
            alive: Vec::new(),
            free_indices: Vec::new(),
            positions: ComponentStore::new(),
            decision_buffers: ComponentStore::new(),
            order_intents: ComponentStore::new(),
            ai_states: ComponentStore::new(),
            escort_assignments: ComponentStore::new(),
            child_tethers: ComponentStore::new(),
            capabilities: ComponentStore::new(),
            control_orders: ComponentStore::new(),
            control_links: ComponentStore::new(),
            swarm_behaviors: ComponentStore::new(),
            swarm_thrust: ComponentStore::new(),
            rescue_requests: ComponentStore::new(),
            docking_requests: ComponentStore::new(),
            docking_states: ComponentStore::new(),
            docking_policies: ComponentStore::new(),
            order_decisions: ComponentStore::new(),
            authority_seats: ComponentStore::new(),
            vessels: TagStore::new(),
            strike_craft: TagStore::new(),
            drones: TagStore::new(),
            anchors: TagStore::new(),
            docked: TagStore::new(),
            docking_complete: TagStore::new(),
            simulation_disabled: TagStore::new(),
            registry: None,
            action_log: None,
        }
    }

    pub fn spawn(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return EntityId::new(index, self.generations[slot]);
        }

        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        EntityId::new(index, 0)
    }

    pub fn spawn_at(&mut self, position: Position) -> EntityId {
        let entity = self.spawn();
        self.positions.insert(entity, position);
        entity
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        let slot = entity.index() as usize;
        slot < self.alive.len() && self.alive[slot] && self.generations[slot] == entity.generation()
    }

    /// Destroy an entity and detach all of its records.
    ///
    /// References held by other entities are left dangling on purpose;
    /// rules detect them through the existence oracle.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let slot = entity.index() as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_indices.push(entity.index());

        self.positions.remove(entity);
        self.decision_buffers.remove(entity);
        self.order_intents.remove(entity);
        self.ai_states.remove(entity);
        self.escort_assignments.remove(entity);
        self.child_tethers.remove(entity);
        self.capabilities.remove(entity);
        self.control_orders.remove(entity);
        self.control_links.remove(entity);
        self.swarm_behaviors.remove(entity);
        self.swarm_thrust.remove(entity);
        self.rescue_requests.remove(entity);
        self.docking_requests.remove(entity);
        self.docking_states.remove(entity);
        self.docking_policies.remove(entity);
        self.order_decisions.remove(entity);
        self.authority_seats.remove(entity);
        self.vessels.remove(entity);
        self.strike_craft.remove(entity);
        self.drones.remove(entity);
        self.anchors.remove(entity);
        self.docked.remove(entity);
        self.docking_complete.remove(entity);
        self.simulation_disabled.remove(entity);

        true
    }

    pub fn alive_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(slot, _)| EntityId::new(slot as u32, self.generations[slot]))
    }

    pub fn entity_count(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }

    /// Rebuild the existence snapshot for the current tick
    pub fn refresh_existence(&mut self) {
        let tick = self.clock.tick();
        let live: Vec<EntityId> = self.alive_entities().collect();
        self.existence.refresh(live, tick);
    }

    /// Append a decision candidate to an entity's buffer (upstream producer API)
    pub fn enqueue_decision(&mut self, entity: EntityId, candidate: DecisionCandidate) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(FleetError::EntityNotFound(entity));
        }
        match self.decision_buffers.get_mut(entity) {
            Some(buffer) => buffer.push(candidate),
            None => {
                self.decision_buffers.insert(entity, vec![candidate]);
            }
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
