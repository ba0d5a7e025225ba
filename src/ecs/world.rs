//! ECS World - manages all entities and their components
//!
//! Entities are ids plus sparse component maps; an entity's behavior is
//! determined entirely by which components are attached. The environment
//! singletons live as fields here rather than as store entries.

use ahash::{AHashMap, AHashSet};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimConfig;
use crate::core::types::{BehaviorState, EntityId, ResourceKind, SpeciesKind};
use crate::ecs::components::{Movement, ResourceNode, Species, Steering, Transform};
use crate::environment::{BiomeMap, Environment};

/// The game world containing all entities
pub struct World {
    pub current_tick: u64,
    /// Elapsed session seconds; respawn and weather epochs key off this
    pub clock: f64,
    pub config: SimConfig,
    pub rng: ChaCha8Rng,
    pub env: Environment,
    pub player: EntityId,

    /// Insertion-ordered registry; iteration order is spawn order, which
    /// keeps neighbor tie-breaking deterministic for a given seed
    order: Vec<EntityId>,
    live: AHashSet<EntityId>,

    pub transforms: AHashMap<EntityId, Transform>,
    pub movements: AHashMap<EntityId, Movement>,
    pub species: AHashMap<EntityId, Species>,
    pub steering: AHashMap<EntityId, Steering>,
    pub resources: AHashMap<EntityId, ResourceNode>,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        Self::with_biomes(config, BiomeMap::default())
    }

    pub fn with_biomes(config: SimConfig, biome_map: BiomeMap) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let env = Environment::new(config.start_hour, config.time_scale, biome_map, &mut rng);

        let mut world = Self {
            current_tick: 0,
            clock: 0.0,
            config,
            rng,
            env,
            player: EntityId::new(),
            order: Vec::new(),
            live: AHashSet::new(),
            transforms: AHashMap::new(),
            movements: AHashMap::new(),
            species: AHashMap::new(),
            steering: AHashMap::new(),
            resources: AHashMap::new(),
        };

        // The player avatar is a store entity like any other; input-driven
        // movement writes its Transform from outside the core.
        let player = world.register();
        world.transforms.insert(player, Transform::at(Vec3::ZERO));
        world
            .movements
            .insert(player, Movement::new(SpeciesKind::Human.base_speed() * 2.0));
        world.species.insert(player, Species::new(SpeciesKind::Human));
        world.player = player;
        world
    }

    fn register(&mut self) -> EntityId {
        let id = EntityId::new();
        self.order.push(id);
        self.live.insert(id);
        id
    }

    /// Spawn an AI-driven creature at a position
    pub fn spawn_creature(&mut self, kind: SpeciesKind, position: Vec3) -> EntityId {
        let id = self.register();
        self.transforms.insert(id, Transform::at(position));
        self.movements
            .insert(id, Movement::new(kind.base_speed() * 2.0));
        self.species.insert(id, Species::new(kind));

        let mut steering = Steering::new(kind.awareness_radius());
        steering.wander_heading = self.rng.gen_range(0.0..std::f32::consts::TAU);
        steering.wander_timer = self
            .rng
            .gen_range(self.config.wander_interval.0..=self.config.wander_interval.1);
        self.steering.insert(id, steering);
        id
    }

    /// Spawn a resource pickup at a position
    pub fn spawn_resource(&mut self, kind: ResourceKind, position: Vec3) -> EntityId {
        let id = self.register();
        self.transforms.insert(id, Transform::at(position));
        self.resources.insert(id, ResourceNode::new(kind));
        id
    }

    /// Remove an entity and all of its components
    pub fn despawn(&mut self, id: EntityId) {
        if !self.live.remove(&id) {
            return;
        }
        self.order.retain(|e| *e != id);
        self.transforms.remove(&id);
        self.movements.remove(&id);
        self.species.remove(&id);
        self.steering.remove(&id);
        self.resources.remove(&id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// All live entities in spawn order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Entities driven by the AI system: steering + movement + species +
    /// transform all present
    pub fn actors(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.steering.contains_key(id)
                    && self.movements.contains_key(id)
                    && self.species.contains_key(id)
                    && self.transforms.contains_key(id)
            })
            .collect()
    }

    /// Entities participating in collision: transform + movement + species
    pub fn bodies(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.transforms.contains_key(id)
                    && self.movements.contains_key(id)
                    && self.species.contains_key(id)
            })
            .collect()
    }

    /// Resource-bearing entities in spawn order
    pub fn resource_entities(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.resources.contains_key(id) && self.transforms.contains_key(id))
            .collect()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.species.get(&id).map(|s| s.is_alive()).unwrap_or(false)
    }

    /// Position of an entity, if it exists and has a transform
    pub fn position_of(&self, id: EntityId) -> Option<Vec3> {
        if !self.live.contains(&id) {
            return None;
        }
        self.transforms.get(&id).map(|t| t.position)
    }

    // === Player boundary mutators ===

    pub fn player_position(&self) -> Vec3 {
        self.position_of(self.player).unwrap_or(Vec3::ZERO)
    }

    pub fn damage_player(&mut self, amount: f32) {
        if let Some(sp) = self.species.get_mut(&self.player) {
            sp.apply_damage(amount);
        }
    }

    pub fn heal_player(&mut self, amount: f32) {
        if let Some(sp) = self.species.get_mut(&self.player) {
            sp.heal(amount);
        }
    }

    pub fn restore_player_stamina(&mut self, amount: f32) {
        if let Some(sp) = self.species.get_mut(&self.player) {
            sp.restore_stamina(amount);
        }
    }

    /// Damage an arbitrary entity; missing components degrade to a no-op
    pub fn damage(&mut self, id: EntityId, amount: f32) {
        if let Some(sp) = self.species.get_mut(&id) {
            sp.apply_damage(amount);
        }
    }

    // === Save interop ===

    pub fn snapshot(&self) -> WorldSnapshot {
        let sp = self.species.get(&self.player);
        WorldSnapshot {
            player_position: self.player_position(),
            player_health: sp.map(|s| s.health).unwrap_or(0.0),
            player_stamina: sp.map(|s| s.stamina).unwrap_or(0.0),
            hour: self.env.time.hour,
        }
    }

    /// Restore a snapshot; all values pass through the same clamping the
    /// live mutators apply, so any well-formed snapshot is accepted
    pub fn restore(&mut self, snap: &WorldSnapshot) {
        if snap.player_position.is_finite() {
            if let Some(tr) = self.transforms.get_mut(&self.player) {
                tr.position = snap.player_position;
            }
        }
        if let Some(sp) = self.species.get_mut(&self.player) {
            if snap.player_health.is_finite() {
                sp.health = snap.player_health.clamp(0.0, sp.max_health);
                // Restored vitals obey the same rule the live mutators
                // enforce: zero health is always the dead state, and a
                // positive restore brings the avatar back into play.
                if sp.health <= 0.0 {
                    sp.state = BehaviorState::Dead;
                } else if sp.state == BehaviorState::Dead {
                    sp.state = BehaviorState::Idle;
                }
            }
            if snap.player_stamina.is_finite() {
                sp.stamina = snap.player_stamina.clamp(0.0, sp.max_stamina);
            }
        }
        self.env.time.set_hour(snap.hour);
    }
}

/// The fields an external save routine reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub player_position: Vec3,
    pub player_health: f32,
    pub player_stamina: f32,
    pub hour: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DayPhase;

    #[test]
    fn test_world_creation_has_player() {
        let world = World::new(SimConfig::default());
        assert_eq!(world.entity_count(), 1);
        assert!(world.contains(world.player));
        assert!(world.is_alive(world.player));
    }

    #[test]
    fn test_spawn_and_despawn() {
        let mut world = World::new(SimConfig::default());
        let id = world.spawn_creature(SpeciesKind::Deer, Vec3::new(5.0, 0.0, 5.0));
        assert!(world.contains(id));
        assert_eq!(world.actors(), vec![id]);

        world.despawn(id);
        assert!(!world.contains(id));
        assert!(world.position_of(id).is_none());
        assert!(world.actors().is_empty());
    }

    #[test]
    fn test_actor_requires_full_component_set() {
        let mut world = World::new(SimConfig::default());
        // Resources have no steering/species, so they are never actors
        world.spawn_resource(ResourceKind::Berries, Vec3::ZERO);
        assert!(world.actors().is_empty());
        assert_eq!(world.resource_entities().len(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut world = World::new(SimConfig::default());
        world.damage_player(30.0);
        let snap = world.snapshot();

        let mut other = World::new(SimConfig::default());
        other.restore(&snap);
        assert_eq!(other.species[&other.player].health, 70.0);
        assert_eq!(other.env.time.hour, snap.hour);
    }

    #[test]
    fn test_restore_zero_health_forces_dead() {
        let mut world = World::new(SimConfig::default());
        let snap = WorldSnapshot {
            player_position: Vec3::ZERO,
            player_health: 0.0,
            player_stamina: 50.0,
            hour: 12.0,
        };
        world.restore(&snap);
        let sp = &world.species[&world.player];
        assert_eq!(sp.health, 0.0);
        assert!(!sp.is_alive());
        assert_eq!(sp.state, BehaviorState::Dead);
    }

    #[test]
    fn test_restore_positive_health_revives_dead_player() {
        let mut world = World::new(SimConfig::default());
        world.damage_player(1e6);
        assert!(!world.is_alive(world.player));

        let snap = WorldSnapshot {
            player_position: Vec3::ZERO,
            player_health: 60.0,
            player_stamina: 50.0,
            hour: 12.0,
        };
        world.restore(&snap);
        let sp = &world.species[&world.player];
        assert!(sp.is_alive());
        assert_eq!(sp.state, BehaviorState::Idle);
    }

    #[test]
    fn test_restore_hour_recomputes_phase() {
        let mut world = World::new(SimConfig::default());
        assert_eq!(world.env.time.phase, DayPhase::Day);

        let mut snap = world.snapshot();
        snap.hour = 22.0;
        world.restore(&snap);
        assert_eq!(world.env.time.phase, DayPhase::Night);
        assert_eq!(world.env.time.light_level, DayPhase::Night.light_level());
        assert_eq!(world.env.time.fog_density, DayPhase::Night.fog_density());
    }

    #[test]
    fn test_restore_clamps_extreme_values() {
        let mut world = World::new(SimConfig::default());
        let snap = WorldSnapshot {
            player_position: Vec3::new(1e6, 0.0, -1e6),
            player_health: 1e9,
            player_stamina: -5.0,
            hour: 47.5,
        };
        world.restore(&snap);
        let sp = &world.species[&world.player];
        assert_eq!(sp.health, sp.max_health);
        assert_eq!(sp.stamina, 0.0);
        assert!((world.env.time.hour - 23.5).abs() < 1e-4);
    }
}
