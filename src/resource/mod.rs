//! Resource system
//!
//! Seeds the world with biome-valid pickups, handles player collection, and
//! respawns collected nodes in place once their timers elapse. Collected
//! nodes are flagged, never despawned.

use glam::Vec3;
use rand::Rng;

use crate::ecs::world::World;
use crate::simulation::events::SimEvent;
use crate::spatial::horizontal_distance;

pub struct ResourceSystem {
    seeded: bool,
}

impl ResourceSystem {
    pub fn new() -> Self {
        Self { seeded: false }
    }

    pub fn update(&mut self, world: &mut World, events: &mut Vec<SimEvent>) {
        if !self.seeded {
            seed_resources(world);
            self.seeded = true;
        }

        collect_in_range(world, events);
        respawn_elapsed(world);
        maintain_population(world);
    }
}

impl Default for ResourceSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// First-tick seeding: a few instances of every kind valid for the biome,
/// scattered in a band around the player
fn seed_resources(world: &mut World) {
    let kinds = world.env.biome.current.valid_resources().to_vec();
    let (lo, hi) = world.config.resource_seed_count;
    for kind in kinds {
        let count = world.rng.gen_range(lo..=hi);
        for _ in 0..count {
            if let Some(pos) = pick_spot(world) {
                world.spawn_resource(kind, pos);
            }
        }
    }
    tracing::info!(
        biome = ?world.env.biome.current,
        count = world.resource_entities().len(),
        "seeded resources"
    );
}

/// Random point in the placement band around the player, rejecting spots
/// already occupied by another node; gives up after the retry budget
fn pick_spot(world: &mut World) -> Option<Vec3> {
    let player = world.player_position();
    let min_d = world.config.resource_min_distance;
    let max_d = world.config.resource_max_distance;
    let clearance = world.config.collect_distance * 2.0;
    let existing: Vec<Vec3> = world
        .resource_entities()
        .iter()
        .filter_map(|id| world.position_of(*id))
        .collect();

    for _ in 0..world.config.resource_place_retries {
        let angle = world.rng.gen_range(0.0..std::f32::consts::TAU);
        // A collapsed band (config that skipped validate) degrades to a
        // fixed-radius ring instead of an empty gen_range panic
        let dist = if min_d < max_d {
            world.rng.gen_range(min_d..max_d)
        } else {
            min_d
        };
        let candidate = player + Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist);
        let blocked = existing
            .iter()
            .any(|p| horizontal_distance(*p, candidate) < clearance);
        if !blocked {
            return Some(candidate);
        }
    }
    None
}

/// Mark in-range uncollected nodes collected and apply their restores
fn collect_in_range(world: &mut World, events: &mut Vec<SimEvent>) {
    if !world.is_alive(world.player) {
        return;
    }
    let player_pos = world.player_position();
    let reach = world.config.collect_distance;
    let now = world.clock;

    for id in world.resource_entities() {
        let Some(pos) = world.position_of(id) else {
            continue;
        };
        let Some(node) = world.resources.get_mut(&id) else {
            continue;
        };
        if node.collected || horizontal_distance(pos, player_pos) > reach {
            continue;
        }
        node.collect(now);
        let (kind, health, stamina) = (node.kind, node.health_restore, node.stamina_restore);

        world.heal_player(health);
        world.restore_player_stamina(stamina);
        events.push(SimEvent::ResourceCollected { entity: id, kind });
        tracing::debug!(?id, ?kind, "resource collected");
    }
}

/// Reactivate nodes whose respawn duration has elapsed, in place
fn respawn_elapsed(world: &mut World) {
    let now = world.clock;
    for node in world.resources.values_mut() {
        if node.ready_to_respawn(now) {
            node.respawn();
        }
    }
}

/// Keep the biome stocked: below the cap, spawn one random valid kind
fn maintain_population(world: &mut World) {
    let valid = world.env.biome.current.valid_resources();
    let count = world
        .resources
        .values()
        .filter(|n| valid.contains(&n.kind))
        .count();
    if count >= world.config.resource_cap {
        return;
    }
    let kind = valid[world.rng.gen_range(0..valid.len())];
    if let Some(pos) = pick_spot(world) {
        world.spawn_resource(kind, pos);
        tracing::debug!(?kind, "spawned replacement resource");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;
    use crate::core::types::ResourceKind;

    #[test]
    fn test_collapsed_placement_band_degrades_to_ring() {
        let mut config = SimConfig::default();
        config.resource_min_distance = 8.0;
        config.resource_max_distance = 8.0;
        let mut world = World::new(config);
        let mut system = ResourceSystem::new();
        let mut events = Vec::new();
        system.update(&mut world, &mut events);

        assert!(!world.resource_entities().is_empty());
        let player = world.player_position();
        for id in world.resource_entities() {
            let d = horizontal_distance(world.position_of(id).unwrap(), player);
            assert!((d - 8.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_seeding_respects_band_and_biome() {
        let mut world = World::new(SimConfig::default());
        let mut system = ResourceSystem::new();
        let mut events = Vec::new();
        system.update(&mut world, &mut events);

        let valid = world.env.biome.current.valid_resources();
        let player = world.player_position();
        let ids = world.resource_entities();
        assert!(!ids.is_empty());
        for id in ids {
            let node = &world.resources[&id];
            assert!(valid.contains(&node.kind));
            let d = horizontal_distance(world.position_of(id).unwrap(), player);
            assert!(d >= world.config.resource_min_distance);
            assert!(d <= world.config.resource_max_distance);
        }
    }

    #[test]
    fn test_collection_applies_restores() {
        let mut world = World::new(SimConfig::default());
        world.damage_player(50.0);
        let id = world.spawn_resource(ResourceKind::Berries, Vec3::new(1.0, 0.0, 0.0));

        let mut events = Vec::new();
        collect_in_range(&mut world, &mut events);

        assert!(world.resources[&id].collected);
        assert_eq!(
            world.species[&world.player].health,
            50.0 + ResourceKind::Berries.health_restore()
        );
        assert_eq!(
            events,
            vec![SimEvent::ResourceCollected {
                entity: id,
                kind: ResourceKind::Berries
            }]
        );
    }

    #[test]
    fn test_out_of_range_node_not_collected() {
        let mut world = World::new(SimConfig::default());
        let id = world.spawn_resource(ResourceKind::Berries, Vec3::new(30.0, 0.0, 0.0));

        let mut events = Vec::new();
        collect_in_range(&mut world, &mut events);
        assert!(!world.resources[&id].collected);
        assert!(events.is_empty());
    }

    #[test]
    fn test_respawn_after_duration() {
        let mut world = World::new(SimConfig::default());
        let id = world.spawn_resource(ResourceKind::SpringWater, Vec3::new(1.0, 0.0, 0.0));

        let mut events = Vec::new();
        collect_in_range(&mut world, &mut events);
        assert!(world.resources[&id].collected);

        // Just short of the respawn duration: still collected
        world.clock += ResourceKind::SpringWater.respawn_secs() as f64 - 0.5;
        respawn_elapsed(&mut world);
        assert!(world.resources[&id].collected);

        world.clock += 0.5;
        respawn_elapsed(&mut world);
        assert!(!world.resources[&id].collected);
        // Respawn happens in place
        assert_eq!(
            world.position_of(id).unwrap(),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_population_maintained_up_to_cap() {
        let mut world = World::new(SimConfig::default());
        for _ in 0..world.config.resource_cap + 5 {
            maintain_population(&mut world);
        }
        let valid = world.env.biome.current.valid_resources();
        let count = world
            .resources
            .values()
            .filter(|n| valid.contains(&n.kind))
            .count();
        assert!(count <= world.config.resource_cap);
    }
}
