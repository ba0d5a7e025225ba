//! Integration scenarios for the simulation core
//!
//! End-to-end checks through the frame scheduler: phase flips, threat
//! acquisition, chase abandonment, resource round-trips, and collision
//! separation.

use glam::Vec3;

use wildreach::collision::CollisionSystem;
use wildreach::core::config::SimConfig;
use wildreach::core::types::{BehaviorState, ResourceKind, SpeciesKind};
use wildreach::ecs::world::World;
use wildreach::environment::DayPhase;
use wildreach::simulation::{FrameScheduler, SimEvent};
use wildreach::spatial::horizontal_distance;

fn world_with(config: SimConfig) -> (World, FrameScheduler) {
    let scheduler = FrameScheduler::new(config.grid_cell_size);
    (World::new(config), scheduler)
}

/// Park the player far from the action so the scenario is undisturbed
fn sideline_player(world: &mut World) {
    world.transforms.get_mut(&world.player).unwrap().position = Vec3::new(1000.0, 0.0, 1000.0);
}

#[test]
fn test_dawn_transition_scenario() {
    let mut config = SimConfig::default();
    config.start_hour = 6.9;
    config.time_scale = 60.0;
    let (mut world, mut scheduler) = world_with(config);

    assert_eq!(world.env.time.phase, DayPhase::Dawn);
    let events = scheduler.tick(&mut world, 0.1);

    assert!((world.env.time.hour - 7.0).abs() < 1e-3);
    assert_eq!(world.env.time.phase, DayPhase::Day);
    assert!(events.contains(&SimEvent::PhaseChanged {
        old: DayPhase::Dawn,
        new: DayPhase::Day,
    }));
}

#[test]
fn test_prey_acquires_predator_and_flees() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    sideline_player(&mut world);

    let deer = world.spawn_creature(SpeciesKind::Deer, Vec3::ZERO);
    let wolf = world.spawn_creature(SpeciesKind::Wolf, Vec3::new(5.0, 0.0, 0.0));
    world.steering.get_mut(&deer).unwrap().awareness_radius = 10.0;

    // One AI step worth of frame time
    let step = world.config.ai_step_secs;
    scheduler.tick(&mut world, step);

    assert_eq!(world.species[&deer].state, BehaviorState::Flee);
    assert_eq!(world.steering[&deer].target, Some(wolf));
    // Fleeing carried the deer away from the wolf
    let d = horizontal_distance(
        world.position_of(deer).unwrap(),
        world.position_of(wolf).unwrap(),
    );
    assert!(d > 5.0 - 1e-3);
}

#[test]
fn test_predator_chases_then_attacks() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    sideline_player(&mut world);

    let deer = world.spawn_creature(SpeciesKind::Deer, Vec3::ZERO);
    let wolf = world.spawn_creature(SpeciesKind::Wolf, Vec3::new(1.0, 0.0, 0.0));
    // Keep the deer oblivious so it stands still
    world.steering.get_mut(&deer).unwrap().awareness_radius = 0.0;

    let step = world.config.ai_step_secs;
    scheduler.tick(&mut world, step);
    assert_eq!(world.species[&wolf].state, BehaviorState::Chase);
    assert_eq!(world.steering[&wolf].target, Some(deer));

    // Within strike distance: chase flips to attack, then the strike lands
    let health_before = world.species[&deer].health;
    scheduler.tick(&mut world, step);
    assert_eq!(world.species[&wolf].state, BehaviorState::Attack);
    scheduler.tick(&mut world, step);
    assert!(world.species[&deer].health < health_before);
}

#[test]
fn test_lost_chase_target_reverts_to_idle() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    sideline_player(&mut world);

    let deer = world.spawn_creature(SpeciesKind::Deer, Vec3::new(16.0, 0.0, 0.0));
    let wolf = world.spawn_creature(SpeciesKind::Wolf, Vec3::ZERO);
    world.steering.get_mut(&deer).unwrap().awareness_radius = 0.0;

    let wolf_steering = world.steering.get_mut(&wolf).unwrap();
    wolf_steering.awareness_radius = 10.0;
    wolf_steering.target = Some(deer);
    world.species.get_mut(&wolf).unwrap().state = BehaviorState::Chase;

    // Target sits at 1.6x awareness radius: chase is abandoned
    let step = world.config.ai_step_secs;
    scheduler.tick(&mut world, step);
    assert_eq!(world.species[&wolf].state, BehaviorState::Idle);
    assert_eq!(world.steering[&wolf].target, None);
}

#[test]
fn test_despawned_threat_clears_stale_target() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    sideline_player(&mut world);

    let deer = world.spawn_creature(SpeciesKind::Deer, Vec3::ZERO);
    let wolf = world.spawn_creature(SpeciesKind::Wolf, Vec3::new(5.0, 0.0, 0.0));
    let step = world.config.ai_step_secs;
    scheduler.tick(&mut world, step);
    assert_eq!(world.steering[&deer].target, Some(wolf));

    world.despawn(wolf);
    scheduler.tick(&mut world, step);
    assert_eq!(world.steering[&deer].target, None);
    assert_ne!(world.species[&deer].state, BehaviorState::Flee);
}

#[test]
fn test_resource_round_trip_through_scheduler() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    let node = world.spawn_resource(ResourceKind::Berries, Vec3::new(1.0, 0.0, 0.0));
    world.damage_player(40.0);

    let events = scheduler.tick(&mut world, 1.0 / 60.0);
    assert!(world.resources[&node].collected);
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::ResourceCollected { kind: ResourceKind::Berries, .. }
    )));

    // Short of the respawn duration: still collected
    world.clock += ResourceKind::Berries.respawn_secs() as f64 - 1.0;
    scheduler.tick(&mut world, 1.0 / 60.0);
    assert!(world.resources[&node].collected);

    world.clock += 1.0;
    scheduler.tick(&mut world, 1.0 / 60.0);
    assert!(!world.resources[&node].collected);
}

#[test]
fn test_collision_separation_is_monotonic() {
    let mut world = World::new(SimConfig::default());
    let a = world.spawn_creature(SpeciesKind::Deer, Vec3::new(0.0, 0.0, 0.0));
    let b = world.spawn_creature(SpeciesKind::Deer, Vec3::new(0.3, 0.0, 0.0));
    let mut collision = CollisionSystem::new();

    let min_dist = world.config.body_radius * 2.0;
    let mut last = horizontal_distance(
        world.position_of(a).unwrap(),
        world.position_of(b).unwrap(),
    );
    let interval = world.config.collision_interval_secs;
    let mut events = Vec::new();
    for _ in 0..100 {
        collision.update(&mut world, interval, &mut events);
        let d = horizontal_distance(
            world.position_of(a).unwrap(),
            world.position_of(b).unwrap(),
        );
        assert!(d >= last - 1e-5, "separation must never decrease");
        last = d;
        if d >= min_dist {
            break;
        }
    }
    assert!(last >= min_dist - 1e-3);
}

#[test]
fn test_bounds_invariants_over_many_ticks() {
    let mut config = SimConfig::default();
    config.seed = 777;
    let (mut world, mut scheduler) = world_with(config);

    // A crowded patch so chases, attacks and pushback all happen
    for i in 0..6 {
        world.spawn_creature(SpeciesKind::Deer, Vec3::new(i as f32 * 2.0, 0.0, 0.0));
        world.spawn_creature(SpeciesKind::Wolf, Vec3::new(i as f32 * 2.0, 0.0, 4.0));
    }

    for _ in 0..600 {
        scheduler.tick(&mut world, 1.0 / 60.0);
        for sp in world.species.values() {
            assert!(sp.health >= 0.0 && sp.health <= sp.max_health);
            assert!(sp.stamina >= 0.0 && sp.stamina <= sp.max_stamina);
        }
        assert!((0.0..24.0).contains(&world.env.time.hour));
        assert!((0.0..=1.0).contains(&world.env.weather.visibility));
        assert!((0.0..=1.0).contains(&world.env.weather.progress));
    }
}

#[test]
fn test_dead_entities_stop_acting() {
    let (mut world, mut scheduler) = world_with(SimConfig::default());
    sideline_player(&mut world);

    let deer = world.spawn_creature(SpeciesKind::Deer, Vec3::ZERO);
    world.damage(deer, 1e6);
    assert_eq!(world.species[&deer].state, BehaviorState::Dead);

    let pos = world.position_of(deer).unwrap();
    let step = world.config.ai_step_secs;
    for _ in 0..20 {
        scheduler.tick(&mut world, step);
    }
    assert_eq!(world.species[&deer].state, BehaviorState::Dead);
    assert_eq!(world.position_of(deer).unwrap(), pos);
}
