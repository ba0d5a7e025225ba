//! Collision system
//!
//! Runs on its own throttle, independent of the AI rate. Applies predator
//! damage to the player and resolves soft overlap between simulated bodies.
//! Hard-body blocking and ground clamping belong to the external physics
//! layer.

use crate::core::types::{Archetype, BehaviorState, EntityId};
use crate::ecs::world::World;
use crate::simulation::events::SimEvent;
use crate::spatial::horizontal_distance;

pub struct CollisionSystem {
    accumulator: f32,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    pub fn update(&mut self, world: &mut World, dt: f32, events: &mut Vec<SimEvent>) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let interval = world.config.collision_interval_secs;
        self.accumulator += dt;
        if self.accumulator < interval {
            return;
        }
        self.accumulator -= interval;
        // A long frame yields at most one catch-up check
        self.accumulator = self.accumulator.min(interval);

        let bodies = world.bodies();
        apply_predator_damage(world, &bodies, events);
        resolve_overlaps(world, &bodies);
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Predators engaged with the player and within strike range deal their
/// per-kind damage through the player mutator
fn apply_predator_damage(world: &mut World, bodies: &[EntityId], events: &mut Vec<SimEvent>) {
    if !world.is_alive(world.player) {
        return;
    }
    let player_pos = world.player_position();
    let reach = world.config.strike_distance + world.config.body_radius * 2.0;

    let mut hits = Vec::new();
    for &id in bodies {
        let Some(sp) = world.species.get(&id) else {
            continue;
        };
        if sp.archetype != Archetype::Predator || !sp.is_alive() {
            continue;
        }
        // Attack-eligible: mid-strike or actively engaging
        if !matches!(sp.state, BehaviorState::Attack | BehaviorState::Chase) {
            continue;
        }
        let Some(pos) = world.position_of(id) else {
            continue;
        };
        if horizontal_distance(pos, player_pos) <= reach {
            hits.push((id, sp.kind, sp.kind.attack_damage()));
        }
    }

    for (attacker, species, amount) in hits {
        world.damage_player(amount);
        events.push(SimEvent::PlayerHit {
            attacker,
            species,
            amount,
        });
        tracing::debug!(?attacker, amount, "player hit");
    }
}

/// Push overlapping body pairs apart along their connecting line
///
/// O(n^2) pairwise scan; acceptable at the entity counts simulated here.
/// Exactly coincident pairs have no defined pushback direction and are
/// skipped for the tick.
fn resolve_overlaps(world: &mut World, bodies: &[EntityId]) {
    let min_dist = world.config.body_radius * 2.0;
    let strength = world.config.pushback_strength;

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (bodies[i], bodies[j]);
            if !world.is_alive(a) || !world.is_alive(b) {
                continue;
            }
            let (Some(pa), Some(pb)) = (world.position_of(a), world.position_of(b)) else {
                continue;
            };
            let dist = horizontal_distance(pa, pb);
            if dist >= min_dist || dist == 0.0 {
                continue;
            }

            let overlap = min_dist - dist;
            let dir = glam::Vec3::new((pb.x - pa.x) / dist, 0.0, (pb.z - pa.z) / dist);
            let push = dir * (overlap * strength * 0.5);

            if let Some(tr) = world.transforms.get_mut(&a) {
                tr.position -= push;
            }
            if let Some(tr) = world.transforms.get_mut(&b) {
                tr.position += push;
            }
        }
    }
}
