//! Per-entity behavior update
//!
//! Runs at a fixed logical rate decoupled from the render rate via a time
//! accumulator. Each step drives every steering-bearing entity through its
//! finite state machine, applies separation, and integrates movement.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::ai::steering::{self, VELOCITY_EPSILON};
use crate::core::types::{Archetype, BehaviorState, EntityId};
use crate::ecs::world::World;
use crate::ecs::Species;
use crate::simulation::events::SimEvent;
use crate::spatial::{horizontal_distance, SparseHashGrid};

/// A chase is abandoned beyond this multiple of the awareness radius
const CHASE_ABANDON_FACTOR: f32 = 1.5;

/// Stamina drained per second while fleeing or chasing
const STAMINA_DRAIN_PER_SEC: f32 = 6.0;

/// Stamina recovered per second while idle or walking
const STAMINA_REGEN_PER_SEC: f32 = 10.0;

/// Speed penalty once stamina is exhausted
const EXHAUSTED_SPEED_FACTOR: f32 = 0.5;

/// Chance that a wander re-roll stands still instead of walking
const IDLE_CHANCE: f64 = 0.25;

pub struct AiSystem {
    accumulator: f32,
}

impl AiSystem {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Accumulate frame time and run as many fixed steps as it covers
    ///
    /// The accumulator is capped so a huge frame delta (tab suspend)
    /// executes a bounded amount of catch-up work; the interval is
    /// subtracted per step, never reset, so fractional time carries over.
    pub fn update(
        &mut self,
        world: &mut World,
        grid: &SparseHashGrid,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = world.config.ai_step_secs;
        let cap = step * world.config.ai_max_steps_per_frame as f32;
        self.accumulator = (self.accumulator + dt).min(cap);

        while self.accumulator >= step {
            self.accumulator -= step;
            step_entities(world, grid, step, events);
        }
    }
}

impl Default for AiSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn step_entities(world: &mut World, grid: &SparseHashGrid, step: f32, events: &mut Vec<SimEvent>) {
    let strike = world.config.strike_distance;
    let sep_radius = world.config.separation_radius;
    let weather_mult = world.env.weather.current.movement_modifier();

    for id in world.actors() {
        let Some(sp0) = world.species.get(&id).copied() else {
            continue;
        };
        if !sp0.is_alive() {
            continue;
        }
        let Some(mut tr) = world.transforms.get(&id).copied() else {
            continue;
        };
        let Some(mut mv) = world.movements.get(&id).copied() else {
            continue;
        };
        let Some(mut st) = world.steering.get(&id).copied() else {
            continue;
        };
        let mut sp = sp0;
        let prev_state = sp.state;

        // 1. Wander clock
        st.wander_timer -= step;
        let mut rerolled_idle = false;
        if st.wander_timer <= 0.0 {
            st.wander_heading = world.rng.gen_range(0.0..std::f32::consts::TAU);
            let (lo, hi) = world.config.wander_interval;
            st.wander_timer = world.rng.gen_range(lo..=hi);
            rerolled_idle = world.rng.gen_bool(IDLE_CHANCE);
        }

        // 2. Neighbor discovery
        let neighbors = grid.query_radius(id, tr.position, st.awareness_radius, |e| {
            world.position_of(e)
        });

        // 3. Finite state machine
        let mut desired = Vec3::ZERO;
        match sp.state {
            BehaviorState::Idle | BehaviorState::Walk => {
                let found = match sp.archetype {
                    Archetype::Prey => nearest_matching(
                        world,
                        &neighbors,
                        tr.position,
                        st.awareness_radius,
                        |s| s.archetype == Archetype::Predator,
                    ),
                    Archetype::Predator => nearest_matching(
                        world,
                        &neighbors,
                        tr.position,
                        st.awareness_radius,
                        |s| matches!(s.archetype, Archetype::Prey | Archetype::Player),
                    ),
                    Archetype::Player => None,
                };
                if let Some(target) = found {
                    st.target = Some(target);
                    sp.set_state(if sp.archetype == Archetype::Prey {
                        BehaviorState::Flee
                    } else {
                        BehaviorState::Chase
                    });
                } else if rerolled_idle {
                    sp.set_state(BehaviorState::Idle);
                } else {
                    desired = steering::wander_direction(st.wander_heading);
                    sp.set_state(BehaviorState::Walk);
                }
            }
            BehaviorState::Flee => match target_position(world, st.target) {
                Some(threat) => desired = steering::flee(tr.position, threat),
                None => {
                    st.target = None;
                    sp.set_state(BehaviorState::Idle);
                }
            },
            BehaviorState::Chase => match target_position(world, st.target) {
                Some(tp) => {
                    let d = horizontal_distance(tr.position, tp);
                    if d > st.awareness_radius * CHASE_ABANDON_FACTOR {
                        st.target = None;
                        sp.set_state(BehaviorState::Idle);
                    } else if d <= strike {
                        sp.set_state(BehaviorState::Attack);
                    } else {
                        desired = steering::seek(tr.position, tp);
                    }
                }
                None => {
                    st.target = None;
                    sp.set_state(BehaviorState::Idle);
                }
            },
            BehaviorState::Attack => match target_position(world, st.target) {
                Some(tp) => {
                    if horizontal_distance(tr.position, tp) <= strike {
                        // Strike effect; damage to the player is owned by
                        // the collision system
                        if let Some(target) = st.target {
                            if target != world.player {
                                world.damage(target, sp.kind.attack_damage());
                            }
                        }
                    }
                    sp.set_state(BehaviorState::Chase);
                }
                None => {
                    st.target = None;
                    sp.set_state(BehaviorState::Idle);
                }
            },
            BehaviorState::Dead => continue,
        }

        // 4. Separation from crowding neighbors
        let neighbor_positions: Vec<Vec3> = neighbors
            .iter()
            .filter(|n| world.is_alive(**n))
            .filter_map(|n| world.position_of(*n))
            .collect();
        desired += steering::separation(tr.position, &neighbor_positions, sep_radius);

        // 5. Stamina, speed clamp, integration, heading
        match sp.state {
            BehaviorState::Flee | BehaviorState::Chase => {
                sp.drain_stamina(STAMINA_DRAIN_PER_SEC * step)
            }
            BehaviorState::Idle | BehaviorState::Walk => {
                sp.restore_stamina(STAMINA_REGEN_PER_SEC * step)
            }
            _ => {}
        }

        let mut max_speed = sp.base_speed * sp.state.speed_multiplier() * weather_mult;
        if sp.stamina <= 0.0 {
            max_speed *= EXHAUSTED_SPEED_FACTOR;
        }
        max_speed = max_speed.min(mv.max_speed);

        mv.velocity = desired.normalize_or_zero() * max_speed;
        tr.position += mv.velocity * step;

        if mv.velocity.length() > VELOCITY_EPSILON {
            let yaw = mv.velocity.x.atan2(mv.velocity.z);
            let facing = Quat::from_rotation_y(yaw);
            tr.rotation = tr.rotation.slerp(facing, (mv.turn_rate * step).min(1.0));
        }

        if sp.state != prev_state {
            events.push(SimEvent::Vocalization {
                entity: id,
                species: sp.kind,
                state: sp.state,
            });
            tracing::trace!(?id, ?prev_state, state = ?sp.state, "behavior transition");
        }

        world.transforms.insert(id, tr);
        world.movements.insert(id, mv);
        world.steering.insert(id, st);
        world.species.insert(id, sp);
    }
}

/// First-encountered nearest neighbor whose species matches the filter
///
/// Only a strictly smaller distance replaces the running best, so ties go
/// to whichever entity the grid walk produced first.
fn nearest_matching(
    world: &World,
    neighbors: &[EntityId],
    pos: Vec3,
    max_radius: f32,
    filter: impl Fn(&Species) -> bool,
) -> Option<EntityId> {
    let mut best = None;
    let mut best_dist = f32::INFINITY;
    for &n in neighbors {
        let Some(sp) = world.species.get(&n) else {
            continue;
        };
        if !sp.is_alive() || !filter(sp) {
            continue;
        }
        let Some(np) = world.position_of(n) else {
            continue;
        };
        let d = horizontal_distance(pos, np);
        if d <= max_radius && d < best_dist {
            best = Some(n);
            best_dist = d;
        }
    }
    best
}

/// Resolve a steering target to a position
///
/// Valid only while the target still exists, carries a Transform, and is
/// not dead; anything else is a stale reference and yields None.
fn target_position(world: &World, target: Option<EntityId>) -> Option<Vec3> {
    let id = target?;
    if !world.contains(id) {
        return None;
    }
    if let Some(sp) = world.species.get(&id) {
        if !sp.is_alive() {
            return None;
        }
    }
    world.transforms.get(&id).map(|t| t.position)
}
