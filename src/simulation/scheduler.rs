//! Frame scheduler - orchestrates simulation updates
//!
//! Invoked once per render frame with that frame's elapsed seconds. Systems
//! run to completion in a fixed order so later systems observe the current
//! tick's environmental state, never the previous tick's.

use crate::ai::AiSystem;
use crate::collision::CollisionSystem;
use crate::ecs::world::World;
use crate::resource::ResourceSystem;
use crate::simulation::events::SimEvent;
use crate::spatial::SparseHashGrid;

pub struct FrameScheduler {
    grid: SparseHashGrid,
    ai: AiSystem,
    collision: CollisionSystem,
    resources: ResourceSystem,
}

impl FrameScheduler {
    pub fn new(grid_cell_size: f32) -> Self {
        Self {
            grid: SparseHashGrid::new(grid_cell_size),
            ai: AiSystem::new(),
            collision: CollisionSystem::new(),
            resources: ResourceSystem::new(),
        }
    }

    /// Advance the whole simulation by one frame
    ///
    /// Order: Time, Weather, Biome, maintenance (grid rebuild), AI,
    /// Collision, Resource. The same `dt` is passed to every system, giving
    /// all of them the same notion of "now". Non-finite or non-positive
    /// `dt` drops the frame without mutating anything.
    pub fn tick(&mut self, world: &mut World, dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if !dt.is_finite() || dt <= 0.0 {
            tracing::trace!(dt, "dropping degenerate frame");
            return events;
        }

        world.current_tick += 1;
        world.clock += dt as f64;

        if let Some((old, new)) = world.env.time.advance(dt) {
            events.push(SimEvent::PhaseChanged { old, new });
            tracing::debug!(?old, ?new, hour = world.env.time.hour, "day phase changed");
        }

        let clock = world.clock;
        let weather_change = {
            let env = &mut world.env;
            env.weather.update(dt, clock, &mut world.rng)
        };
        if let Some((old, new)) = weather_change {
            events.push(SimEvent::WeatherChanged { old, new });
            tracing::info!(?old, ?new, "weather changed");
        }

        let player_pos = world.player_position();
        if let Some((old, new)) = {
            let env = &mut world.env;
            env.biome.update(&env.biome_map, player_pos, dt)
        } {
            events.push(SimEvent::BiomeChanged { old, new });
            tracing::info!(?old, ?new, "biome changed");
        }

        self.grid.rebuild(
            world
                .entities()
                .filter_map(|id| world.position_of(id).map(|p| (id, p)))
                .collect::<Vec<_>>()
                .into_iter(),
        );

        self.ai.update(world, &self.grid, dt, &mut events);
        self.collision.update(world, dt, &mut events);
        self.resources.update(world, &mut events);

        events
    }
}
