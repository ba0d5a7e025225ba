//! Environmental singletons: time of day, weather, biome
//!
//! Each exists exactly once per session, created at world initialization and
//! only mutated thereafter.

pub mod biome;
pub mod time;
pub mod weather;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use biome::{BiomeKind, BiomeMap, BiomeRegion, BiomeState};
pub use time::{DayPhase, TimeOfDay};
pub use weather::{WeatherKind, WeatherState};

/// Bundle of the environment singletons, held by the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub time: TimeOfDay,
    pub weather: WeatherState,
    pub biome: BiomeState,
    pub biome_map: BiomeMap,
}

impl Environment {
    pub fn new(start_hour: f32, time_scale: f32, biome_map: BiomeMap, rng: &mut impl Rng) -> Self {
        let biome = BiomeState::new(biome_map.resolve(glam::Vec3::ZERO));
        Self {
            time: TimeOfDay::new(start_hour, time_scale),
            weather: WeatherState::new(rng),
            biome,
            biome_map,
        }
    }
}
