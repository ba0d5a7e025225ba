//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good pacing at interactive frame
/// rates. Changing them will affect gameplay feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === SPATIAL SYSTEM ===
    /// Size of each cell in the spatial hash grid (world units)
    ///
    /// Should be in the same ballpark as typical awareness radii so a 3x3
    /// cell neighborhood covers a query. Smaller = more cells to visit,
    /// larger = more entities to distance-filter per query.
    pub grid_cell_size: f32,

    // === TIME SYSTEM ===
    /// Simulated hours advanced per real minute
    ///
    /// At 60.0, one real second advances one in-game hour; a full day
    /// cycle takes 24 seconds.
    pub time_scale: f32,

    /// Hour of day the session starts at
    pub start_hour: f32,

    // === AI SYSTEM ===
    /// Seconds of simulated time per AI step (0.05 = 20 Hz)
    ///
    /// Behavior evaluation runs at this fixed logical rate regardless of
    /// render rate; leftover frame time carries over in an accumulator.
    pub ai_step_secs: f32,

    /// Maximum AI steps executed in a single frame
    ///
    /// Bounds catch-up work after a long frame (tab suspend, debugger
    /// pause) so one frame cannot run an unbounded number of steps.
    pub ai_max_steps_per_frame: usize,

    /// Distance below which neighbors contribute a separation force
    pub separation_radius: f32,

    /// Distance at which a chasing predator switches to attacking
    pub strike_distance: f32,

    /// Seconds between wander heading changes (lower, upper bound)
    pub wander_interval: (f32, f32),

    // === COLLISION SYSTEM ===
    /// Seconds between collision checks
    ///
    /// Overlap resolution and player damage run on this throttle,
    /// independent of the AI rate.
    pub collision_interval_secs: f32,

    /// Body radius used for soft overlap resolution (world units)
    pub body_radius: f32,

    /// Fraction of overlap depth corrected per collision check
    pub pushback_strength: f32,

    // === RESOURCE SYSTEM ===
    /// Distance within which the player collects a resource
    pub collect_distance: f32,

    /// Placement band around the player for seeded resources
    pub resource_min_distance: f32,
    pub resource_max_distance: f32,

    /// Attempts to find a clear spot before giving up on a placement
    pub resource_place_retries: usize,

    /// Instances of each kind seeded at session start (lower, upper bound)
    pub resource_seed_count: (usize, usize),

    /// Total resources maintained per biome; below this a new one spawns
    pub resource_cap: usize,

    // === SESSION ===
    /// Seed for the session RNG; a session is reproducible from its seed
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_cell_size: 10.0,

            time_scale: 60.0,
            start_hour: 8.0,

            ai_step_secs: 0.05,
            ai_max_steps_per_frame: 8,
            separation_radius: 2.5,
            strike_distance: 2.0,
            wander_interval: (1.5, 4.0),

            collision_interval_secs: 0.1,
            body_radius: 0.8,
            pushback_strength: 0.5,

            collect_distance: 2.0,
            resource_min_distance: 8.0,
            resource_max_distance: 40.0,
            resource_place_retries: 10,
            resource_seed_count: (2, 4),
            resource_cap: 12,

            seed: 12345,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration overrides from a TOML file
    pub fn from_toml_path(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.ai_step_secs <= 0.0 {
            return Err("ai_step_secs must be positive".into());
        }
        if self.grid_cell_size <= 0.0 {
            return Err("grid_cell_size must be positive".into());
        }
        if self.wander_interval.0 > self.wander_interval.1 {
            return Err(format!(
                "wander_interval lower bound ({}) exceeds upper bound ({})",
                self.wander_interval.0, self.wander_interval.1
            ));
        }
        if self.resource_min_distance >= self.resource_max_distance {
            return Err(format!(
                "resource_min_distance ({}) should be < resource_max_distance ({})",
                self.resource_min_distance, self.resource_max_distance
            ));
        }
        if self.resource_seed_count.0 > self.resource_seed_count.1 {
            return Err("resource_seed_count bounds out of order".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_band_rejected() {
        let mut config = SimConfig::default();
        config.resource_min_distance = 50.0;
        assert!(config.validate().is_err());
    }
}
