//! Wildreach - headless simulation runner
//!
//! Drives the frame scheduler at a fixed frame delta without a renderer.
//! Useful for tuning, profiling and watching emergent behavior in the log.

use clap::Parser;
use glam::Vec3;
use rand::Rng;

use wildreach::core::config::SimConfig;
use wildreach::core::error::Result;
use wildreach::core::types::Archetype;
use wildreach::ecs::world::World;
use wildreach::simulation::{FrameScheduler, SimEvent};

#[derive(Parser, Debug)]
#[command(name = "wildreach", about = "Headless world-simulation runner")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Seconds of simulated time per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Session seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildreach=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_toml_path(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Err(msg) = config.validate() {
        return Err(wildreach::core::error::SimError::InvalidConfig(msg));
    }

    tracing::info!(seed = config.seed, frames = args.frames, "starting session");

    let mut world = World::new(config);
    spawn_initial_population(&mut world);
    let mut scheduler = FrameScheduler::new(world.config.grid_cell_size);

    let mut collected = 0u64;
    let mut hits = 0u64;
    for _ in 0..args.frames {
        for event in scheduler.tick(&mut world, args.dt) {
            match event {
                SimEvent::ResourceCollected { kind, .. } => {
                    collected += 1;
                    tracing::info!(?kind, "collected");
                }
                SimEvent::PlayerHit { species, amount, .. } => {
                    hits += 1;
                    tracing::info!(?species, amount, "player hit");
                }
                SimEvent::Vocalization { species, state, .. } => {
                    tracing::debug!(?species, ?state, "vocalization");
                }
                _ => {}
            }
        }
    }

    let snap = world.snapshot();
    println!("\n=== WILDREACH SESSION ===");
    println!("frames:        {}", args.frames);
    println!("entities:      {}", world.entity_count());
    println!("hour:          {:.2} ({:?})", snap.hour, world.env.time.phase);
    println!("weather:       {:?}", world.env.weather.current);
    println!("biome:         {:?}", world.env.biome.current);
    println!("player health: {:.1}", snap.player_health);
    println!("collections:   {collected}");
    println!("hits taken:    {hits}");

    Ok(())
}

/// Scatter a starting population across the biome regions
fn spawn_initial_population(world: &mut World) {
    let regions = world.env.biome_map.regions.clone();
    for region in regions {
        let kinds: Vec<_> = region
            .kind
            .valid_species()
            .iter()
            .copied()
            .filter(|k| k.archetype() != Archetype::Player)
            .collect();
        for kind in kinds {
            let count = world.rng.gen_range(2..=3);
            for _ in 0..count {
                let angle = world.rng.gen_range(0.0..std::f32::consts::TAU);
                let dist = world.rng.gen_range(0.0..region.radius);
                let pos = Vec3::new(
                    region.center.x + angle.cos() * dist,
                    0.0,
                    region.center.y + angle.sin() * dist,
                );
                world.spawn_creature(kind, pos);
            }
        }
    }
    tracing::info!(count = world.entity_count(), "population spawned");
}
