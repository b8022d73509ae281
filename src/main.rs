//! Headless collision driver.
//!
//! Loads a JSON scene and an optional INI config, runs a fixed number of ticks
//! and logs where every body ended up.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scene assets/scenes/arena.json --frames 600
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use collision_sat::components::collider::Collider;
use collision_sat::components::groundsensor::GroundSensor;
use collision_sat::components::rigidbody::RigidBody;
use collision_sat::error::CollisionError;
use collision_sat::resources::collisionconfig::CollisionConfig;
use collision_sat::resources::collisionmode::CollisionMode;
use collision_sat::resources::contacts::ContactNormals;
use collision_sat::resources::worldtime::WorldTime;
use collision_sat::scene::{SceneHandles, load_scene, spawn_scene};
use collision_sat::systems::hierarchy::global_position;
use collision_sat::systems::step::{set_collision_mode, setup_world, step};

/// Headless 2D collision simulation
#[derive(Parser)]
#[command(version, about = "Runs a collision scene without a window and logs the result.")]
struct Cli {
    /// Scene description (JSON).
    #[arg(long, value_name = "PATH", default_value = "assets/scenes/arena.json")]
    scene: PathBuf,

    /// Collision tuning (INI). Defaults are used when absent.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Polygon–polygon resolver: `sat` or `diags`. Overrides config and scene.
    #[arg(long)]
    mode: Option<CollisionMode>,
}

fn load_config(path: Option<PathBuf>) -> Result<CollisionConfig, CollisionError> {
    let Some(path) = path else {
        return Ok(CollisionConfig::new());
    };
    let mut config = CollisionConfig::with_path(path);
    config.load_from_file()?;
    Ok(config)
}

fn log_summary(world: &mut World, handles: &SceneHandles) {
    let threshold = world.resource::<CollisionConfig>().ground_threshold;
    let mut names: Vec<(&String, &Entity)> = handles.iter().collect();
    names.sort();

    for (name, &entity) in names {
        let Some(body) = world.get::<RigidBody>(entity).cloned() else {
            continue;
        };
        let position = global_position(world, entity).unwrap_or_default();
        let colliding = handles
            .values()
            .filter_map(|&e| world.get::<Collider>(e))
            .any(|c| c.is_colliding && c.is_owned_by(entity));
        info!(
            "{name}: position {position}, velocity {}, colliding {colliding}",
            body.velocity
        );
        if world.get::<GroundSensor>(entity).is_some() {
            let contacts = world.resource::<ContactNormals>();
            info!(
                "{name}: ground {}, ceiling {}",
                contacts.is_touching_ground(entity, threshold),
                contacts.is_touching_ceiling(entity, threshold)
            );
        }
    }
}

fn run(cli: Cli) -> Result<(), CollisionError> {
    let config = load_config(cli.config)?;
    let scene = load_scene(&cli.scene)?;

    let mut world = setup_world(config);
    let handles = spawn_scene(&mut world, &scene)?;
    if let Some(mode) = cli.mode {
        set_collision_mode(&mut world, mode);
    }
    info!(
        "Running {} ticks of {}s in {} mode",
        cli.frames,
        cli.dt,
        world.resource::<CollisionMode>()
    );

    let mut pair_hits = 0;
    for _ in 0..cli.frames {
        pair_hits += step(&mut world, cli.dt).pair_hits;
    }
    if pair_hits == 0 {
        warn!("no collisions happened during the run");
    }

    let time = world.resource::<WorldTime>();
    info!(
        "Finished {} frames ({:.2}s simulated), {pair_hits} pair hits",
        time.frame_count, time.elapsed
    );
    log_summary(&mut world, &handles);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
