//=========================================================================
// octane_demo
//
// Runs the built-in scripts against the reference native host.
//
// Headless by default: runs a fixed number of frames at the fixed step
// and logs the final transforms. `--window` opens a Winit preview window
// that feeds keyboard input to the scripts until it is closed.
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use octane_scripting::prelude::*;

/// Octane scripting host demo
#[derive(Parser, Debug)]
#[command(name = "octane_demo")]
#[command(about = "Runs behaviour scripts against the reference native host", long_about = None)]
struct Args {
    /// Path to a host configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open a preview window and run in real time
    #[arg(long)]
    window: bool,

    /// Frames to run when headless
    #[arg(short, long, default_value_t = 120)]
    frames: u64,
}

/// Entities used when no configuration file is given.
fn demo_config() -> HostConfig {
    let spawn = |id: u32, position: Vector2, scripts: &[&str]| EntitySpawn {
        id: Some(id),
        position,
        scripts: scripts.iter().map(|s| s.to_string()).collect(),
        ..EntitySpawn::default()
    };

    HostConfig {
        entities: vec![
            spawn(7, Vector2::ZERO, &["PlayerMovement"]),
            spawn(8, Vector2::new(-100.0, 0.0), &["AutoMoveX", "ClockWiseSpin"]),
            spawn(9, Vector2::new(0.0, 100.0), &["AutoMoveY", "AntiClockWiseSpin"]),
        ],
        ..HostConfig::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => HostConfig::load_or_default(path),
        None => demo_config(),
    };

    let mut host = HostBuilder::from_config(&config).build();
    if let Err(err) = host.spawn_all(&config) {
        error!("Failed to spawn configured entities: {}", err);
        return ExitCode::FAILURE;
    }

    if args.window {
        let frame = Duration::from_secs_f32(config.fixed_delta_time);
        return match host.run_windowed(frame) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{}", err);
                ExitCode::FAILURE
            }
        };
    }

    let ran = host.run_frames(args.frames, config.fixed_delta_time);
    info!("Ran {} frames", ran);

    for id in host.world().entity_ids() {
        if let Some(entity) = host.world().entity(id) {
            info!(
                "{}: position ({}, {}), rotation {}, scale {}",
                id, entity.position.x, entity.position.y, entity.rotation, entity.scale
            );
        }
    }

    host.shutdown();
    ExitCode::SUCCESS
}
