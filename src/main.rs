//! Parkour - headless traversal demo
//!
//! Runs a scripted input timeline through the parkour movement core on a small
//! rapier course and logs every mode change and feedback event.
//!
//! Usage: `parkour [--write-defaults] [settings.toml]`

mod course;
mod settings;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use parkour_core::GameTime;
use parkour_movement::{CameraShake, InputState, MovementMode, PlayerController};
use parkour_physics::PhysicsWorld;

use course::Script;
use settings::Settings;

/// Extra simulated time after the last scripted input
const SETTLE_TIME: f32 = 1.5;

/// Simple command-line parsing
struct Args {
    write_defaults: bool,
    settings: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = Args {
            write_defaults: false,
            settings: None,
        };
        for arg in std::env::args().skip(1) {
            if arg == "--write-defaults" {
                args.write_defaults = true;
            } else {
                args.settings = Some(PathBuf::from(arg));
            }
        }
        args
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting parkour demo...");

    let args = Args::parse();
    if args.write_defaults {
        let path = Settings::default().save()?;
        info!("Wrote default settings to {:?}", path);
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    let mut physics = PhysicsWorld::with_config(settings.physics.clone());
    course::build(&mut physics);

    let mut player = PlayerController::spawn(
        &mut physics,
        course::START,
        settings.character.clone(),
        settings.camera.clone(),
        settings.traversal.clone(),
    );

    let mut time = GameTime::new(settings.time.clone());
    let dt = time.fixed_timestep();
    if dt <= 0.0 {
        anyhow::bail!("Fixed timestep must be positive, got {}", dt);
    }

    let mut script = Script::new(course::default_script());
    let run_time = script.duration() + SETTLE_TIME;
    let mut input = InputState::new();

    let mut mode = player.mode();
    let mut mode_ticks: HashMap<MovementMode, u32> = HashMap::new();
    let mut event_count = 0;

    while (time.total_time as f32) < run_time {
        time.update(dt);

        for _ in 0..time.fixed_steps() {
            let elapsed = time.tick_count as f32 * dt;
            script.apply(elapsed, &mut input);

            physics.step();
            let events = player.fixed_update(&mut physics, &input, dt);
            input.clear_frame();

            if player.mode() != mode {
                info!(
                    time = format_args!("{:.2}", elapsed),
                    from = ?mode,
                    to = ?player.mode(),
                    position = ?player.position(),
                    "mode change"
                );
                mode = player.mode();
            }
            *mode_ticks.entry(mode).or_default() += 1;

            for event in events {
                event_count += 1;
                info!(
                    time = format_args!("{:.2}", elapsed),
                    ?event,
                    shake = ?CameraShake::for_event(event),
                    "feedback"
                );
            }
        }
    }

    if !script.is_finished() {
        warn!("Run ended before the script finished");
    }

    let mut modes: Vec<_> = mode_ticks.into_iter().collect();
    modes.sort_by(|a, b| b.1.cmp(&a.1));
    for (mode, ticks) in modes {
        info!("{:?}: {:.2}s", mode, ticks as f32 * dt);
    }
    info!(
        ticks = time.tick_count,
        events = event_count,
        position = ?player.position(),
        "Run complete"
    );

    Ok(())
}
