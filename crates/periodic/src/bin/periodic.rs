//! # PERIODIC Headless Runner
//!
//! Loads records, then walks the cards through every layout, driving frames
//! on a simulated clock until each transition settles.
//!
//! ```text
//! periodic <records.json> [config.toml]
//! RUST_LOG=periodic=debug periodic data/records.json data/periodic.toml
//! ```

use std::process::ExitCode;

use periodic::{Bounds, Engine, EngineConfig, FrameDriver, JsonFileSource, LayoutName, TraceSink, Viewport};
use tracing_subscriber::EnvFilter;

/// Frames allowed per layout before giving up (a minute at 60 Hz).
const MAX_FRAMES_PER_LAYOUT: u64 = 3600;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(records_path) = args.next() else {
        eprintln!("usage: periodic <records.json> [config.toml]");
        return ExitCode::from(2);
    };

    let config = match args.next() {
        Some(path) => match EngineConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%err, "could not load config");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let mut driver = FrameDriver::from_config(&config);
    let mut engine = match Engine::new(config, Box::new(TraceSink::new())) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!(%err, "invalid config");
            return ExitCode::FAILURE;
        }
    };

    engine.resize(Viewport::new(1920, 1080));
    engine.load(&mut JsonFileSource::new(records_path));
    if !engine.is_ready() {
        return ExitCode::FAILURE;
    }

    let initial = engine.config().initial_layout;
    if !settle(&mut engine, &mut driver, initial) {
        return ExitCode::FAILURE;
    }

    for name in LayoutName::ALL {
        if engine.trigger(name).is_none() || !settle(&mut engine, &mut driver, name) {
            return ExitCode::FAILURE;
        }
    }

    let stats = driver.stats();
    tracing::info!(
        frames = stats.frames,
        rendered = stats.rendered_frames,
        completed_tasks = stats.completed_tasks,
        clock_ms = driver.clock_ms(),
        "run complete"
    );
    ExitCode::SUCCESS
}

/// Drives frames until idle and logs where the cards ended up.
fn settle(engine: &mut Engine, driver: &mut FrameDriver, name: LayoutName) -> bool {
    let outcome = driver.run_until_idle(engine, MAX_FRAMES_PER_LAYOUT);
    if !outcome.settled {
        tracing::error!(layout = %name, frames = outcome.frames, "layout did not settle");
        return false;
    }

    match Bounds::of(engine.transforms()) {
        Some(bounds) => {
            let size = bounds.size();
            tracing::info!(
                layout = %name,
                frames = outcome.frames,
                width = size.x,
                height = size.y,
                depth = size.z,
                "layout settled"
            );
        }
        None => tracing::info!(layout = %name, frames = outcome.frames, "layout settled with no cards"),
    }
    true
}
