#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Boulder Push session in the terminal.

mod config;
mod session;

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{bail, Context, Result};
use boulder_push_rendering::{FrameControl, Presentation, RenderingBackend};
use boulder_push_rendering_terminal::{spawn_input_pump, TerminalBackend};
use boulder_push_system_controller::LevelController;
use boulder_push_system_levels::load_level_set;
use boulder_push_world::query;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Args, Settings},
    session::{compose_scene, SessionStatus},
};

/// Entry point for the Boulder Push command-line interface.
fn main() -> Result<()> {
    let settings = Settings::resolve(Args::parse())?;
    init_logging(settings.log_file.as_deref())?;

    let levels = load_level_set(&settings.levels, &settings.format)
        .with_context(|| format!("failed to load levels from {}", settings.levels.display()))?;
    if levels.is_empty() {
        bail!("no levels found in {}", settings.levels.display());
    }
    tracing::info!(
        path = %settings.levels.display(),
        count = levels.len(),
        start_level = settings.start_level,
        "level set loaded"
    );

    let mut controller = LevelController::with_start_level(levels, settings.start_level);
    let mut status = SessionStatus::default();
    let mut events = Vec::new();
    controller.start(&mut events);
    status.observe(&events);

    if !controller.is_finished() {
        let banner = query::welcome_banner(controller.world());
        let presentation = Presentation::new(banner, compose_scene(&controller, &status));
        let backend = TerminalBackend::new(settings.tick, spawn_input_pump()?);

        backend.run(presentation, |frame, scene| {
            if let Some(input) = frame.input {
                events.clear();
                controller.handle(input, &mut events);
                status.observe(&events);
                *scene = compose_scene(&controller, &status);
            }

            if controller.is_finished() {
                FrameControl::Exit
            } else {
                FrameControl::Continue
            }
        })?;
    }

    println!("{}", status.farewell());
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
