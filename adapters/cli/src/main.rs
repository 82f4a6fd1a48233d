#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots KaToRga.

mod scene;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use katorga_core::{Rules, TICKS_PER_SECOND, WINDOW_TITLE};
use katorga_rendering::{Color, FrameInput, Presentation, RenderingBackend, Scene};
use katorga_rendering_macroquad::MacroquadBackend;
use katorga_simulation::{Simulation, TickClock};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::session::Session;

/// Collect coins, dodge monsters.
#[derive(Debug, Parser)]
#[command(name = "katorga", version)]
struct Args {
    /// Seed for monster placement, coin spawning and monster turns. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Sprite manifest mapping Player, Monster and Coin to image files.
    #[arg(long, default_value_os_t = MacroquadBackend::default_manifest_path())]
    manifest: PathBuf,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the KaToRga command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rules = Rules::default();
    log::info!("starting {WINDOW_TITLE} with seed {seed}");
    log::debug!("rules: {rules:?}");

    let arena = Vec2::new(rules.window.width() as f32, rules.window.height() as f32);
    let scene = Scene::new(arena).context("failed to describe the arena")?;
    let presentation = Presentation::new(WINDOW_TITLE, Color::WHITE, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_manifest(args.manifest);

    let result = backend.run(presentation, move |sizes| {
        let simulation = Simulation::new(rules, sizes, ChaCha8Rng::seed_from_u64(seed))
            .context("sprite sizes are incompatible with the game rules")?;
        let clock = TickClock::new(TICKS_PER_SECOND, TickClock::DEFAULT_MAX_TICKS_PER_FRAME);
        let mut session = Session::new(simulation, clock);
        Ok(move |dt: Duration, input: FrameInput, scene: &mut Scene| {
            session.frame(dt, input, scene);
        })
    });

    if let Err(error) = &result {
        log::error!("{error:#}");
    }
    result
}
