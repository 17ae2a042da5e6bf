mod presenter;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wolfcast_common::EngineConfig;
use wolfcast_engine::{GameLoop, StopSignal};
use wolfcast_input::SharedInput;
use wolfcast_kernel::{Map, World};

use crate::presenter::WinitPresenter;

#[derive(Parser)]
#[command(name = "wolfcast-desktop", about = "Raycasting renderer in a desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON engine config; unspecified keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window scale relative to the render resolution
    #[arg(long)]
    scale: Option<f32>,

    /// Stop the player at walls instead of walking through them
    #[arg(long)]
    collide: bool,
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if cli.collide {
        config.collide_with_walls = true;
    }
    config.validate().context("invalid engine config")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("wolfcast-desktop starting");
    let config = load_config(&cli)?;

    let input = SharedInput::new();
    let stop = StopSignal::new();
    let presenter = WinitPresenter::new(&config, input.clone(), stop.clone())
        .context("failed to create event loop")?;

    let world = World::from_config(Map::level_one(), &config);
    let mut game = GameLoop::new(&config, world, input, presenter).with_stop_signal(stop);
    let stats = game.run().context("presentation failed")?;

    tracing::info!(
        ticks = stats.ticks,
        frames = stats.frames,
        "wolfcast-desktop exiting"
    );
    Ok(())
}
