use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wolfcast_common::{EngineConfig, Player};
use wolfcast_engine::{FixedStepClock, GameLoop, HeadlessPresenter, StopSignal};
use wolfcast_input::{Action, SharedInput};
use wolfcast_kernel::{Map, World};
use wolfcast_render::{DebugTextRenderer, RayCaster, Renderer};

#[derive(Parser)]
#[command(name = "wolfcast-cli", about = "Headless tooling for the wolfcast raycaster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON engine config; unspecified keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the active configuration
    Info,
    /// Render a single view of the built-in level as ASCII
    Frame {
        #[arg(long, default_value = "3.0")]
        x: f32,
        #[arg(long, default_value = "3.0")]
        y: f32,
        /// Facing angle in radians
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        angle: f32,
        #[arg(long, default_value = "80")]
        columns: usize,
        #[arg(long, default_value = "24")]
        rows: usize,
    },
    /// Run the fixed-step loop headless with keys held, then print the result
    Run {
        /// Number of fixed ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        #[arg(long)]
        forward: bool,
        #[arg(long)]
        turn_left: bool,
        #[arg(long)]
        turn_right: bool,
        /// Stop the player at walls
        #[arg(long)]
        collide: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("wolfcast-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", wolfcast_common::crate_info());
            println!("input: {}", wolfcast_input::crate_info());
            println!("kernel: {}", wolfcast_kernel::crate_info());
            println!("render: {}", wolfcast_render::crate_info());
            println!("engine: {}", wolfcast_engine::crate_info());
            println!(
                "render: {}x{} @ x{}, fov {} deg, step {}, max distance {}",
                config.render_width,
                config.render_height,
                config.scale,
                config.fov_degrees,
                config.step_size,
                config.max_distance
            );
            println!("tick rate: {} Hz", config.tick_rate);
        }
        Commands::Frame {
            x,
            y,
            angle,
            columns,
            rows,
        } => {
            anyhow::ensure!(columns > 0 && rows > 0, "columns and rows must be non-zero");
            let world = World::new(Map::level_one(), Player::new(x, y, angle));
            let mut renderer = DebugTextRenderer::new(RayCaster::from_config(&config), columns, rows);
            print!("{}", renderer.render(&world));
        }
        Commands::Run {
            ticks,
            forward,
            turn_left,
            turn_right,
            collide,
        } => {
            let config = EngineConfig {
                collide_with_walls: config.collide_with_walls || collide,
                ..config
            };
            let input = SharedInput::new();
            for (held, action) in [
                (forward, Action::MoveForward),
                (turn_left, Action::TurnLeft),
                (turn_right, Action::TurnRight),
            ] {
                if held {
                    input.press(action);
                }
            }

            // One fixed step per iteration, so one presented frame per tick.
            let stop = StopSignal::new();
            if ticks == 0 {
                stop.raise();
            }
            let world = World::from_config(Map::level_one(), &config);
            let mut game = GameLoop::with_clock(
                &config,
                world,
                input,
                HeadlessPresenter::new().stopping_after(ticks, stop.clone()),
                FixedStepClock::new(config.frame_cap()),
            )
            .with_stop_signal(stop);
            let stats = game.run().context("headless run failed")?;

            let player = game.world().player();
            println!(
                "ticks={} frames={} pos=({:.4}, {:.4}) angle={:.4}",
                stats.ticks, stats.frames, player.position.x, player.position.y, player.angle
            );
        }
    }

    Ok(())
}
