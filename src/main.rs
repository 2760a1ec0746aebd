//! Headless runner: builds a world from a configuration file and steps it
//! with recorded frame inputs, logging how the run ends.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grovefire::{
    init_logging, FrameInput, FrameStatus, Millis, PresentationQueue, Simulation, WorldConfig,
};
use log::{debug, info};

/// Runs the shooter simulation headless and reports how the run ended.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// World configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the world seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3_600)]
    frames: u64,
    /// Milliseconds between frames
    #[arg(long, default_value_t = 16)]
    frame_ms: Millis,
    /// JSON array of per-frame inputs; later frames repeat the last entry
    #[arg(short, long)]
    inputs: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<WorldConfig> {
    let mut config = args.config.as_ref().map_or_else(
        || Ok(WorldConfig::default()),
        |path| {
            WorldConfig::from_json_file(path)
                .with_context(|| format!("loading world config {}", path.display()))
        },
    )?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn load_inputs(args: &Args) -> Result<Vec<FrameInput>> {
    let Some(path) = &args.inputs else {
        return Ok(Vec::new());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading inputs {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing inputs {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let inputs = load_inputs(&args)?;
    let idle = FrameInput::default();

    let mut queue = PresentationQueue::default();
    let mut simulation = Simulation::new(&config, 0);
    simulation.populate_scene(&mut queue);
    debug!("initial scene: {} presentation events", queue.drain().count());

    let mut frame_index = 0_usize;
    for frame in 1..=args.frames {
        let now = frame.saturating_mul(args.frame_ms);
        let input = inputs
            .get(frame_index)
            .or_else(|| inputs.last())
            .unwrap_or(&idle);
        frame_index += 1;
        let status = simulation.step(now, input, &mut queue);
        queue.drain().for_each(drop);
        if status == FrameStatus::RestartDue {
            break;
        }
    }

    let player = simulation.player();
    let gold = simulation.gold();
    match simulation.latch().outcome() {
        Some(outcome) => info!("run over after {} frames: {}", simulation.frame(), outcome.message()),
        None => info!("still running after {} frames", simulation.frame()),
    }
    info!(
        "health {}, gold {}/{}, weapon {}, enemies left {}",
        player.health,
        gold.collected,
        gold.target,
        player.weapon,
        simulation.enemies().len()
    );
    Ok(())
}
