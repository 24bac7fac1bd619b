use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{load_parameters, parse_point, run, RunConfig};
use flock_core::{Bounds, RuleParameters, DEFAULT_AGENT_SIZE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation", long_about = None)]
struct Args {
    /// Number of agents in the flock
    #[arg(short, long, default_value_t = 150)]
    agents: usize,

    /// World width; also picks the speed limit when no config file is given
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Agent draw size, used as the wraparound margin
    #[arg(long, default_value_t = DEFAULT_AGENT_SIZE)]
    margin: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    steps: u64,

    /// JSON file with rule parameters (camelCase keys, missing keys use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repulsor position as 'x,y'
    #[arg(short, long)]
    pointer: Option<String>,

    /// Log flock statistics every N steps (0 = only at the end)
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,

    /// Write the final flock state as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let params = match &args.config {
        Some(path) => load_parameters(path)?,
        None => RuleParameters::for_viewport_width(args.width),
    };
    log::debug!("Rule parameters: {:?}", params);

    let pointer = args
        .pointer
        .as_deref()
        .map(parse_point)
        .transpose()
        .context("Invalid --pointer")?;

    let config = RunConfig {
        agents: args.agents,
        bounds: Bounds::new(args.width, args.height).with_margin(args.margin),
        params,
        steps: args.steps,
        pointer,
        report_every: args.report_every,
        snapshot: args.snapshot,
    };

    run(&config).context("Simulation error")?;

    Ok(())
}
