//! Headless driver for the lifegrid automaton.

mod driver;
mod render;
mod telemetry;

use anyhow::{bail, Result};
use clap::Parser;
use lifegrid_core::{EdgePolicy, Position, RuleConfig, RunnerConfig, Topology};
use lifegrid_world::{pattern, Automaton};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

/// Run a birth/survival cellular automaton without a display.
#[derive(Parser, Debug)]
#[command(name = "lifegrid", about = "Run a cellular automaton headlessly")]
struct Args {
    /// JSON configuration file; defaults are used for anything missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many generations.
    #[arg(long)]
    generations: Option<u64>,

    /// Random seed for the initial grid.
    #[arg(long)]
    seed: Option<u64>,

    /// Cell sides: 3, 4 or 6. Other values fall back to 4.
    #[arg(long)]
    sides: Option<u8>,

    /// Birth threshold (exact neighbor count).
    #[arg(long)]
    birth: Option<u8>,

    /// Survival threshold (exact neighbor count).
    #[arg(long)]
    survival: Option<u8>,

    /// Treat cells beyond the edges as dead instead of wrapping.
    #[arg(long)]
    bounded: bool,

    /// Initial live-cell density for randomizing.
    #[arg(long)]
    density: Option<f32>,

    /// Stamp this built-in pattern at the center instead of randomizing.
    #[arg(long)]
    pattern: Option<String>,

    /// Generations per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Write the final generation as a PNG image, drawn in the grid's cell shapes.
    #[arg(long)]
    capture: Option<PathBuf>,

    /// Pixels per cell in the capture.
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// Print the final generation as text.
    #[arg(long)]
    print: bool,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied, not yet validated
    fn load_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)?,
            None => RunnerConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut RunnerConfig) {
        let automaton = &mut config.automaton;
        if let Some(seed) = self.seed {
            automaton.seed = Some(seed);
        }
        if let Some(sides) = self.sides {
            automaton.topology = Topology::from_sides(sides);
        }
        let rules = automaton.rules;
        automaton.rules = RuleConfig::new(
            self.birth.unwrap_or(rules.birth),
            self.survival.unwrap_or(rules.survival),
        );
        if self.bounded {
            automaton.edge_policy = EdgePolicy::Bounded;
        }
        if let Some(density) = self.density {
            automaton.density = density;
        }
        if let Some(fps) = self.fps {
            config.driver.fps = fps;
        }
        if self.generations.is_some() {
            config.driver.max_generations = self.generations;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = args.load_config()?;

    telemetry::init_telemetry(config.driver.json_logs)?;
    config.validate()?;

    let mut automaton = Automaton::new(config.automaton.clone());
    let (rows, cols) = automaton.dimensions();
    info!(rows, cols, rules = ?config.automaton.rules, "Starting lifegrid");

    match &args.pattern {
        Some(name) => {
            let Some(pattern) = pattern::by_name(name) else {
                bail!("unknown pattern {:?}", name);
            };
            let origin = Position::new(
                (cols - pattern.width() as i32) / 2,
                (rows - pattern.height() as i32) / 2,
            );
            let revived = automaton.stamp_pattern(origin, pattern);
            info!(pattern = pattern.name, revived, "Stamped pattern");
        }
        None => automaton.randomize_default(),
    }

    let reason = driver::run_loop(&mut automaton, &config.driver, shutdown_signal()).await;
    let summary = automaton.summary();
    info!(reason = ?reason, "Driver stopped");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.print {
        print!("{}", render::to_text(automaton.grid()));
    }
    if let Some(path) = &args.capture {
        render::save_capture(automaton.grid(), config.automaton.topology, path, args.scale)?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
