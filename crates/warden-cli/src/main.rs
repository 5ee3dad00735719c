//! Warden CLI - drive the control plane from the command line.
//!
//! - `warden replay <scenario>` - feed scripted observations through the
//!   control plane and print what the executor would receive
//! - `warden check-config <file>` - validate a `warden.yaml`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use warden_kernel::{ControlConfig, ControlPlane, Observation};

mod behaviors;

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Per-tick control plane for real-time strategy agents", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted observation scenario
    Replay {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Control plane config (defaults when absent)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON status line per tick
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file and print the resolved settings
    CheckConfig {
        path: PathBuf,
    },
}

/// Scripted input for `warden replay`.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    name: Option<String>,
    observations: Vec<Observation>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            config,
            json,
        } => replay(&scenario, config.as_deref(), json),
        Commands::CheckConfig { path } => check_config(&path),
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario from {}", path.display()))
}

fn replay(scenario_path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let scenario = load_scenario(scenario_path)?;
    let config = match config_path {
        Some(path) => ControlConfig::load(path)?,
        None => ControlConfig::default(),
    };

    let mut plane = ControlPlane::new(config);
    behaviors::register_all(&mut plane).context("Failed to register behavior modules")?;

    tracing::info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        ticks = scenario.observations.len(),
        "Starting replay"
    );

    for observation in &scenario.observations {
        plane.tick(observation);
        let status = plane.status();

        for fault in &status.faults {
            tracing::warn!(task = %fault.task, kind = ?fault.kind, reason = %fault.reason, "fault during tick");
        }

        let requests = plane.drain_requests();
        for request in &requests {
            plane.report_submitted(request);
        }

        if json {
            println!("{}", status.to_json_line()?);
            continue;
        }

        println!("{}", status.summary());
        for request in &requests {
            println!(
                "  [p{}] {} x{} ({})",
                request.priority, request.resource, request.count, request.requester
            );
        }
    }

    if !json {
        println!();
        println!("Mode history:");
        for change in plane.mode_history() {
            println!(
                "  tick {} t={:.1}s {} -> {} ({})",
                change.tick, change.time, change.from, change.to, change.reason
            );
        }
    }

    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = ControlConfig::load(path)?;
    let rendered = serde_yaml::to_string(&config).context("Failed to render config")?;

    println!("{} is valid", path.display());
    println!();
    print!("{rendered}");
    Ok(())
}
