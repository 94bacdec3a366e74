//! Observability operator CLI
//!
//! Runs the health checks or assembles the dashboard once and prints JSON.

#![allow(missing_docs)]

use anyhow::Context;
use blipee_observability::utils::logging::init_tracing;
use blipee_observability::{HealthStatus, LogNotifier, MonitoringSystem, ObservabilityConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

/// Inspect the observability core from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file; `OBSERVABILITY_*` variables override it
    #[arg(long, short, env = "OBSERVABILITY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run health checks and print the summary
    Health {
        /// Run only this check
        #[arg(long)]
        check: Option<String>,
    },
    /// Print the dashboard view
    Dashboard,
    /// Print the effective configuration as YAML
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref()).await?;
    init_tracing(&config.logging);
    debug!(?config, "Effective configuration");

    if let Command::Config = args.command {
        print!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let system = MonitoringSystem::new(config, Arc::new(LogNotifier::default()));

    let status = match args.command {
        Command::Health { check: Some(name) } => {
            let result = system.health().run(&name).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            result.status
        }
        Command::Health { check: None } => {
            let summary = system.get_system_health().await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            summary.status
        }
        Command::Dashboard => {
            let dashboard = system.get_dashboard().await;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            dashboard
                .health_checks
                .iter()
                .map(|c| c.status)
                .max()
                .unwrap_or_default()
        }
        Command::Config => HealthStatus::Healthy,
    };

    Ok(if status == HealthStatus::Unhealthy {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ObservabilityConfig> {
    let config = ObservabilityConfig::load(path).await;
    match path {
        Some(path) => config.with_context(|| format!("failed to load {}", path.display())),
        None => config.context("invalid environment configuration"),
    }
}
