//! `tracking-step` harness: load a tracking module configuration, preview
//! or validate it, and optionally run the produced jobs. A module test
//! loop, not an installer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use tracking_step::logging;
use tracking_step::named_enum::tracking_names;
use tracking_step::{ConfigMap, TrackingPage, TrackingType, TrackingViewStep, ViewStep};

#[derive(Parser)]
#[command(name = "tracking-step")]
#[command(about = "Feedback/tracking consent step harness")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the step summary and job plan for a configuration
    Preview {
        /// Module configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the consent level (none, install, machine, user)
        #[arg(short, long)]
        level: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that a configuration file decodes
    Validate {
        /// Module configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Build the job list and run it sequentially
    Run {
        /// Module configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the consent level (none, install, machine, user)
        #[arg(short, long)]
        level: Option<String>,
    },
}

#[derive(Serialize)]
struct StepSummary {
    name: String,
    level: String,
    offered_levels: Vec<String>,
    install_enabled: bool,
    machine_enabled: bool,
    user_enabled: bool,
    jobs: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug)?;

    match cli.command {
        Commands::Preview {
            config,
            level,
            json,
        } => cmd_preview(&config, level.as_deref(), json),
        Commands::Validate { config } => cmd_validate(&config),
        Commands::Run { config, level } => cmd_run(&config, level.as_deref()),
    }
}

/// Load a configuration file and hand it to a fresh step, the way the host
/// would after decoding the module's configuration.
fn load_step(path: &Path) -> Result<TrackingViewStep> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let map: ConfigMap = serde_yaml::from_str(&contents)
        .with_context(|| format!("Config file is not a YAML mapping: {}", path.display()))?;

    let mut step = TrackingViewStep::new();
    step.set_configuration_map(&map);
    Ok(step)
}

fn resolve_level(token: &str) -> Result<TrackingType> {
    tracking_names().find(token).ok_or_else(|| {
        let known: Vec<&str> = tracking_names().tokens().collect();
        anyhow::anyhow!(
            "Unknown tracking level '{}' (known levels: {})",
            token,
            known.join(", ")
        )
    })
}

fn level_token(level: TrackingType) -> String {
    tracking_names().name_of(level).unwrap_or("?").to_string()
}

fn summarize(step: &TrackingViewStep) -> StepSummary {
    StepSummary {
        name: step.pretty_name(),
        level: level_token(step.page().tracking_level()),
        offered_levels: TrackingPage::offered_levels(step.config())
            .into_iter()
            .map(level_token)
            .collect(),
        install_enabled: step.config().install_tracking().is_enabled(),
        machine_enabled: step.config().machine_tracking().is_enabled(),
        user_enabled: step.config().user_tracking().is_enabled(),
        jobs: step.jobs().iter().map(|j| j.pretty_name()).collect(),
    }
}

fn cmd_preview(config: &Path, level: Option<&str>, json: bool) -> Result<()> {
    let mut step = load_step(config)?;
    if let Some(token) = level {
        step.select_level(resolve_level(token)?);
    }

    let summary = summarize(&step);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Step: {}", summary.name);
    println!("Consent level: {}", summary.level);
    println!("Offered levels: {}", summary.offered_levels.join(", "));
    println!(
        "Consent: install={} machine={} user={}",
        summary.install_enabled, summary.machine_enabled, summary.user_enabled
    );
    if summary.jobs.is_empty() {
        println!("Job plan: (none)");
    } else {
        println!("Job plan:");
        for (i, name) in summary.jobs.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }
    }
    Ok(())
}

fn cmd_validate(config: &Path) -> Result<()> {
    let step = load_step(config)?;
    let offered = TrackingPage::offered_levels(step.config());
    println!(
        "{}: ok ({} levels offered)",
        config.display(),
        offered.len()
    );
    Ok(())
}

fn cmd_run(config: &Path, level: Option<&str>) -> Result<()> {
    let mut step = load_step(config)?;
    if let Some(token) = level {
        step.select_level(resolve_level(token)?);
    }

    step.on_leave();
    let jobs = step.jobs();
    if jobs.is_empty() {
        println!("No tracking jobs to run");
        return Ok(());
    }

    for job in &jobs {
        let name = job.pretty_name();
        tracing::info!(job = %name, "Running job");
        if let Err(e) = job.run() {
            bail!("Job '{}' failed: {}", name, e);
        }
        tracing::info!(job = %name, "Job finished");
    }
    println!("Ran {} job(s)", jobs.len());
    Ok(())
}
