//! Catode - Headless Runner
//!
//! Runs a creature for a stretch of simulated time, optionally applying
//! scheduled player actions, and prints the behavior timeline.

use catode::core::config::{config, load_profile, set_config, CreatureProfile};
use catode::core::error::Result;
use catode::simulation::creature::{BehaviorEvent, Creature};
use catode::simulation::tick::{run_headless, RunSummary, ScheduledAction};
use clap::Parser;
use std::path::PathBuf;

/// Headless Catode Runner - watch a cat live its life
#[derive(Parser, Debug)]
#[command(name = "catode")]
#[command(about = "Run the companion cat behavior engine without a screen")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,

    /// Override the profile's frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Creature profile (TOML with [engine] and [stats] tables)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Player action at a time, e.g. `30:meal:chicken` (repeatable)
    #[arg(long = "act", value_name = "SECS:ACTION")]
    actions: Vec<ScheduledAction>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log behavior transitions
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct RunOutput<'a> {
    seed: u64,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "catode=debug" } else { "catode=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut profile = match &args.profile {
        Some(path) => load_profile(path)?,
        None => CreatureProfile::default(),
    };
    if let Some(fps) = args.fps {
        profile.engine.frames_per_second = fps;
        profile.engine.validate()?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, seconds = args.seconds, "starting run");

    let stats = profile.initial_stats()?;
    if set_config(profile.engine).is_err() {
        tracing::warn!("engine config already set, keeping it");
    }
    let mut creature = Creature::with_stats(stats, config().clone(), seed);
    let summary = run_headless(&mut creature, args.seconds, &args.actions);

    match args.format.as_str() {
        "text" => print_text(seed, &summary),
        other => {
            if other != "json" {
                tracing::warn!(format = other, "unknown format, using json");
            }
            let output = RunOutput { seed, summary: &summary };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_text(seed: u64, summary: &RunSummary) {
    println!("=== Catode run (seed {}) ===", seed);
    println!("{:.1}s over {} frames", summary.seconds, summary.frames);
    println!();

    for entry in &summary.timeline {
        let line = match entry.event {
            BehaviorEvent::Started { kind } => format!("start     {}", kind),
            BehaviorEvent::PhaseChanged { kind, phase } => format!("  phase   {} -> {}", kind, phase),
            BehaviorEvent::Finished {
                kind,
                completed,
                progress,
            } => {
                let how = if completed { "finished" } else { "interrupted" };
                format!("{:<9} {} (progress {:.2})", how, kind, progress)
            }
            BehaviorEvent::Chained { from, to } => format!("chain     {} -> {}", from, to),
        };
        println!("[{:>7.2}] {}", entry.time, line);
    }

    println!();
    match summary.final_behavior {
        Some(kind) => println!("Now: {} ({})", kind, summary.final_pose),
        None => println!("Now: nothing ({})", summary.final_pose),
    }
    println!("Stats:");
    for (stat, value) in summary.final_stats.iter() {
        println!("  {:<16} {:>6.1}", stat.as_str(), value);
    }
}
