//! Fleet Order Core - scenario runner
//!
//! Lays out a seeded fleet, runs the core tick for a number of ticks and
//! prints a summary (text or JSON).

use std::path::PathBuf;

use clap::Parser;
use fleet_order_core::core::config::CoreConfig;
use fleet_order_core::core::error::Result;
use fleet_order_core::simulation::{Scenario, ScenarioParams, ScenarioSummary};

/// Run a seeded fleet scenario through the order execution core
#[derive(Parser, Debug)]
#[command(name = "fleet-order-core")]
#[command(about = "Run a deterministic fleet scenario and report what the order rules did")]
struct Args {
    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Random seed for the fleet layout and upstream inputs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding core config defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of carriers
    #[arg(long, default_value_t = 2)]
    carriers: usize,

    /// Number of stranded vessels, each with a tug
    #[arg(long, default_value_t = 2)]
    stranded: usize,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_order_core=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let params = ScenarioParams {
        carriers: args.carriers,
        stranded_vessels: args.stranded,
        ..ScenarioParams::default()
    };

    tracing::info!("Running {} ticks with seed {}", args.ticks, seed);
    let mut scenario = Scenario::new(config, params, seed);
    let summary = scenario.run(args.ticks)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &ScenarioSummary) {
    let totals = &summary.totals;
    println!("=== FLEET ORDER CORE ===");
    println!("Seed: {}  Final tick: {}  Entities: {}", summary.seed, summary.final_tick, summary.entities);
    println!();
    println!("Recorded ticks:      {}", totals.recorded_ticks);
    println!("Scaffolded records:  {}", totals.scaffolded);
    println!(
        "Candidates drained:  {} ({} intents committed)",
        totals.candidates_drained, totals.intents_committed
    );
    println!("Escorts released:    {}", totals.escorts_released);
    println!("Drone mappings:      {}", totals.drones_mapped);
    println!(
        "Rescue checks:       {} valid, {} removed",
        totals.rescues_valid, totals.rescues_removed
    );
    println!("Docking requests:    {}", totals.docking_requested);
    println!(
        "Action events:       {} emitted, {} dropped",
        totals.events_emitted, totals.events_dropped
    );
    println!();
    println!(
        "Live records: {} intents, {} docking requests, {} rescue requests, {} logged events",
        summary.order_intents, summary.docking_requests, summary.open_rescue_requests, summary.logged_events
    );
}
