//! grid_commute — headless driver for the routing decision engine.
//!
//! A toy simulator moves vehicles across an embedded 3 x 3 street grid.  Every
//! tick it hands the unfinished vehicles to the decision engine, steers each
//! one toward its returned target, advances them at a fixed speed, and feeds
//! the new edge occupancy back through `InMemoryState`.  The per-tick mean
//! deadline is written to `<out>/deadline_series.csv`.
//!
//! ```text
//! RUST_LOG=debug cargo run -p grid_commute -- --vehicles 40 --strategy random
//! ```

mod network;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use tr_core::{EdgeId, SimClock, SimRng, Vehicle, streams};
use tr_decide::{
    DeadlineCongestionStrategy, EngineBuilder, EngineConfig, RandomStrategy, RoutingStrategy,
};
use tr_network::{CongestionDijkstra, InMemoryState, NetworkSnapshot, Pathfinder, RoadNetwork};
use tr_output::{CsvWriter, SinkOutput};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const STEP_SECS:     f64 = 1.0;
const SPEED_M_S:     f64 = 12.0; // ~43 km/h
const MIN_DEADLINE:  f64 = 60.0;
const MAX_DEADLINE:  f64 = 400.0;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Urgency-ordered, congestion-weighted shortest paths
    Deadline,
    /// Seeded random walk that homes in near the destination
    Random,
}

#[derive(Parser)]
#[command(name = "grid_commute")]
#[command(about = "Route commuters across a small street grid")]
struct Cli {
    /// Maximum number of ticks to simulate
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Number of vehicles injected at tick 0
    #[arg(long, default_value = "24")]
    vehicles: usize,

    /// Seed for trip generation and the random strategy
    #[arg(long, default_value = "42")]
    seed: u64,

    /// JSON file with engine settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for the diagnostics CSV files
    #[arg(long, default_value = "output/grid_commute")]
    out: PathBuf,

    /// Routing strategy
    #[arg(long, value_enum, default_value = "deadline")]
    strategy: StrategyKind,
}

// ── Toy simulator ─────────────────────────────────────────────────────────────

/// One vehicle as the toy simulator sees it.
struct Trip {
    vehicle:  Vehicle,
    /// Metres driven along `vehicle.current_edge`.
    progress: f64,
    /// Last target handed out by the engine.
    target:   EdgeId,
    arrived:  Option<f64>,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: EngineConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn make_trips(network: &RoadNetwork, count: usize, rng: &mut SimRng) -> Vec<Trip> {
    (0..count)
        .filter_map(|i| {
            let (origin, destination) = rng.distinct_pair(network.edge_count())?;
            let origin = EdgeId::try_from(origin).ok()?;
            let destination = EdgeId::try_from(destination).ok()?;
            let deadline = rng.gen_range(MIN_DEADLINE..MAX_DEADLINE);
            Some(Trip {
                vehicle:  Vehicle::new(format!("veh_{i}"), origin, destination, deadline)
                    .with_start_time(0.0),
                progress: 0.0,
                target:   origin,
                arrived:  None,
            })
        })
        .collect()
}

/// Drive one trip for a step.  The simulator follows free-flow shortest
/// paths toward the engine's target, the way a simulator re-routes after a
/// target change.
fn drive(trip: &mut Trip, network: &RoadNetwork, free_flow: &NetworkSnapshot<'_>, now: f64) {
    let mut budget = SPEED_M_S * STEP_SECS;
    loop {
        let edge = trip.vehicle.current_edge;
        let length = network.length(edge).unwrap_or(0.0);
        let left = length - trip.progress;
        if budget < left {
            trip.progress += budget;
            return;
        }
        if edge == trip.vehicle.destination {
            trip.progress = length;
            trip.arrived = Some(now);
            return;
        }
        if edge == trip.target {
            // Wait at the end of the target edge for a new decision.
            trip.progress = length;
            return;
        }
        let next = match CongestionDijkstra.find_route(free_flow, edge, trip.target) {
            Ok(route) => route.edges.first().copied(),
            Err(_) => None,
        };
        let Some(next) = next else {
            trip.progress = length;
            return;
        };
        budget -= left;
        trip.vehicle.current_edge = next;
        trip.progress = 0.0;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let network = build_network().context("loading embedded grid")?;
    info!("road network: {} edges", network.edge_count());

    let config = load_config(cli.config.as_deref())?;
    let strategy: Box<dyn RoutingStrategy> = match cli.strategy {
        StrategyKind::Deadline => Box::new(DeadlineCongestionStrategy::new(config)),
        StrategyKind::Random => Box::new(RandomStrategy::new(config, cli.seed)),
    };
    info!("strategy: {}", strategy.name());

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    let writer = CsvWriter::new(&cli.out)?;

    let state = InMemoryState::new(SimClock::new(0.0, STEP_SECS)?);
    let mut engine = EngineBuilder::new(strategy, state)
        .sink(SinkOutput::new(writer))
        .expected_ticks(cli.ticks as usize)
        .build()?;

    let mut rng = SimRng::stream(cli.seed, streams::TRIPS);
    let mut trips = make_trips(&network, cli.vehicles, &mut rng);
    for trip in &trips {
        engine.state_mut().enter(trip.vehicle.current_edge);
    }
    let free_flow = NetworkSnapshot::free_flow(&network);

    let t0 = Instant::now();
    let mut ticks_run = 0;
    for _ in 0..cli.ticks {
        let batch: Vec<Vehicle> = trips
            .iter()
            .filter(|t| t.arrived.is_none())
            .map(|t| t.vehicle.clone())
            .collect();
        if batch.is_empty() {
            break;
        }

        let targets = engine.make_decisions(&batch, &network)?;
        let now = engine.state().clock.time_secs();

        let state = engine.state_mut();
        state.advance();
        state.clear_counts();
        for trip in trips.iter_mut().filter(|t| t.arrived.is_none()) {
            if let Some(&target) = targets.get(&trip.vehicle.id) {
                trip.target = target;
            }
            drive(trip, &network, &free_flow, now + STEP_SECS);
            trip.vehicle.deadline -= STEP_SECS;
            if trip.arrived.is_none() {
                state.enter(trip.vehicle.current_edge);
            } else {
                debug!("{} arrived at t={:.0}s", trip.vehicle.id, now + STEP_SECS);
            }
        }
        ticks_run += 1;
    }
    let elapsed = t0.elapsed();

    engine.finish();
    if let Some(e) = engine.sink_mut().take_error() {
        eprintln!("output error: {e}");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    let arrived: Vec<&Trip> = trips.iter().filter(|t| t.arrived.is_some()).collect();
    let late = arrived.iter().filter(|t| t.vehicle.deadline < 0.0).count();
    println!("Simulated {ticks_run} ticks in {:.3} s", elapsed.as_secs_f64());
    println!("  arrived : {} / {}", arrived.len(), trips.len());
    println!("  late    : {late}");
    if let Some((t, mean)) = engine.history().last() {
        println!("  final mean deadline : {mean:.1} s at t={t:.0}s");
    }
    println!("  series  : {}", cli.out.join("deadline_series.csv").display());
    println!();

    println!("{:<8} {:<10} {:>9} {:>9}", "Vehicle", "Edge", "Slack", "Arrival");
    println!("{}", "-".repeat(40));
    for trip in &trips {
        let edge = network.edge_name(trip.vehicle.current_edge).unwrap_or("?");
        let arrival = trip.arrived.map(|t| format!("{t:.0}")).unwrap_or_else(|| "-".into());
        println!(
            "{:<8} {:<10} {:>9.1} {:>9}",
            trip.vehicle.id.as_str(), edge, trip.vehicle.deadline, arrival
        );
    }

    Ok(())
}
