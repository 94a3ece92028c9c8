//! tdroute — signal-aware routing demo.
//!
//! Builds a synthetic grid (or loads an OSM extract with `--features osm`),
//! signalises every junction at random, and routes between two nodes,
//! printing what a driver would meet at each node along the way.
//!
//! ```text
//! cargo run --release -p tdroute-grid -- --rows 20 --cols 20 --per-path
//! cargo run --release -p tdroute-grid -- --from-pos 35.15,126.84 --to-pos 35.19,126.89 --csv route.csv
//! RUST_LOG=td_search=debug cargo run -p tdroute-grid
//! ```

mod config;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use td_core::{GeoPoint, NodeId, SimRng};
use td_network::{RoadGraph, RoadNetwork, build_grid};
use td_search::{ClockModel, PathFinder, RouteQuery};
use td_signal::SignalTable;

use config::DemoConfig;
use report::{print_route, route_rows, write_csv};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tdroute")]
#[command(about = "Time-dependent shortest paths through signalised junctions", long_about = None)]
struct Cli {
    /// TOML run configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    cols: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Start node id [default: first node]
    #[arg(long, conflicts_with = "from_pos")]
    from: Option<u32>,

    /// Goal node id [default: last node]
    #[arg(long, conflicts_with = "to_pos")]
    to: Option<u32>,

    /// Start position as LAT,LON, snapped to the nearest node
    #[arg(long, value_parser = parse_point)]
    from_pos: Option<GeoPoint>,

    /// Goal position as LAT,LON, snapped to the nearest node
    #[arg(long, value_parser = parse_point)]
    to_pos: Option<GeoPoint>,

    /// Departure time in seconds on the signal clock
    #[arg(long)]
    start_time: Option<f64>,

    /// Price signals at per-path arrival time instead of the shared clock
    #[arg(long)]
    per_path: bool,

    #[arg(long)]
    max_expansions: Option<usize>,

    /// Also run this many random queries as one parallel batch
    #[arg(long, default_value_t = 0)]
    batch: usize,

    /// Write the route table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Route over an OSM PBF extract instead of a grid
    #[cfg(feature = "osm")]
    #[arg(long)]
    osm: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn apply(&self, config: &mut DemoConfig) {
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(t) = self.start_time {
            config.start_time = t;
        }
        if self.per_path {
            config.search.clock_model = ClockModel::PerPath;
        }
        if self.max_expansions.is_some() {
            config.search.max_expansions = self.max_expansions;
        }
    }
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s.split_once(',').ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "osm")]
fn load_network(cli: &Cli, config: &DemoConfig) -> Result<RoadNetwork> {
    match &cli.osm {
        Some(path) => td_network::osm::load_from_pbf(path, None)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(build_grid(&config.grid)?),
    }
}

#[cfg(not(feature = "osm"))]
fn load_network(_cli: &Cli, config: &DemoConfig) -> Result<RoadNetwork> {
    Ok(build_grid(&config.grid)?)
}

fn resolve_endpoint(
    network: &RoadNetwork,
    id: Option<u32>,
    pos: Option<GeoPoint>,
    fallback: NodeId,
) -> Result<NodeId> {
    let node = match (id, pos) {
        (Some(id), _) => NodeId(id),
        (None, Some(pos)) => network.snap_to_node(pos).context("network has no nodes")?,
        (None, None) => fallback,
    };
    if !network.has_node(node) {
        bail!("{node} is not in the network ({} nodes)", network.node_count());
    }
    Ok(node)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    cli.apply(&mut config);

    // 1. Road network.
    let t0 = Instant::now();
    let network = load_network(&cli, &config)?;
    if network.is_empty() {
        bail!("network has no nodes");
    }
    if let Some(b) = network.bounds() {
        info!(
            "network: {} nodes, {} edges, lat {:.4}..{:.4}, lon {:.4}..{:.4} ({:.1?})",
            network.node_count(),
            network.edge_count(),
            b.min_lat,
            b.max_lat,
            b.min_lon,
            b.max_lon,
            t0.elapsed()
        );
    }

    // 2. Signals on every junction.
    let mut rng = SimRng::new(config.seed);
    let mut signals = SignalTable::with_clearance(config.clearance_secs)?;
    signals.auto_place(&network, &config.placement, &mut rng)?;
    for fixed in &config.signals {
        if network.find_edge(fixed.from, fixed.to).is_none() {
            bail!("fixed signal on {} -> {}: no such edge", fixed.from, fixed.to);
        }
        signals.insert(fixed.from, fixed.to, fixed.signal);
    }
    info!(
        "signals: {} directed edges (seed {}, {} fixed)",
        signals.len(),
        config.seed,
        config.signals.len()
    );

    // 3. Route.
    let last = NodeId(network.node_count().saturating_sub(1) as u32);
    let start = resolve_endpoint(&network, cli.from, cli.from_pos, NodeId(0))?;
    let goal = resolve_endpoint(&network, cli.to, cli.to_pos, last)?;

    let finder = PathFinder::with_config(&network, &signals, config.search.clone())?;
    let t0 = Instant::now();
    let outcome = finder.find_path(start, goal, config.start_time);
    let elapsed = t0.elapsed();

    println!();
    println!("Route {start} -> {goal}, departing t={:.0}s ({:?} clock)", config.start_time, config.search.clock_model);
    match outcome.failure {
        Some(reason) => {
            println!("No route: {reason} after {} nodes explored", outcome.stats.nodes_explored);
        }
        None => {
            let rows = route_rows(&finder, &outcome, config.start_time);
            print_route(&rows);
            println!();
            println!("  cost            {:.1} m", outcome.cost_m);
            println!(
                "  travel time     {:.1} s at {:.2} m/s",
                outcome.travel_secs(config.search.assumed_speed_mps),
                config.search.assumed_speed_mps
            );
            println!("  hops            {}", outcome.hops());
            println!("  nodes explored  {}", outcome.stats.nodes_explored);
            println!(
                "  signal waits    {} ({:.1} s)",
                outcome.stats.signals_encountered, outcome.stats.total_wait_secs
            );
            println!("  search time     {elapsed:.2?}");

            if let Some(path) = &cli.csv {
                write_csv(path, &rows)?;
                info!("route written to {}", path.display());
            }
        }
    }

    // 4. Optional batch.
    if cli.batch > 0 {
        let n = network.node_count() as u32;
        let mut qrng = rng.child(1);
        let queries: Vec<RouteQuery> = (0..cli.batch)
            .map(|_| RouteQuery {
                start: NodeId(qrng.gen_range(0..n)),
                goal: NodeId(qrng.gen_range(0..n)),
                start_time: config.start_time + qrng.gen_range(0.0..3_600.0),
            })
            .collect();

        let t0 = Instant::now();
        let outcomes = finder.find_paths(&queries);
        let elapsed = t0.elapsed();

        let found: Vec<_> = outcomes.iter().filter(|o| o.is_found()).collect();
        let mean_cost = found.iter().map(|o| o.cost_m).sum::<f64>() / found.len().max(1) as f64;
        let explored: usize = outcomes.iter().map(|o| o.stats.nodes_explored).sum();
        println!();
        println!(
            "Batch: {}/{} routed, mean cost {:.1} m, {} nodes explored, {:.2?}",
            found.len(),
            queries.len(),
            mean_cost,
            explored,
            elapsed
        );
    }

    Ok(())
}
