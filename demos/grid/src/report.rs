//! Route table: what a driver following the path would see at each node.

use std::path::Path;

use anyhow::Result;
use csv::Writer;

use td_core::NodeId;
use td_network::RoadGraph;
use td_search::{PathFinder, SearchOutcome};
use td_signal::{PhaseReport, SignalOracle};

/// One node along a found path.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRow {
    pub order: usize,
    pub node: NodeId,
    pub lat: f64,
    pub lon: f64,
    /// Clock time the vehicle reaches the node, waits included.
    pub arrival_secs: f64,
    /// Signal on the edge leaving this node, at arrival.  Unsignalled for
    /// the goal.
    pub phase: PhaseReport,
}

/// Walk `outcome.path` from `start_time`, charging each edge its priced
/// cost at the arrival time of its tail.
pub fn route_rows<G: RoadGraph, S: SignalOracle>(
    finder: &PathFinder<'_, G, S>,
    outcome: &SearchOutcome,
    start_time: f64,
) -> Vec<RouteRow> {
    let speed = finder.config().assumed_speed_mps;
    let mut at = start_time;
    let mut rows = Vec::with_capacity(outcome.path.len());

    for (order, &node) in outcome.path.iter().enumerate() {
        let pos = finder.graph().node_position(node);
        let next = outcome.path.get(order + 1).copied();
        let phase = match next {
            Some(next) => finder.signals().predict_phase(node, next, at),
            None => PhaseReport::UNSIGNALLED,
        };
        rows.push(RouteRow {
            order,
            node,
            lat: pos.map_or(f64::NAN, |p| p.lat),
            lon: pos.map_or(f64::NAN, |p| p.lon),
            arrival_secs: at,
            phase,
        });
        if let Some((cost, _)) = next.and_then(|next| finder.edge_cost(node, next, at)) {
            at += cost / speed;
        }
    }
    rows
}

pub fn print_route(rows: &[RouteRow]) {
    println!(
        "{:>5}  {:>8}  {:>10}  {:>11}  {:>9}  {:>6}  {:>9}",
        "order", "node", "lat", "lon", "arrive_s", "phase", "remain_s"
    );
    for row in rows {
        println!(
            "{:>5}  {:>8}  {:>10.5}  {:>11.5}  {:>9.1}  {:>6}  {:>9.1}",
            row.order,
            row.node.0,
            row.lat,
            row.lon,
            row.arrival_secs,
            row.phase.label,
            row.phase.remaining_secs
        );
    }
}

pub fn write_csv(path: &Path, rows: &[RouteRow]) -> Result<()> {
    let mut out = Writer::from_path(path)?;
    out.write_record(["order", "node", "lat", "lon", "arrival_secs", "phase", "remaining_secs"])?;
    for row in rows {
        out.write_record(&[
            row.order.to_string(),
            row.node.0.to_string(),
            row.lat.to_string(),
            row.lon.to_string(),
            format!("{:.3}", row.arrival_secs),
            row.phase.label.to_string(),
            format!("{:.3}", row.phase.remaining_secs),
        ])?;
    }
    out.flush()?;
    Ok(())
}
