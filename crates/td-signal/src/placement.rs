//! Seeded placement of signals at junctions.
//!
//! Every node with at least `min_out_degree` outgoing edges is treated as a
//! signalised junction, and each of its outgoing edges gets its own signal.
//! Parameters are drawn from the caller's [`SimRng`], visiting nodes in
//! ascending id order and neighbours in graph order, so a given graph and
//! seed always yield the same table.

use log::info;

use td_core::SimRng;
use td_network::RoadGraph;

use crate::{SignalError, SignalResult, SignalTable};

/// Ranges the placement draws signal parameters from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementParams {
    /// Cycle length range in seconds, `[min, max)`.
    pub cycle_min_secs: f64,
    pub cycle_max_secs: f64,
    /// Green share of the cycle, `[min, max)`.
    pub green_ratio_min: f64,
    pub green_ratio_max: f64,
    /// Out-degree at which a node counts as a junction.
    pub min_out_degree: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            cycle_min_secs:  90.0,
            cycle_max_secs:  150.0,
            green_ratio_min: 0.4,
            green_ratio_max: 0.6,
            min_out_degree:  2,
        }
    }
}

impl PlacementParams {
    pub fn validate(&self) -> SignalResult<()> {
        if !self.cycle_min_secs.is_finite() || self.cycle_min_secs <= 0.0 {
            return Err(SignalError::InvalidCycle(self.cycle_min_secs));
        }
        if !self.cycle_max_secs.is_finite() || self.cycle_max_secs < self.cycle_min_secs {
            return Err(SignalError::Placement(format!(
                "cycle range [{}, {}) is empty",
                self.cycle_min_secs, self.cycle_max_secs
            )));
        }
        for ratio in [self.green_ratio_min, self.green_ratio_max] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(SignalError::InvalidRatio(ratio));
            }
        }
        if self.green_ratio_max < self.green_ratio_min {
            return Err(SignalError::Placement(format!(
                "green ratio range [{}, {}) is empty",
                self.green_ratio_min, self.green_ratio_max
            )));
        }
        Ok(())
    }
}

/// Uniform draw in `[min, max)`, degenerating to `min` when the range is a
/// single point.
fn draw(rng: &mut SimRng, min: f64, max: f64) -> f64 {
    if max > min { rng.gen_range(min..max) } else { min }
}

impl SignalTable {
    /// Signalise every junction of `graph`.  Edges that already carry a
    /// signal keep it.  Returns the number of signals added.
    pub fn auto_place<G: RoadGraph>(
        &mut self,
        graph:  &G,
        params: &PlacementParams,
        rng:    &mut SimRng,
    ) -> SignalResult<usize> {
        params.validate()?;

        let before = self.len();
        let mut junctions = 0usize;
        for node in graph.node_ids() {
            if graph.out_degree(node) < params.min_out_degree {
                continue;
            }
            junctions += 1;
            for neighbor in graph.neighbors(node) {
                if self.contains(node, neighbor) {
                    continue;
                }
                let cycle = draw(rng, params.cycle_min_secs, params.cycle_max_secs);
                let ratio = draw(rng, params.green_ratio_min, params.green_ratio_max);
                self.add_random(node, neighbor, cycle, ratio, rng)?;
            }
        }

        let added = self.len() - before;
        info!("placed {added} signals across {junctions} junctions");
        Ok(added)
    }
}

/// Build a fresh table with the default clearance and signalise `graph`.
pub fn place_signals<G: RoadGraph>(
    graph:  &G,
    params: &PlacementParams,
    rng:    &mut SimRng,
) -> SignalResult<SignalTable> {
    let mut table = SignalTable::new();
    table.auto_place(graph, params, rng)?;
    Ok(table)
}
