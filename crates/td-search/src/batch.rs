//! Batches of independent queries sharing one graph and oracle.
//!
//! With the `parallel` feature the batch runs on Rayon's pool; each query
//! still owns its own [`SearchRun`](crate::SearchRun) state, and the graph
//! and oracle are only ever read.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use td_core::NodeId;
use td_network::RoadGraph;
use td_signal::SignalOracle;

use crate::{PathFinder, SearchOutcome};

/// One `find_path` request.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteQuery {
    pub start: NodeId,
    pub goal: NodeId,
    pub start_time: f64,
}

impl<G: RoadGraph, S: SignalOracle> PathFinder<'_, G, S> {
    /// Answer every query; outcomes are in query order.
    #[cfg(feature = "parallel")]
    pub fn find_paths(&self, queries: &[RouteQuery]) -> Vec<SearchOutcome> {
        queries
            .par_iter()
            .map(|q| self.find_path(q.start, q.goal, q.start_time))
            .collect()
    }

    /// Answer every query; outcomes are in query order.
    #[cfg(not(feature = "parallel"))]
    pub fn find_paths(&self, queries: &[RouteQuery]) -> Vec<SearchOutcome> {
        queries
            .iter()
            .map(|q| self.find_path(q.start, q.goal, q.start_time))
            .collect()
    }
}
