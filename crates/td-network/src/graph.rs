//! The graph-provider contract consumed by signal placement and the search.
//!
//! Anything that can answer these five questions can be routed over: the
//! CSR [`RoadNetwork`](crate::RoadNetwork) is the stock implementation, but
//! tests and applications may supply their own adjacency structures.

use td_core::{GeoPoint, NodeId};

/// Read-only road graph.
///
/// # Thread safety
///
/// Implementations must be `Sync`: a single graph is shared by reference
/// across concurrent searches, none of which mutate it.
pub trait RoadGraph: Sync {
    /// `true` if `node` exists in the graph.
    fn has_node(&self, node: NodeId) -> bool;

    /// Outgoing neighbours of `node` in a stable order.  Empty for unknown
    /// nodes.
    ///
    /// A neighbour listed here is not guaranteed to have a distance; callers
    /// must treat a missing [`edge_distance`](Self::edge_distance) as "no such
    /// road".
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// Static length in metres of the directed edge `from → to`, if any.
    fn edge_distance(&self, from: NodeId, to: NodeId) -> Option<f64>;

    /// Geographic position of `node`, if known.
    fn node_position(&self, node: NodeId) -> Option<GeoPoint>;

    /// Every node id, in ascending order.
    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_;

    /// Number of outgoing neighbours.
    fn out_degree(&self, node: NodeId) -> usize {
        self.neighbors(node).count()
    }
}
