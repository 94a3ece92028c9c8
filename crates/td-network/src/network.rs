//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays are sorted by `(source, destination)` and indexed by `EdgeId`.
//! There is at most one edge per directed pair; the builder keeps the
//! shortest when a pair is added more than once.  Within a node's slice the
//! destinations are ascending, so `edge_distance` is a binary search.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`, used to
//! turn clicked or typed coordinates into route endpoints.

use log::info;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use td_core::{EdgeId, GeoBounds, GeoPoint, NodeId};

use crate::{NetworkError, NetworkResult, RoadGraph};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Immutable once built.  Use [`RoadNetworkBuilder`] to construct one.
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// A network with no nodes or edges.  Every search against it fails with
    /// invalid endpoints.
    pub fn empty() -> Self {
        Self {
            node_pos:       Vec::new(),
            node_out_start: vec![0],
            edge_to:        Vec::new(),
            edge_length_m:  Vec::new(),
            spatial_idx:    RTree::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// Contiguous `EdgeId` range of the outgoing edges of `node`.  Empty for
    /// unknown nodes.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let (start, end) = self.out_range(node);
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let (start, end) = self.out_range(node);
        end - start
    }

    #[inline]
    fn out_range(&self, node: NodeId) -> (usize, usize) {
        if !self.contains(node) {
            return (0, 0);
        }
        (
            self.node_out_start[node.index()] as usize,
            self.node_out_start[node.index() + 1] as usize,
        )
    }

    /// The edge `from → to`, if present.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        let (start, end) = self.out_range(from);
        self.edge_to[start..end]
            .binary_search(&to)
            .ok()
            .map(|offset| EdgeId((start + offset) as u32))
    }

    /// Bounding box of all node positions; `None` for an empty network.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.node_pos.iter().copied())
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

impl RoadGraph for RoadNetwork {
    #[inline]
    fn has_node(&self, node: NodeId) -> bool {
        self.contains(node)
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e.index()])
    }

    fn edge_distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.find_edge(from, to).map(|e| self.edge_length_m[e.index()])
    }

    fn node_position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len()).map(|i| NodeId(i as u32))
    }

    fn out_degree(&self, node: NodeId) -> usize {
        RoadNetwork::out_degree(self, node)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use td_core::GeoPoint;
/// use td_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(35.15, 126.85));
/// let c = b.add_node(GeoPoint::new(35.16, 126.85));
/// b.add_road(a, c, 1_112.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge of `length_m` metres from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Add edges in both directions for a two-way road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.nodes.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// # Errors
    ///
    /// [`NetworkError::NodeNotFound`] if an edge references a node that was
    /// never added; [`NetworkError::InvalidLength`] for negative or
    /// non-finite lengths.
    pub fn build(self) -> NetworkResult<RoadNetwork> {
        let node_count = self.nodes.len();

        for e in &self.raw_edges {
            for end in [e.from, e.to] {
                if end.index() >= node_count {
                    return Err(NetworkError::NodeNotFound(end));
                }
            }
            if !e.length_m.is_finite() || e.length_m < 0.0 {
                return Err(NetworkError::InvalidLength {
                    from:     e.from,
                    to:       e.to,
                    length_m: e.length_m,
                });
            }
        }

        // Sort by (from, to, length) so the first edge of each directed pair
        // is the shortest, then collapse duplicates.
        let mut raw = self.raw_edges;
        let added = raw.len();
        raw.sort_unstable_by(|a, b| {
            (a.from, a.to)
                .cmp(&(b.from, b.to))
                .then(a.length_m.total_cmp(&b.length_m))
        });
        raw.dedup_by_key(|e| (e.from, e.to));

        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        info!(
            "road network built: {} nodes, {} edges ({} duplicate edges collapsed)",
            node_count,
            raw.len(),
            added - raw.len()
        );

        Ok(RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_to,
            edge_length_m,
            spatial_idx,
        })
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
