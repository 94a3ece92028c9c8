//! Network-subsystem error type.

use thiserror::Error;

use td_core::NodeId;

/// Errors produced while building or loading a road network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("edge {from} -> {to} has invalid length {length_m} m")]
    InvalidLength { from: NodeId, to: NodeId, length_m: f64 },

    #[error("{rows} x {cols} grid exceeds the u32 node or edge id range")]
    GridTooLarge { rows: u32, cols: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
