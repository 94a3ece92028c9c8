//! Synthetic grid network.
//!
//! A rectangular lattice of nodes with two-way roads between horizontal and
//! vertical neighbours.  Used as a fallback when no map data is available and
//! as a realistic-scale fixture for tests.  Edge lengths are haversine
//! metres between the node positions.

use td_core::{GeoPoint, NodeId};

use crate::{NetworkError, NetworkResult, RoadNetwork, RoadNetworkBuilder};

/// Shape and placement of a grid network.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    /// The grid is centred on this point (row `rows / 2`, col `cols / 2`).
    pub origin: GeoPoint,
    /// Spacing between adjacent rows and columns, in degrees.
    pub spacing_deg: f64,
}

impl Default for GridSpec {
    /// 10 × 10 grid at 0.01° spacing around central Gwangju.
    fn default() -> Self {
        Self {
            rows:        10,
            cols:        10,
            origin:      GeoPoint::new(35.1595, 126.8526),
            spacing_deg: 0.01,
        }
    }
}

impl GridSpec {
    /// Node id of the node at `(row, col)`; ids are assigned row-major.
    #[inline]
    pub fn node(&self, row: u32, col: u32) -> NodeId {
        NodeId(row * self.cols + col)
    }

    pub fn node_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    fn position(&self, row: u32, col: u32) -> GeoPoint {
        let d_row = row as f64 - (self.rows / 2) as f64;
        let d_col = col as f64 - (self.cols / 2) as f64;
        GeoPoint::new(
            self.origin.lat + d_row * self.spacing_deg,
            self.origin.lon + d_col * self.spacing_deg,
        )
    }
}

/// Build the grid described by `spec`.
///
/// # Errors
///
/// [`NetworkError::GridTooLarge`] when the node or directed-edge count does
/// not fit below `u32::MAX`.
pub fn build_grid(spec: &GridSpec) -> NetworkResult<RoadNetwork> {
    let (rows, cols) = (spec.rows, spec.cols);
    let (r, c) = (u64::from(rows), u64::from(cols));
    let node_count = r * c;
    let directed_edges = 2 * (r.saturating_sub(1) * c + r * c.saturating_sub(1));
    if node_count >= u64::from(u32::MAX) || directed_edges >= u64::from(u32::MAX) {
        return Err(NetworkError::GridTooLarge { rows, cols });
    }
    let mut b = RoadNetworkBuilder::with_capacity(node_count as usize, directed_edges as usize);

    for row in 0..rows {
        for col in 0..cols {
            b.add_node(spec.position(row, col));
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            let here = spec.node(row, col);
            let here_pos = spec.position(row, col);
            if col + 1 < cols {
                let right = spec.node(row, col + 1);
                b.add_road(here, right, here_pos.distance_m(spec.position(row, col + 1)));
            }
            if row + 1 < rows {
                let down = spec.node(row + 1, col);
                b.add_road(here, down, here_pos.distance_m(spec.position(row + 1, col)));
            }
        }
    }

    b.build()
}
