//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use td_network::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("gwangju.osm.pbf"), None)?;
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways (see [`is_drivable`]).  One-way roads
//! add a single directed edge, two-way roads add both directions.  Edge
//! lengths are haversine metres between consecutive way nodes.
//!
//! With a bounding box, way segments with either end outside the box are
//! dropped, and so are nodes no kept segment touches.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use osmpbf::{Element, ElementReader};

use td_core::{GeoBounds, GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::NetworkError;

/// Load a drivable road network from an OSM PBF file, optionally clipped to
/// `bbox`.
///
/// # Errors
///
/// Returns [`NetworkError::Osm`] on parse errors, [`NetworkError::Io`] on
/// file errors.
pub fn load_from_pbf(path: &Path, bbox: Option<GeoBounds>) -> Result<RoadNetwork, NetworkError> {
    let reader = ElementReader::from_path(path).map_err(|e| NetworkError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| is_drivable(h)) {
                    let oneway = is_oneway(highway, &tags);
                    road_ways.push(OsmWay { refs: w.refs().collect(), oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| NetworkError::Osm(e.to_string()))?;

    let in_bounds = |pos: GeoPoint| bbox.is_none_or(|b| b.contains(pos));

    // Assign dense ids lazily, so only nodes touched by a kept segment exist.
    let mut builder = RoadNetworkBuilder::with_capacity(all_nodes.len() / 4, road_ways.len() * 4);
    let mut osm_to_td: HashMap<i64, NodeId> = HashMap::new();
    let mut missing_refs = 0usize;

    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (Some(&pos_a), Some(&pos_b)) = (all_nodes.get(&window[0]), all_nodes.get(&window[1]))
            else {
                missing_refs += 1;
                continue;
            };
            if !in_bounds(pos_a) || !in_bounds(pos_b) {
                continue;
            }

            let from = *osm_to_td.entry(window[0]).or_insert_with(|| builder.add_node(pos_a));
            let to = *osm_to_td.entry(window[1]).or_insert_with(|| builder.add_node(pos_b));
            let len_m = pos_a.distance_m(pos_b);

            builder.add_directed_edge(from, to, len_m);
            if !way.oneway {
                builder.add_directed_edge(to, from, len_m);
            }
        }
    }

    if missing_refs > 0 {
        warn!("skipped {missing_refs} way segments referencing nodes absent from the extract");
    }
    info!(
        "loaded {} drivable ways from {}",
        road_ways.len(),
        path.display()
    );

    builder.build()
}

struct OsmWay {
    refs:   Vec<i64>,
    oneway: bool,
}

/// `true` if a car may drive on this `highway` class.  Unknown classes are
/// kept rather than dropped.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction"
    )
}

/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
