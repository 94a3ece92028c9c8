//! `td-search` — signal-aware time-dependent route search.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use td_core::SimRng;
//! use td_network::{GridSpec, build_grid};
//! use td_search::PathFinder;
//! use td_signal::{PlacementParams, place_signals};
//!
//! let spec = GridSpec::default();
//! let network = build_grid(&spec)?;
//! let signals = place_signals(&network, &PlacementParams::default(), &mut SimRng::new(42))?;
//!
//! let finder = PathFinder::new(&network, &signals);
//! let outcome = finder.find_path(spec.node(0, 0), spec.node(9, 9), 0.0);
//! println!("{:.0} m via {} nodes", outcome.cost_m, outcome.path.len());
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `PathFinder::find_paths` runs on Rayon's thread pool.  |
//! | `serde`    | Derives on config, outcome, and query types.           |

pub mod batch;
pub mod config;
pub mod engine;
mod frontier;
pub mod outcome;


pub use batch::RouteQuery;
pub use config::{ClockModel, DEFAULT_SPEED_MPS, SearchConfig};
pub use engine::{PathFinder, SearchRun};
pub use outcome::{FailureReason, SearchOutcome, SearchState, SearchStats};
