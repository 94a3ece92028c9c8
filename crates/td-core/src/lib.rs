//! `td-core` — foundational types for the `tdroute` time-dependent router.
//!
//! This crate is a dependency of every other `td-*` crate.  It has no `td-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`                                         |
//! | [`geo`]   | `GeoPoint`, `GeoBounds`, haversine and flat-earth distances |
//! | [`time`]  | `SearchClock` (scalar simulated clock, seconds)            |
//! | [`rng`]   | `SimRng` (seeded construction-time randomness)             |
//! | [`error`] | `TdError`, `TdResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TdError, TdResult};
pub use geo::{GeoBounds, GeoPoint, METRES_PER_DEGREE};
pub use ids::{EdgeId, NodeId};
pub use rng::SimRng;
pub use time::SearchClock;
