//! `td-signal` — periodic traffic signals attached to directed edges.
//!
//! A [`Signal`] is immutable: its phase at any instant is a pure function of
//! its parameters and the query time, so the search can price the same edge
//! at many hypothetical arrival times without side effects.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`signal`]    | `Signal`, `SignalPhase`, `PhaseLabel`, `PhaseReport`    |
//! | [`oracle`]    | `SignalOracle` trait, `SignalTable`, `NoSignals`        |
//! | [`placement`] | `PlacementParams`, seeded junction signal placement     |
//! | [`error`]     | `SignalError`, `SignalResult<T>`                        |

pub mod error;
pub mod oracle;
pub mod placement;
pub mod signal;

#[cfg(test)]
mod tests;

pub use error::{SignalError, SignalResult};
pub use oracle::{DEFAULT_CLEARANCE_SECS, NoSignals, SignalOracle, SignalTable};
pub use placement::{PlacementParams, place_signals};
pub use signal::{PhaseLabel, PhaseReport, Signal, SignalPhase};
