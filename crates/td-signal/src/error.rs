//! Signal construction errors.
//!
//! Querying a signal never fails; only malformed parameters are rejected, and
//! only when a signal or table is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("cycle length must be finite and positive, got {0} s")]
    InvalidCycle(f64),

    #[error("green duration {green} s outside [0, {cycle}] s")]
    InvalidGreen { green: f64, cycle: f64 },

    #[error("phase anchor must be finite, got {0}")]
    InvalidAnchor(f64),

    #[error("green ratio must lie in [0, 1], got {0}")]
    InvalidRatio(f64),

    #[error("clearance threshold must be finite and non-negative, got {0} s")]
    InvalidClearance(f64),

    #[error("invalid placement parameters: {0}")]
    Placement(String),
}

pub type SignalResult<T> = Result<T, SignalError>;
