//! Simulated clock used while pricing signal waits.
//!
//! # Design
//!
//! Time is a plain `f64` count of seconds on the same axis as signal phase
//! anchors.  The origin is arbitrary (the caller's `start_time`), and values
//! before a signal's anchor are legal: the oracle reduces them modulo the
//! cycle length.
//!
//! `SearchClock` is the single scalar clock a search run advances as it
//! prices edges.  It only moves forward.

use std::fmt;

/// A forward-only simulated clock in seconds.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchClock {
    /// Clock value when the run began.
    pub start_secs: f64,
    /// Current clock value.
    pub now_secs: f64,
}

impl SearchClock {
    /// Create a clock reading `start_secs`.
    pub fn new(start_secs: f64) -> Self {
        Self { start_secs, now_secs: start_secs }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now_secs
    }

    /// Move the clock forward by `secs`.  Negative and non-finite values are
    /// ignored so the clock never runs backwards.
    #[inline]
    pub fn advance(&mut self, secs: f64) {
        if secs.is_finite() && secs > 0.0 {
            self.now_secs += secs;
        }
    }

    /// Seconds elapsed since the clock was created.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.now_secs - self.start_secs
    }

    /// Break elapsed time into (hours, minutes, seconds) for logging.
    pub fn elapsed_hms(&self) -> (u64, u32, f64) {
        let total = self.elapsed_secs().max(0.0);
        let hours = (total / 3_600.0).floor() as u64;
        let minutes = ((total % 3_600.0) / 60.0).floor() as u32;
        let seconds = total % 60.0;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SearchClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "t={:.1}s (+{}:{:02}:{:04.1})", self.now_secs, h, m, s)
    }
}
