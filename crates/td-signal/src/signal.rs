//! A single fixed-time signal and its phase arithmetic.
//!
//! # Phase model
//!
//! A signal repeats every `cycle_secs`.  At `anchor_secs` the signal entered
//! its `anchor_phase`; one cycle is the anchor phase followed by the other
//! phase:
//!
//! ```text
//! anchor_phase = Green:  [ green ......... | red ............ ]
//! anchor_phase = Red:    [ red ........... | green .......... ]
//!                        ^ anchor + k·cycle
//! ```
//!
//! `phase_elapsed(t) = (t − anchor) mod cycle` with Euclidean modulo, so
//! times before the anchor work the same as times after it.

use std::fmt;

use crate::{SignalError, SignalResult};

/// Colour of a signal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SignalPhase {
    Green,
    Red,
}

impl SignalPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalPhase::Green => "green",
            SignalPhase::Red   => "red",
        }
    }

    /// The phase that follows this one.
    #[inline]
    pub fn other(self) -> SignalPhase {
        match self {
            SignalPhase::Green => SignalPhase::Red,
            SignalPhase::Red   => SignalPhase::Green,
        }
    }
}

impl fmt::Display for SignalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase label for display, including "no signal on this edge".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhaseLabel {
    #[default]
    None,
    Green,
    Red,
}

impl PhaseLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseLabel::None  => "none",
            PhaseLabel::Green => "green",
            PhaseLabel::Red   => "red",
        }
    }
}

impl From<SignalPhase> for PhaseLabel {
    fn from(phase: SignalPhase) -> Self {
        match phase {
            SignalPhase::Green => PhaseLabel::Green,
            SignalPhase::Red   => PhaseLabel::Red,
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw phase state at an instant: which colour is showing and how long it
/// keeps showing.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseReport {
    pub label: PhaseLabel,
    pub remaining_secs: f64,
}

impl PhaseReport {
    /// Report for an edge without a signal.
    pub const UNSIGNALLED: PhaseReport = PhaseReport { label: PhaseLabel::None, remaining_secs: 0.0 };
}

/// A fixed-time signal controlling one directed edge.
///
/// Deserialising goes through [`Signal::new`], so a serialised signal with a
/// zero cycle or an oversized green is rejected rather than built.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SignalParams", into = "SignalParams"))]
pub struct Signal {
    cycle_secs:   f64,
    green_secs:   f64,
    anchor_secs:  f64,
    anchor_phase: SignalPhase,
}

impl Signal {
    /// Build a signal, validating its parameters.
    ///
    /// # Errors
    ///
    /// - [`SignalError::InvalidCycle`] unless `cycle_secs` is finite and > 0
    /// - [`SignalError::InvalidGreen`] unless `0 ≤ green_secs ≤ cycle_secs`
    /// - [`SignalError::InvalidAnchor`] if `anchor_secs` is not finite
    pub fn new(
        cycle_secs:   f64,
        green_secs:   f64,
        anchor_secs:  f64,
        anchor_phase: SignalPhase,
    ) -> SignalResult<Self> {
        if !cycle_secs.is_finite() || cycle_secs <= 0.0 {
            return Err(SignalError::InvalidCycle(cycle_secs));
        }
        if !(0.0..=cycle_secs).contains(&green_secs) {
            return Err(SignalError::InvalidGreen { green: green_secs, cycle: cycle_secs });
        }
        if !anchor_secs.is_finite() {
            return Err(SignalError::InvalidAnchor(anchor_secs));
        }
        Ok(Self { cycle_secs, green_secs, anchor_secs, anchor_phase })
    }

    /// Build a signal from a cycle length and the green share of it.
    pub fn with_ratio(
        cycle_secs:   f64,
        green_ratio:  f64,
        anchor_secs:  f64,
        anchor_phase: SignalPhase,
    ) -> SignalResult<Self> {
        if !(0.0..=1.0).contains(&green_ratio) {
            return Err(SignalError::InvalidRatio(green_ratio));
        }
        Self::new(cycle_secs, cycle_secs * green_ratio, anchor_secs, anchor_phase)
    }

    #[inline]
    pub fn cycle_secs(&self) -> f64 {
        self.cycle_secs
    }

    #[inline]
    pub fn green_secs(&self) -> f64 {
        self.green_secs
    }

    #[inline]
    pub fn red_secs(&self) -> f64 {
        self.cycle_secs - self.green_secs
    }

    #[inline]
    pub fn anchor_secs(&self) -> f64 {
        self.anchor_secs
    }

    #[inline]
    pub fn anchor_phase(&self) -> SignalPhase {
        self.anchor_phase
    }

    /// Seconds since the start of the cycle containing `at`, in `[0, cycle)`.
    pub fn phase_elapsed(&self, at: f64) -> f64 {
        let elapsed = (at - self.anchor_secs).rem_euclid(self.cycle_secs);
        // rem_euclid can round up to exactly `cycle` for tiny negative inputs.
        if elapsed >= self.cycle_secs { 0.0 } else { elapsed }
    }

    /// Seconds a vehicle arriving at `at` must wait.
    ///
    /// During the green of a green-anchored signal, an arrival with no more
    /// than `clearance_secs` of green left cannot clear the junction and is
    /// charged the full red duration.
    pub fn wait_time(&self, at: f64, clearance_secs: f64) -> f64 {
        let elapsed = self.phase_elapsed(at);
        match self.anchor_phase {
            SignalPhase::Green => {
                if elapsed < self.green_secs {
                    if self.green_secs - elapsed <= clearance_secs {
                        self.red_secs()
                    } else {
                        0.0
                    }
                } else {
                    self.cycle_secs - elapsed
                }
            }
            SignalPhase::Red => {
                let red = self.red_secs();
                if elapsed < red { red - elapsed } else { 0.0 }
            }
        }
    }

    /// Colour showing at `at` and the seconds until it changes.
    ///
    /// The cycle opens on the anchor phase, not always on green: a
    /// red-anchored signal reports red for `red_secs` after its anchor and
    /// green afterwards.  The colour therefore agrees with
    /// [`wait_time`](Self::wait_time), minus the clearance rule.
    pub fn predict(&self, at: f64) -> PhaseReport {
        let elapsed = self.phase_elapsed(at);
        let first_len = match self.anchor_phase {
            SignalPhase::Green => self.green_secs,
            SignalPhase::Red   => self.red_secs(),
        };
        let (phase, remaining_secs) = if elapsed < first_len {
            (self.anchor_phase, first_len - elapsed)
        } else {
            (self.anchor_phase.other(), self.cycle_secs - elapsed)
        };
        PhaseReport { label: phase.into(), remaining_secs }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

/// Unvalidated field set a [`Signal`] is (de)serialised through.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SignalParams {
    cycle_secs:   f64,
    green_secs:   f64,
    anchor_secs:  f64,
    anchor_phase: SignalPhase,
}

#[cfg(feature = "serde")]
impl TryFrom<SignalParams> for Signal {
    type Error = SignalError;

    fn try_from(p: SignalParams) -> SignalResult<Self> {
        Signal::new(p.cycle_secs, p.green_secs, p.anchor_secs, p.anchor_phase)
    }
}

#[cfg(feature = "serde")]
impl From<Signal> for SignalParams {
    fn from(s: Signal) -> Self {
        SignalParams {
            cycle_secs:   s.cycle_secs,
            green_secs:   s.green_secs,
            anchor_secs:  s.anchor_secs,
            anchor_phase: s.anchor_phase,
        }
    }
}
