//! The wait-time oracle consumed by the search.
//!
//! # Pluggability
//!
//! The search engine prices edges through the [`SignalOracle`] trait, so
//! applications can swap in a live feed or a learned model without touching
//! the engine.  [`SignalTable`] is the stock implementation over fixed-time
//! [`Signal`]s; [`NoSignals`] makes every edge free-flowing.

use log::debug;
use rustc_hash::FxHashMap;

use td_core::{NodeId, SimRng};

use crate::{PhaseReport, Signal, SignalError, SignalPhase, SignalResult};

/// Remaining green at or below which an arrival is treated as blocked.
pub const DEFAULT_CLEARANCE_SECS: f64 = 5.0;

// ── SignalOracle trait ────────────────────────────────────────────────────────

/// Time-dependent signal state per directed edge.
///
/// # Contract
///
/// Both queries are pure: the same `(from, to, at)` always yields the same
/// answer, and an edge without a signal yields 0 / [`PhaseReport::UNSIGNALLED`].
///
/// # Thread safety
///
/// Implementations must be `Sync`; one oracle is shared read-only by every
/// concurrent search.
pub trait SignalOracle: Sync {
    /// Seconds a vehicle entering `from → to` at clock time `at` must wait.
    fn wait_time(&self, from: NodeId, to: NodeId, at: f64) -> f64;

    /// Raw phase of the signal on `from → to` at `at`, without the clearance
    /// rule.  For display only.
    fn predict_phase(&self, from: NodeId, to: NodeId, at: f64) -> PhaseReport;
}

// ── NoSignals ─────────────────────────────────────────────────────────────────

/// An oracle with no signals anywhere.  Turns the search into plain A* over
/// static distances.
pub struct NoSignals;

impl SignalOracle for NoSignals {
    #[inline]
    fn wait_time(&self, _from: NodeId, _to: NodeId, _at: f64) -> f64 {
        0.0
    }

    #[inline]
    fn predict_phase(&self, _from: NodeId, _to: NodeId, _at: f64) -> PhaseReport {
        PhaseReport::UNSIGNALLED
    }
}

// ── SignalTable ───────────────────────────────────────────────────────────────

/// Fixed-time signals keyed by directed edge.
///
/// Each directed edge holds at most one signal; `a → b` and `b → a` are
/// independent keys.
#[derive(Clone, Debug)]
pub struct SignalTable {
    signals:        FxHashMap<(NodeId, NodeId), Signal>,
    clearance_secs: f64,
}

impl SignalTable {
    /// Empty table with the default 5 s clearance threshold.
    pub fn new() -> Self {
        Self {
            signals:        FxHashMap::default(),
            clearance_secs: DEFAULT_CLEARANCE_SECS,
        }
    }

    /// Empty table with a custom clearance threshold.
    pub fn with_clearance(clearance_secs: f64) -> SignalResult<Self> {
        if !clearance_secs.is_finite() || clearance_secs < 0.0 {
            return Err(SignalError::InvalidClearance(clearance_secs));
        }
        Ok(Self { clearance_secs, ..Self::new() })
    }

    pub fn clearance_secs(&self) -> f64 {
        self.clearance_secs
    }

    /// Attach `signal` to `from → to`, returning the signal it replaced.
    pub fn insert(&mut self, from: NodeId, to: NodeId, signal: Signal) -> Option<Signal> {
        let old = self.signals.insert((from, to), signal);
        if old.is_some() {
            debug!("replaced signal on {from} -> {to}");
        }
        old
    }

    /// Attach a signal with the given cycle and green ratio whose anchor is
    /// drawn uniformly within one cycle and whose anchor phase is green with
    /// probability `green_ratio`.
    pub fn add_random(
        &mut self,
        from:        NodeId,
        to:          NodeId,
        cycle_secs:  f64,
        green_ratio: f64,
        rng:         &mut SimRng,
    ) -> SignalResult<()> {
        if !cycle_secs.is_finite() || cycle_secs <= 0.0 {
            return Err(SignalError::InvalidCycle(cycle_secs));
        }
        if !(0.0..=1.0).contains(&green_ratio) {
            return Err(SignalError::InvalidRatio(green_ratio));
        }
        let phase = if rng.gen_bool(green_ratio) { SignalPhase::Green } else { SignalPhase::Red };
        let anchor = rng.gen_range(0.0..cycle_secs);
        let signal = Signal::with_ratio(cycle_secs, green_ratio, anchor, phase)?;
        self.insert(from, to, signal);
        Ok(())
    }

    #[inline]
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<&Signal> {
        self.signals.get(&(from, to))
    }

    #[inline]
    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.signals.contains_key(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// All `(from, to, signal)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, &Signal)> + '_ {
        self.signals.iter().map(|(&(from, to), s)| (from, to, s))
    }
}

impl Default for SignalTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalOracle for SignalTable {
    #[inline]
    fn wait_time(&self, from: NodeId, to: NodeId, at: f64) -> f64 {
        self.get(from, to)
            .map_or(0.0, |s| s.wait_time(at, self.clearance_secs))
    }

    fn predict_phase(&self, from: NodeId, to: NodeId, at: f64) -> PhaseReport {
        self.get(from, to)
            .map_or(PhaseReport::UNSIGNALLED, |s| s.predict(at))
    }
}
