//! What a search run reports back.

use std::fmt;

use td_core::NodeId;

/// Diagnostic counters.  They never influence the chosen path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes finalised (popped fresh and expanded).
    pub nodes_explored: usize,
    /// Edges priced with a positive signal wait.
    pub signals_encountered: usize,
    /// Sum of those waits, in seconds.
    pub total_wait_secs: f64,
}

/// Why a run failed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// Start or goal is not in the graph.
    InvalidEndpoint,
    /// The departure time is NaN or infinite.
    InvalidStartTime,
    /// The frontier emptied before the goal was reached.
    Unreachable,
    /// `SearchConfig::max_expansions` was hit.
    ExpansionLimit,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureReason::InvalidEndpoint  => "start or goal not in graph",
            FailureReason::InvalidStartTime => "start time is not finite",
            FailureReason::Unreachable      => "goal unreachable",
            FailureReason::ExpansionLimit   => "expansion limit reached",
        })
    }
}

/// Lifecycle of a [`SearchRun`](crate::SearchRun).
///
/// ```text
/// Initialized ──► Running ──► Succeeded
///      │             └──────► Failed
///      └──► Succeeded / Failed   (trivial query or invalid endpoints)
/// ```
///
/// Terminal states never resume.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchState {
    Initialized,
    Running,
    Succeeded,
    Failed(FailureReason),
}

impl SearchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Failed(_))
    }
}

/// Result of [`PathFinder::find_path`](crate::PathFinder::find_path).
///
/// On failure `path` is empty and `cost_m` is `+∞`; `stats` still holds
/// whatever the run accumulated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    pub path: Vec<NodeId>,
    /// Distance plus waits converted to metres.
    pub cost_m: f64,
    pub stats: SearchStats,
    pub failure: Option<FailureReason>,
}

impl SearchOutcome {
    pub(crate) fn found(path: Vec<NodeId>, cost_m: f64, stats: SearchStats) -> Self {
        Self { path, cost_m, stats, failure: None }
    }

    pub(crate) fn failed(reason: FailureReason, stats: SearchStats) -> Self {
        Self { path: Vec::new(), cost_m: f64::INFINITY, stats, failure: Some(reason) }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Cost expressed as seconds at `speed_mps`.
    pub fn travel_secs(&self, speed_mps: f64) -> f64 {
        self.cost_m / speed_mps
    }
}
