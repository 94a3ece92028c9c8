//! Search configuration.

use td_core::{METRES_PER_DEGREE, TdError, TdResult};

/// Assumed travel speed used to convert between seconds and metres
/// (50 km/h).
pub const DEFAULT_SPEED_MPS: f64 = 13.89;

/// Which clock a signal wait is priced at.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ClockModel {
    /// One scalar clock per run, advanced by `edge_cost / speed` every time
    /// an edge is priced during expansion.  The clock therefore tracks the
    /// order edges were *examined* in, not the arrival time along any one
    /// path, and can misprice signals on nodes reached after a detour was
    /// explored.
    #[default]
    SharedExpansion,
    /// Each edge is priced at `start_time + g(from) / speed`: the arrival
    /// time at its tail along the best path found so far.
    PerPath,
}

/// Tunables for [`PathFinder`](crate::PathFinder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Converts wait seconds to metres and metres to clock seconds.
    pub assumed_speed_mps: f64,
    /// Scale of the flat-earth heuristic.
    pub metres_per_degree: f64,
    pub clock_model: ClockModel,
    /// Give up after finalising this many nodes.  `None` searches until the
    /// goal is reached or the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            assumed_speed_mps: DEFAULT_SPEED_MPS,
            metres_per_degree: METRES_PER_DEGREE,
            clock_model:       ClockModel::SharedExpansion,
            max_expansions:    None,
        }
    }
}

impl SearchConfig {
    /// # Errors
    ///
    /// [`TdError::Config`] for a non-positive or non-finite speed or
    /// heuristic scale.
    pub fn validate(&self) -> TdResult<()> {
        if !self.assumed_speed_mps.is_finite() || self.assumed_speed_mps <= 0.0 {
            return Err(TdError::Config(format!(
                "assumed_speed_mps must be finite and positive, got {}",
                self.assumed_speed_mps
            )));
        }
        if !self.metres_per_degree.is_finite() || self.metres_per_degree < 0.0 {
            return Err(TdError::Config(format!(
                "metres_per_degree must be finite and non-negative, got {}",
                self.metres_per_degree
            )));
        }
        Ok(())
    }
}
