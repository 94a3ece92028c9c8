//! Demo run configuration: an optional TOML file, overridden by CLI flags.
//!
//! ```toml
//! seed = 7
//! start_time = 28800.0
//!
//! [grid]
//! rows = 20
//! cols = 20
//!
//! [search]
//! clock_model = "per-path"
//! max_expansions = 5000
//!
//! [placement]
//! cycle_min_secs = 60.0
//!
//! [[signals]]
//! from = 44
//! to = 45
//! signal = { cycle_secs = 120.0, green_secs = 60.0, anchor_secs = 0.0, anchor_phase = "red" }
//! ```
//!
//! Every table and every key is optional; missing values take their
//! library defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use td_core::NodeId;
use td_network::GridSpec;
use td_search::SearchConfig;
use td_signal::{DEFAULT_CLEARANCE_SECS, PlacementParams, Signal};

/// A signal pinned to one directed edge, replacing whatever placement drew.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedSignal {
    pub from: NodeId,
    pub to: NodeId,
    pub signal: Signal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Seed for signal placement and batch query generation.
    pub seed: u64,
    /// Departure time in seconds on the signal clock.
    pub start_time: f64,
    /// Remaining green treated as already red.
    pub clearance_secs: f64,
    pub grid: GridSpec,
    pub search: SearchConfig,
    pub placement: PlacementParams,
    pub signals: Vec<FixedSignal>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed:           42,
            start_time:     0.0,
            clearance_secs: DEFAULT_CLEARANCE_SECS,
            grid:           GridSpec::default(),
            search:         SearchConfig::default(),
            placement:      PlacementParams::default(),
            signals:        Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(text)?;
        config.search.validate()?;
        config.placement.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
