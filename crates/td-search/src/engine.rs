//! Time-dependent A* with signal-aware edge pricing.
//!
//! # Cost units
//!
//! Everything is in **metres**.  A signal wait of `w` seconds costs
//! `w × assumed_speed_mps` metres, so a road and a red light compete on the
//! same scale.  The simulated clock converts back with the same speed.
//!
//! # Algorithm
//!
//! Standard best-first search keyed by `f = g + h` with lazy deletion:
//! relaxing a node pushes a fresh frontier entry instead of decreasing a key,
//! and entries for already-closed nodes are skipped when popped.  Parents
//! live in a `NodeId → NodeId` map and the path is rebuilt by walking it
//! back from the goal.
//!
//! Each run owns all its working state; the graph and oracle are borrowed
//! read-only, so one `PathFinder` can serve many threads.

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use td_core::{NodeId, SearchClock, TdResult};
use td_network::RoadGraph;
use td_signal::SignalOracle;

use crate::config::{ClockModel, SearchConfig};
use crate::frontier::Frontier;
use crate::outcome::{FailureReason, SearchOutcome, SearchState, SearchStats};

// ── PathFinder ────────────────────────────────────────────────────────────────

/// Route planner over a graph `G` whose edges are priced by oracle `S`.
pub struct PathFinder<'a, G: RoadGraph, S: SignalOracle> {
    graph:   &'a G,
    signals: &'a S,
    config:  SearchConfig,
}

impl<'a, G: RoadGraph, S: SignalOracle> PathFinder<'a, G, S> {
    /// Planner with [`SearchConfig::default`].
    pub fn new(graph: &'a G, signals: &'a S) -> Self {
        Self { graph, signals, config: SearchConfig::default() }
    }

    /// # Errors
    ///
    /// Propagates [`SearchConfig::validate`].
    pub fn with_config(graph: &'a G, signals: &'a S, config: SearchConfig) -> TdResult<Self> {
        config.validate()?;
        Ok(Self { graph, signals, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn signals(&self) -> &'a S {
        self.signals
    }

    /// Flat-earth straight-line estimate from `node` to `goal`, `+∞` when
    /// either position is unknown.
    pub fn heuristic(&self, node: NodeId, goal: NodeId) -> f64 {
        match (self.graph.node_position(node), self.graph.node_position(goal)) {
            (Some(a), Some(b)) => a.flat_distance_m(b, self.config.metres_per_degree),
            _ => f64::INFINITY,
        }
    }

    /// Price of entering `from → to` at clock time `at`, as
    /// `(cost_m, wait_secs)`.  `None` when the graph has no distance for the
    /// edge.
    pub fn edge_cost(&self, from: NodeId, to: NodeId, at: f64) -> Option<(f64, f64)> {
        let distance = self.graph.edge_distance(from, to)?;
        let wait = self.signals.wait_time(from, to, at);
        Some((distance + wait * self.config.assumed_speed_mps, wait))
    }

    /// Cheapest path from `start` to `goal` leaving at `start_time`.
    ///
    /// Never fails outright: invalid endpoints, a non-finite `start_time`,
    /// unreachable goals and the expansion cap are all reported through
    /// [`SearchOutcome::failure`].
    pub fn find_path(&self, start: NodeId, goal: NodeId, start_time: f64) -> SearchOutcome {
        self.start(start, goal, start_time).finish()
    }

    /// Begin a run that the caller can drive one step at a time.
    pub fn start(&self, start: NodeId, goal: NodeId, start_time: f64) -> SearchRun<'_, 'a, G, S> {
        SearchRun {
            finder:   self,
            start,
            goal,
            state:    SearchState::Initialized,
            frontier: Frontier::default(),
            best_g:   FxHashMap::default(),
            parent:   FxHashMap::default(),
            closed:   FxHashSet::default(),
            clock:    SearchClock::new(start_time),
            stats:    SearchStats::default(),
            outcome:  None,
        }
    }
}

// ── SearchRun ─────────────────────────────────────────────────────────────────

/// The working state of one query.
///
/// [`step`](Self::step) pops at most one frontier entry, so a caller that
/// needs bounded latency can interleave steps with its own deadline checks.
pub struct SearchRun<'f, 'a, G: RoadGraph, S: SignalOracle> {
    finder:   &'f PathFinder<'a, G, S>,
    start:    NodeId,
    goal:     NodeId,
    state:    SearchState,
    frontier: Frontier,
    best_g:   FxHashMap<NodeId, f64>,
    parent:   FxHashMap<NodeId, NodeId>,
    closed:   FxHashSet<NodeId>,
    clock:    SearchClock,
    stats:    SearchStats,
    outcome:  Option<SearchOutcome>,
}

impl<G: RoadGraph, S: SignalOracle> SearchRun<'_, '_, G, S> {
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The simulated clock as it stands now.
    #[inline]
    pub fn clock(&self) -> SearchClock {
        self.clock
    }

    /// Advance the run and return the resulting state.  A no-op once the run
    /// is terminal.
    pub fn step(&mut self) -> SearchState {
        match self.state {
            SearchState::Initialized => self.initialize(),
            SearchState::Running => self.advance(),
            _ => {}
        }
        self.state
    }

    /// Drive the run to a terminal state and return its outcome.
    pub fn finish(mut self) -> SearchOutcome {
        while !self.step().is_terminal() {}
        match self.outcome.take() {
            Some(outcome) => outcome,
            None => SearchOutcome::failed(FailureReason::Unreachable, self.stats),
        }
    }

    fn initialize(&mut self) {
        let (start, goal) = (self.start, self.goal);
        debug!("search {start} -> {goal} from {}", self.clock);

        if start == goal {
            self.succeed(vec![start], 0.0);
            return;
        }
        let graph = self.finder.graph;
        if !graph.has_node(start) || !graph.has_node(goal) {
            self.fail(FailureReason::InvalidEndpoint);
            return;
        }
        if !self.clock.start_secs.is_finite() {
            self.fail(FailureReason::InvalidStartTime);
            return;
        }

        self.best_g.insert(start, 0.0);
        self.frontier.push(start, 0.0, self.finder.heuristic(start, goal));
        self.state = SearchState::Running;
    }

    fn advance(&mut self) {
        let Some(entry) = self.frontier.pop() else {
            self.fail(FailureReason::Unreachable);
            return;
        };

        if entry.node == self.goal {
            let path = self.reconstruct();
            self.succeed(path, entry.g);
            return;
        }

        // Stale duplicate from before a cheaper relaxation.
        if self.closed.contains(&entry.node) {
            return;
        }

        if let Some(cap) = self.finder.config.max_expansions {
            if self.stats.nodes_explored >= cap {
                self.fail(FailureReason::ExpansionLimit);
                return;
            }
        }

        self.closed.insert(entry.node);
        self.stats.nodes_explored += 1;
        trace!(
            "expand {} g={:.1} f={:.1} frontier={}",
            entry.node,
            entry.g,
            entry.f,
            self.frontier.len()
        );
        self.expand(entry.node, entry.g);
    }

    fn expand(&mut self, node: NodeId, g: f64) {
        let finder = self.finder;
        let speed = finder.config.assumed_speed_mps;
        let per_path_at = self.clock.start_secs + g / speed;

        for neighbor in finder.graph.neighbors(node) {
            if self.closed.contains(&neighbor) {
                continue;
            }

            let at = match finder.config.clock_model {
                ClockModel::SharedExpansion => self.clock.now(),
                ClockModel::PerPath => per_path_at,
            };
            let Some((cost, wait)) = finder.edge_cost(node, neighbor, at) else {
                trace!("no distance for {node} -> {neighbor}, pruned");
                continue;
            };

            if wait > 0.0 {
                self.stats.signals_encountered += 1;
                self.stats.total_wait_secs += wait;
            }

            let tentative = g + cost;
            if self.best_g.get(&neighbor).is_none_or(|&best| tentative < best) {
                self.best_g.insert(neighbor, tentative);
                self.parent.insert(neighbor, node);
                let h = finder.heuristic(neighbor, self.goal);
                self.frontier.push(neighbor, tentative, h);
            }

            if finder.config.clock_model == ClockModel::SharedExpansion {
                self.clock.advance(cost / speed);
            }
        }
    }

    fn reconstruct(&self) -> Vec<NodeId> {
        let mut path = vec![self.goal];
        let mut cur = self.goal;
        while let Some(&prev) = self.parent.get(&cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }

    fn succeed(&mut self, path: Vec<NodeId>, cost_m: f64) {
        debug!(
            "search {} -> {} found: {:.1} m over {} hops, {} explored, {:.1} s waiting",
            self.start,
            self.goal,
            cost_m,
            path.len().saturating_sub(1),
            self.stats.nodes_explored,
            self.stats.total_wait_secs
        );
        self.state = SearchState::Succeeded;
        self.outcome = Some(SearchOutcome::found(path, cost_m, self.stats));
    }

    fn fail(&mut self, reason: FailureReason) {
        debug!(
            "search {} -> {} failed ({reason}) after {} explored",
            self.start, self.goal, self.stats.nodes_explored
        );
        self.state = SearchState::Failed(reason);
        self.outcome = Some(SearchOutcome::failed(reason, self.stats));
    }
}
