//! # A* Search
//!
//! Best-first search ordered by `accumulated cost + estimate`.
//!
//! ## Loop
//!
//! 1. Dequeue the cheapest candidate path.
//! 2. Drop it if its last step is already closed. The frontier may hold
//!    several paths to one node; only the first one dequeued is expanded.
//! 3. Stop with [`SearchOutcome::Found`] if the last step is the destination.
//! 4. Poll the clock; once the elapsed time exceeds the budget, post the
//!    cancellation notices and stop with [`SearchOutcome::Cancelled`].
//! 5. Close the last step and enqueue one extended path per neighbour.
//!
//! A dequeued destination is returned even when the budget has run out.
//!
//! The frontier running dry ends the search with [`SearchOutcome::Exhausted`].
//!
//! ## Optimality
//!
//! The first path dequeued for a node is the cheapest one only when edge
//! costs are non-negative and `estimate` is admissible and consistent. With
//! an inadmissible estimate the search still terminates on finite graphs, but
//! the returned route may not be the cheapest. Callback results are used as
//! given: NaN or infinite values are not filtered.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::TimeDelta;
use ordered_float::OrderedFloat;

use crate::clock::{Clock, SystemClock};
use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::notify::{Notifier, TracingNotifier};
use crate::path::Path;
use crate::queue::PriorityContainer;

// ---------------------------------------------------------------------------
// HasNeighbours
// ---------------------------------------------------------------------------

/// Lazy edge enumeration for a graph node.
///
/// Neighbours are requested at most once per node per search and need not be
/// cached by the implementor.
pub trait HasNeighbours: Sized {
    /// Collection or iterator yielding the adjacent nodes.
    type Neighbours: IntoIterator<Item = Self>;

    /// Nodes reachable from `self` in one step.
    fn neighbours(&self) -> Self::Neighbours;
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// How a search ended.
#[derive(Debug, Clone)]
pub enum SearchOutcome<N> {
    /// The destination was reached; the path ends at it.
    Found(Path<N>),
    /// Every reachable node was expanded without meeting the destination.
    Exhausted,
    /// The time budget ran out first.
    Cancelled,
}

impl<N> SearchOutcome<N> {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path<N>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Exhausted | Self::Cancelled => None,
        }
    }

    /// Consume the outcome and return the path, if one was found.
    pub fn into_path(self) -> Option<Path<N>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Exhausted | Self::Cancelled => None,
        }
    }
}

/// Counters describing the work a search performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes closed and expanded.
    pub expanded: usize,
    /// Paths inserted into the frontier, the seed included.
    pub enqueued: usize,
    /// Dequeued paths dropped because their last step was already closed.
    pub stale_discarded: usize,
    /// Time between the start of the search and its last clock reading.
    pub elapsed: TimeDelta,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            expanded: 0,
            enqueued: 0,
            stale_discarded: 0,
            elapsed: TimeDelta::zero(),
        }
    }
}

/// Outcome of a search together with its statistics.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    /// How the search ended.
    pub outcome: SearchOutcome<N>,
    /// Work performed.
    pub stats: SearchStats,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// A* search engine with an injected clock and notification sink.
///
/// A `PathFinder` holds no per-search state; every call to
/// [`find_path`](PathFinder::find_path) owns its own frontier and closed set.
#[derive(Debug, Clone)]
pub struct PathFinder<C = SystemClock, T = TracingNotifier> {
    config: SearchConfig,
    clock: C,
    notifier: T,
}

impl PathFinder {
    /// Engine using the system clock and `tracing` notifications.
    ///
    /// The configuration is used as given; see [`SearchConfig::time_budget`]
    /// for how an out-of-range budget is read. Use
    /// [`try_new`](PathFinder::try_new) to reject it instead.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
            notifier: TracingNotifier,
        }
    }

    /// Like [`new`](PathFinder::new), but validates the configuration first.
    pub fn try_new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<C: Clock, T: Notifier> PathFinder<C, T> {
    /// Replace the time source.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PathFinder<C2, T> {
        PathFinder {
            config: self.config,
            clock,
            notifier: self.notifier,
        }
    }

    /// Replace the notification sink.
    pub fn with_notifier<T2: Notifier>(self, notifier: T2) -> PathFinder<C, T2> {
        PathFinder {
            config: self.config,
            clock: self.clock,
            notifier,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for the cheapest route from `start` to `destination`.
    ///
    /// `distance(from, to)` prices one edge; `estimate(node)` bounds the
    /// remaining cost from `node` to `destination` from below.
    pub fn find_path<N, D, E>(
        &self,
        start: N,
        destination: &N,
        mut distance: D,
        mut estimate: E,
    ) -> SearchResult<N>
    where
        N: HasNeighbours + Eq + Hash + Clone,
        D: FnMut(&N, &N) -> f64,
        E: FnMut(&N) -> f64,
    {
        let budget = self.config.time_budget();
        let started_at = self.clock.now();
        let mut stats = SearchStats::default();

        let mut closed: HashSet<N> = HashSet::new();
        let mut frontier: PriorityContainer<OrderedFloat<f64>, Path<N>> = PriorityContainer::new();
        frontier.enqueue(OrderedFloat(0.0), Path::new(start));
        stats.enqueued += 1;

        tracing::debug!(time_budget_ms = budget.num_milliseconds(), "route search started");

        while let Ok(path) = frontier.dequeue_min() {
            if closed.contains(path.last_step()) {
                stats.stale_discarded += 1;
                continue;
            }

            stats.elapsed = self.clock.now() - started_at;

            if path.last_step() == destination {
                tracing::debug!(
                    total_cost = path.total_cost(),
                    steps = path.len(),
                    expanded = stats.expanded,
                    stale_discarded = stats.stale_discarded,
                    "route found"
                );
                return SearchResult {
                    outcome: SearchOutcome::Found(path),
                    stats,
                };
            }

            if stats.elapsed > budget {
                tracing::warn!(
                    expanded = stats.expanded,
                    frontier = frontier.len(),
                    elapsed_ms = stats.elapsed.num_milliseconds(),
                    "route search cancelled: time budget exceeded"
                );
                self.notify_cancelled();
                return SearchResult {
                    outcome: SearchOutcome::Cancelled,
                    stats,
                };
            }

            let current = path.last_step();
            closed.insert(current.clone());
            stats.expanded += 1;

            for neighbour in current.neighbours() {
                let step_cost = distance(current, &neighbour);
                let priority = path.total_cost() + step_cost + estimate(&neighbour);
                frontier.enqueue(OrderedFloat(priority), path.add_step(neighbour, step_cost));
                stats.enqueued += 1;
            }
        }

        stats.elapsed = self.clock.now() - started_at;
        tracing::debug!(
            expanded = stats.expanded,
            enqueued = stats.enqueued,
            "route search exhausted without reaching destination"
        );
        SearchResult {
            outcome: SearchOutcome::Exhausted,
            stats,
        }
    }

    fn notify_cancelled(&self) {
        self.notifier
            .notify(&format!("{} seconds passed", self.config.time_budget_secs));
        self.notifier.notify("Route calculation stopped");
        self.notifier.notify("Try some closer location");
    }
}

/// Run a search with the default configuration, system clock and `tracing`
/// notifications.
pub fn find_path<N, D, E>(start: N, destination: &N, distance: D, estimate: E) -> SearchResult<N>
where
    N: HasNeighbours + Eq + Hash + Clone,
    D: FnMut(&N, &N) -> f64,
    E: FnMut(&N) -> f64,
{
    PathFinder::default().find_path(start, destination, distance, estimate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
