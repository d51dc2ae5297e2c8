//! # Route Subcommand
//!
//! Plans a route across a terrain map and prints the result as JSON.
//!
//! ```bash
//! voyage route maps/crater.txt --from 0,0 --to 14,9 --diagonal
//! voyage --config search.yaml route maps/crater.txt --from 0,0 --to 14,9
//! ```
//!
//! Exit codes: 0 when a route is found, 1 when the destination is
//! unreachable or the time budget runs out, 2 on operational error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use voyage_core::{Clock, Notifier, PathFinder, SearchConfig, SearchOutcome, SearchResult};

use crate::grid::{Cell, Coord, GridMap};

/// Arguments for the `voyage route` subcommand.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Path to the terrain map.
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Start position as X,Y.
    #[arg(long, value_name = "X,Y")]
    pub from: Coord,

    /// Destination as X,Y.
    #[arg(long, value_name = "X,Y")]
    pub to: Coord,

    /// Allow diagonal moves.
    #[arg(long)]
    pub diagonal: bool,

    /// Override the search time budget (seconds).
    #[arg(long, value_name = "SECS")]
    pub time_budget: Option<f64>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

/// How the search ended, as written in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOutcome {
    /// A route reached the destination.
    Found,
    /// The destination is unreachable.
    Exhausted,
    /// The time budget ran out.
    Cancelled,
}

/// JSON report printed by `voyage route`.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    /// How the search ended.
    pub outcome: RouteOutcome,
    /// Total route cost, when a route was found.
    pub total_cost: Option<f64>,
    /// Route in travel order as `[x, y]` pairs. Empty without a route.
    pub route: Vec<[usize; 2]>,
    /// Search statistics.
    pub stats: StatsReport,
}

/// Search statistics in the JSON report.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Cells closed and expanded.
    pub expanded: usize,
    /// Candidate routes queued, the start included.
    pub enqueued: usize,
    /// Queued routes dropped because their cell was already closed.
    pub stale_discarded: usize,
    /// Search wall-clock time in milliseconds.
    pub elapsed_ms: i64,
}

impl RouteReport {
    /// Summarise a grid search result.
    pub fn from_result(result: &SearchResult<Cell>) -> Self {
        let (outcome, total_cost, route) = match &result.outcome {
            SearchOutcome::Found(path) => {
                let route = path
                    .to_route()
                    .iter()
                    .map(|cell| [cell.coord().x, cell.coord().y])
                    .collect();
                (RouteOutcome::Found, Some(path.total_cost()), route)
            }
            SearchOutcome::Exhausted => (RouteOutcome::Exhausted, None, Vec::new()),
            SearchOutcome::Cancelled => (RouteOutcome::Cancelled, None, Vec::new()),
        };
        Self {
            outcome,
            total_cost,
            route,
            stats: StatsReport {
                expanded: result.stats.expanded,
                enqueued: result.stats.enqueued,
                stale_discarded: result.stats.stale_discarded,
                elapsed_ms: result.stats.elapsed.num_milliseconds(),
            },
        }
    }

    /// Exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            RouteOutcome::Found => 0,
            RouteOutcome::Exhausted | RouteOutcome::Cancelled => 1,
        }
    }
}

/// Search `map` from `from` to `to` with Euclidean step costs scaled by
/// terrain, guided by straight-line distance to the destination.
pub fn plan_route<C: Clock, T: Notifier>(
    finder: &PathFinder<C, T>,
    map: Arc<GridMap>,
    from: Coord,
    to: Coord,
) -> Result<SearchResult<Cell>> {
    let start = endpoint(&map, from, "start")?;
    let destination = endpoint(&map, to, "destination")?;

    Ok(finder.find_path(
        start,
        &destination,
        |a, b| a.step_cost(b),
        |cell| cell.euclidean(to),
    ))
}

fn endpoint(map: &Arc<GridMap>, coord: Coord, role: &str) -> Result<Cell> {
    let Some(cell) = GridMap::cell(map, coord) else {
        bail!(
            "{role} {coord} is outside the {}x{} map",
            map.width(),
            map.height()
        );
    };
    if !cell.terrain().is_passable() {
        bail!("{role} {coord} is impassable terrain");
    }
    Ok(cell)
}

/// Load the search configuration, applying the command-line override.
pub fn resolve_config(config_path: Option<&Path>, time_budget: Option<f64>) -> Result<SearchConfig> {
    let mut config = match config_path {
        Some(path) => SearchConfig::from_path(path)
            .with_context(|| format!("failed to load search config: {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(secs) = time_budget {
        config = config.with_time_budget_secs(secs);
        config.validate().context("invalid --time-budget")?;
    }
    Ok(config)
}

/// Execute the route subcommand.
///
/// Returns exit code: 0 when a route is found, 1 otherwise.
pub fn run_route(args: &RouteArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = resolve_config(config_path, args.time_budget)?;
    let map = Arc::new(GridMap::from_path(&args.map)?.with_diagonal(args.diagonal));

    tracing::info!(
        map = %args.map.display(),
        width = map.width(),
        height = map.height(),
        from = %args.from,
        to = %args.to,
        "planning route"
    );

    let finder = PathFinder::try_new(config)?;
    let result = plan_route(&finder, map, args.from, args.to)?;
    let report = RouteReport::from_result(&result);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(report.exit_code())
}
