//! # voyage-core — Route Search Engine
//!
//! A best-first (A*) search over implicit graphs whose edges are discovered
//! lazily. The engine knows nothing about what a node is: neighbours come from
//! the [`HasNeighbours`] capability, and edge costs and heuristic estimates
//! come from caller-supplied closures. The same engine searches terrain grids,
//! road networks, or any other connectivity structure.
//!
//! ## Building Blocks
//!
//! - [`PriorityContainer`] — ordered multi-map from priority to a FIFO queue
//!   of values. Equal priorities dequeue in insertion order.
//! - [`Path`] — persistent singly-linked route. Extending a path shares the
//!   tail instead of copying it, so thousands of in-flight candidates can
//!   share one long prefix.
//! - [`PathFinder`] — the A* loop. Stale frontier entries are tolerated and
//!   discarded at dequeue time by the closed-set check, which replaces a
//!   decrease-key operation.
//!
//! ## Outcomes
//!
//! A search ends in one of three [`SearchOutcome`] variants: `Found`,
//! `Exhausted` (destination unreachable) or `Cancelled` (time budget spent).
//! The two negative outcomes are ordinary results, not errors.
//!
//! ```
//! use voyage_core::{find_path, HasNeighbours};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Stop(u32);
//!
//! impl HasNeighbours for Stop {
//!     type Neighbours = Vec<Stop>;
//!     fn neighbours(&self) -> Vec<Stop> {
//!         if self.0 < 5 { vec![Stop(self.0 + 1)] } else { vec![] }
//!     }
//! }
//!
//! let result = find_path(Stop(0), &Stop(3), |_, _| 1.0, |_| 0.0);
//! let path = result.outcome.into_path().expect("route exists");
//! assert_eq!(path.total_cost(), 3.0);
//! assert_eq!(path.to_route(), vec![Stop(0), Stop(1), Stop(2), Stop(3)]);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod notify;
pub mod path;
pub mod queue;
pub mod search;

// Re-export primary types.
pub use clock::{Clock, SystemClock};
pub use config::SearchConfig;
pub use error::{ConfigError, EmptyContainerError, VoyageError};
pub use notify::{Notifier, TracingNotifier};
pub use path::{Path, Steps};
pub use queue::PriorityContainer;
pub use search::{find_path, HasNeighbours, PathFinder, SearchOutcome, SearchResult, SearchStats};
