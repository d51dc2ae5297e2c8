//! # Error Hierarchy
//!
//! Structured error types for the route search engine, built with `thiserror`.
//!
//! Only programmer errors and configuration failures live here. A search that
//! cannot reach its destination, or that runs out of time, reports that through
//! [`SearchOutcome`](crate::SearchOutcome) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for voyage-core.
#[derive(Error, Debug)]
pub enum VoyageError {
    /// A dequeue was attempted on an empty priority container.
    #[error(transparent)]
    EmptyContainer(#[from] EmptyContainerError),

    /// Search configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// `dequeue_min` was called on a [`PriorityContainer`](crate::PriorityContainer)
/// holding no values. Check `is_empty()` first.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("priority container is empty")]
pub struct EmptyContainerError;

/// Errors while loading or validating a [`SearchConfig`](crate::SearchConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid YAML for `SearchConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The time budget is negative, NaN or infinite.
    #[error("invalid time budget: {0} seconds (expected a finite, non-negative number)")]
    InvalidTimeBudget(f64),
}
