//! # Search Configuration
//!
//! Tunables for a route search, loadable from YAML:
//!
//! ```yaml
//! time_budget_secs: 2.5
//! ```
//!
//! Missing fields fall back to their defaults. Unknown fields are rejected so
//! that a misspelled key does not silently leave the default in place.

use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default wall-clock budget for a single search.
pub const DEFAULT_TIME_BUDGET_SECS: f64 = 10.0;

/// Configuration for [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Seconds a search may run before it is cancelled. Zero cancels as soon
    /// as the clock moves, unless the start is the destination.
    pub time_budget_secs: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Replace the time budget.
    pub fn with_time_budget_secs(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    /// Check that the budget is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_budget_secs.is_finite() || self.time_budget_secs < 0.0 {
            return Err(ConfigError::InvalidTimeBudget(self.time_budget_secs));
        }
        Ok(())
    }

    /// The budget as a duration, at millisecond resolution.
    ///
    /// A negative or NaN budget reads as zero. A budget too large for
    /// `TimeDelta`, infinity included, reads as `TimeDelta::MAX`.
    /// [`validate`](Self::validate) rejects the non-finite and negative cases
    /// up front.
    pub fn time_budget(&self) -> TimeDelta {
        let millis = (self.time_budget_secs * 1000.0).round();
        if millis.is_nan() || millis <= 0.0 {
            return TimeDelta::zero();
        }
        TimeDelta::try_milliseconds(millis as i64).unwrap_or(TimeDelta::MAX)
    }
}
