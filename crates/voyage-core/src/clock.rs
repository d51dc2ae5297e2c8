//! # Clock
//!
//! Time source for the search budget. The engine never reads the system time
//! directly, so tests can drive cancellation deterministically.

use chrono::{DateTime, Utc};

/// Supplies the current time to the search loop.
pub trait Clock {
    /// The current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
