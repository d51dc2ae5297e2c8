//! # Path Chains
//!
//! A route is stored back to front: each link holds the step just taken,
//! the accumulated cost, and a shared handle to the route that led there.
//! Extending a path allocates exactly one link and never touches the tail,
//! so every candidate in the search frontier shares its prefix with its
//! siblings. The links form a tree rooted at the start node, never a cycle.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Immutable, structurally shared route ending at [`last_step`](Path::last_step).
///
/// Cloning a `Path` copies one pointer.
pub struct Path<N> {
    head: Arc<Link<N>>,
}

struct Link<N> {
    last_step: N,
    previous: Option<Path<N>>,
    total_cost: f64,
    len: usize,
}

impl<N> Path<N> {
    /// A route consisting only of `start`, at zero cost.
    pub fn new(start: N) -> Self {
        Self {
            head: Arc::new(Link {
                last_step: start,
                previous: None,
                total_cost: 0.0,
                len: 1,
            }),
        }
    }

    /// Return a new path that continues this one to `step`.
    ///
    /// `self` is left untouched. `step_cost` is added as given; the engine
    /// relies on callers to supply non-negative costs.
    pub fn add_step(&self, step: N, step_cost: f64) -> Self {
        Self {
            head: Arc::new(Link {
                last_step: step,
                previous: Some(self.clone()),
                total_cost: self.head.total_cost + step_cost,
                len: self.head.len + 1,
            }),
        }
    }

    /// The most recently visited node.
    pub fn last_step(&self) -> &N {
        &self.head.last_step
    }

    /// The route up to, but excluding, the last step. `None` at the origin.
    pub fn previous(&self) -> Option<&Path<N>> {
        self.head.previous.as_ref()
    }

    /// Cumulative cost from the origin to the last step.
    pub fn total_cost(&self) -> f64 {
        self.head.total_cost
    }

    /// Number of nodes on the route, origin included.
    pub fn len(&self) -> usize {
        self.head.len
    }

    /// Always false: a path contains at least its origin.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Nodes from the last step back to the origin.
    pub fn iter(&self) -> Steps<'_, N> {
        Steps {
            next: Some(self),
            remaining: self.len(),
        }
    }

    /// Nodes in travel order, origin first.
    pub fn to_route(&self) -> Vec<N>
    where
        N: Clone,
    {
        let mut route: Vec<N> = self.iter().cloned().collect();
        route.reverse();
        route
    }
}

impl<N> Clone for Path<N> {
    fn clone(&self) -> Self {
        Self {
            head: Arc::clone(&self.head),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("total_cost", &self.total_cost())
            .field("steps", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, N> IntoIterator for &'a Path<N> {
    type Item = &'a N;
    type IntoIter = Steps<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Unlink iteratively so dropping a long, exclusively owned chain does not
// recurse once per link.
impl<N> Drop for Link<N> {
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(path) = previous {
            match Arc::try_unwrap(path.head) {
                Ok(mut link) => previous = link.previous.take(),
                Err(_) => break,
            }
        }
    }
}

/// Lazy reverse-order walk over a [`Path`], produced by [`Path::iter`].
pub struct Steps<'a, N> {
    next: Option<&'a Path<N>>,
    remaining: usize,
}

impl<'a, N> Iterator for Steps<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.next?;
        self.next = path.previous();
        self.remaining -= 1;
        Some(path.last_step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N> ExactSizeIterator for Steps<'_, N> {}

impl<N> FusedIterator for Steps<'_, N> {}
