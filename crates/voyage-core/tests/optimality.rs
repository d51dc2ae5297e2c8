//! # Optimality Integration Tests
//!
//! Compares A* routes against brute-force baselines on synthetic graphs:
//! Bellman-Ford relaxation over weighted digraphs, and breadth-first search
//! over unit-cost grids with a Manhattan estimate.

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use proptest::prelude::*;
use voyage_core::{find_path, HasNeighbours, Path, SearchOutcome};

// ---------------------------------------------------------------------------
// Weighted digraph fixture
// ---------------------------------------------------------------------------

/// Dense weight matrix; `None` means no edge.
type Weights = Vec<Vec<Option<u32>>>;

#[derive(Clone)]
struct Node {
    id: usize,
    weights: Arc<Weights>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.id)
    }
}

impl HasNeighbours for Node {
    type Neighbours = Vec<Node>;

    fn neighbours(&self) -> Vec<Node> {
        self.weights[self.id]
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_some())
            .map(|(id, _)| Node {
                id,
                weights: Arc::clone(&self.weights),
            })
            .collect()
    }
}

fn node(weights: &Arc<Weights>, id: usize) -> Node {
    Node {
        id,
        weights: Arc::clone(weights),
    }
}

fn edge_cost(from: &Node, to: &Node) -> f64 {
    from.weights[from.id][to.id].map(f64::from).unwrap_or(f64::INFINITY)
}

/// Shortest distances from `source` by repeated relaxation of every edge.
fn bellman_ford(weights: &Weights, source: usize) -> Vec<Option<u64>> {
    let n = weights.len();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    dist[source] = Some(0);
    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            let Some(base) = dist[from] else { continue };
            for (to, w) in weights[from].iter().enumerate() {
                if let Some(w) = w {
                    let candidate = base + u64::from(*w);
                    if dist[to].map_or(true, |d| candidate < d) {
                        dist[to] = Some(candidate);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

fn route_cost(path: &Path<Node>) -> f64 {
    let route = path.to_route();
    route.windows(2).map(|pair| edge_cost(&pair[0], &pair[1])).sum()
}

fn weights_strategy() -> impl Strategy<Value = Weights> {
    (2usize..9).prop_flat_map(|n| {
        proptest::collection::vec(
            proptest::collection::vec(proptest::option::weighted(0.35, 0u32..20), n),
            n,
        )
    })
}

// ---------------------------------------------------------------------------
// Grid fixture
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Grid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

#[derive(Clone)]
struct Cell {
    x: usize,
    y: usize,
    grid: Arc<Grid>,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y) == (other.x, other.y)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y).hash(state);
    }
}

impl HasNeighbours for Cell {
    type Neighbours = Vec<Cell>;

    fn neighbours(&self) -> Vec<Cell> {
        let grid = &self.grid;
        let mut out = Vec::with_capacity(4);
        let candidates = [
            (self.x.checked_sub(1), Some(self.y)),
            (Some(self.x + 1), Some(self.y)),
            (Some(self.x), self.y.checked_sub(1)),
            (Some(self.x), Some(self.y + 1)),
        ];
        for (x, y) in candidates {
            let (Some(x), Some(y)) = (x, y) else { continue };
            if x < grid.width && y < grid.height && !grid.blocked[y * grid.width + x] {
                out.push(Cell {
                    x,
                    y,
                    grid: Arc::clone(grid),
                });
            }
        }
        out
    }
}

fn bfs_steps(grid: &Grid, start: (usize, usize), goal: (usize, usize)) -> Option<usize> {
    let mut seen = vec![false; grid.width * grid.height];
    let mut queue = VecDeque::from([(start, 0usize)]);
    seen[start.1 * grid.width + start.0] = true;
    while let Some(((x, y), steps)) = queue.pop_front() {
        if (x, y) == goal {
            return Some(steps);
        }
        let moves = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in moves {
            if nx < grid.width && ny < grid.height {
                let idx = ny * grid.width + nx;
                if !grid.blocked[idx] && !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(((nx, ny), steps + 1));
                }
            }
        }
    }
    None
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (2usize..9, 2usize..9).prop_flat_map(|(width, height)| {
        proptest::collection::vec(proptest::bool::weighted(0.3), width * height).prop_map(
            move |mut blocked| {
                // Keep the corners open so start and goal are always passable.
                blocked[0] = false;
                blocked[width * height - 1] = false;
                Grid {
                    width,
                    height,
                    blocked,
                }
            },
        )
    })
}

// ---------------------------------------------------------------------------
// Deterministic cases
// ---------------------------------------------------------------------------

#[test]
fn diamond_graph_takes_cheapest_branch() {
    let weights: Arc<Weights> = Arc::new(vec![
        vec![None, Some(4), Some(1), None],
        vec![None, None, None, Some(1)],
        vec![None, Some(1), None, Some(6)],
        vec![None, None, None, None],
    ]);
    let result = find_path(node(&weights, 0), &node(&weights, 3), edge_cost, |_| 0.0);
    let path = result.outcome.into_path().expect("route exists");

    let ids: Vec<usize> = path.to_route().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 2, 1, 3]);
    assert_eq!(path.total_cost(), 3.0);
}

#[test]
fn two_node_graph_without_edges_is_exhausted() {
    let weights: Arc<Weights> = Arc::new(vec![vec![None, None], vec![Some(1), None]]);
    let result = find_path(node(&weights, 0), &node(&weights, 1), edge_cost, |_| 0.0);
    assert!(matches!(result.outcome, SearchOutcome::Exhausted));
}

#[test]
fn open_grid_route_matches_manhattan_distance() {
    let grid = Arc::new(Grid {
        width: 6,
        height: 4,
        blocked: vec![false; 24],
    });
    let start = Cell { x: 0, y: 0, grid: Arc::clone(&grid) };
    let goal = Cell { x: 5, y: 3, grid: Arc::clone(&grid) };
    let (gx, gy) = (goal.x, goal.y);

    let result = find_path(start, &goal, |_, _| 1.0, |c: &Cell| (c.x.abs_diff(gx) + c.y.abs_diff(gy)) as f64);

    let path = result.outcome.path().expect("route exists");
    assert_eq!(path.total_cost(), 8.0);
    assert_eq!(path.len(), 9);
    // Every cell ties at f = 8, so FIFO order expands them breadth-first and
    // the goal, the farthest cell, is dequeued after all 23 others.
    assert_eq!(result.stats.expanded, 23);
}

#[test]
fn estimate_confines_expansion_to_optimal_band() {
    let grid = Arc::new(Grid {
        width: 6,
        height: 4,
        blocked: vec![false; 24],
    });
    let start = Cell { x: 0, y: 0, grid: Arc::clone(&grid) };
    let goal = Cell { x: 5, y: 0, grid: Arc::clone(&grid) };
    let (gx, gy) = (goal.x, goal.y);

    // Only row 0 has f = 5; every other cell has f >= 7.
    let guided = find_path(start.clone(), &goal, |_, _| 1.0, |c: &Cell| (c.x.abs_diff(gx) + c.y.abs_diff(gy)) as f64);
    let blind = find_path(start, &goal, |_, _| 1.0, |_| 0.0);

    assert_eq!(guided.outcome.path().map(Path::total_cost), Some(5.0));
    assert_eq!(guided.stats.expanded, 5);
    assert!(blind.stats.expanded > guided.stats.expanded);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn astar_matches_bellman_ford(weights in weights_strategy(), source_pick in any::<prop::sample::Index>(), target_pick in any::<prop::sample::Index>()) {
        let n = weights.len();
        let source = source_pick.index(n);
        let target = target_pick.index(n);
        let expected = bellman_ford(&weights, source)[target];

        let weights = Arc::new(weights);
        let result = find_path(node(&weights, source), &node(&weights, target), edge_cost, |_| 0.0);

        match (expected, result.outcome) {
            (Some(best), SearchOutcome::Found(path)) => {
                prop_assert_eq!(path.total_cost(), best as f64);
                prop_assert_eq!(route_cost(&path), best as f64);
                prop_assert_eq!(path.last_step().id, target);
                prop_assert_eq!(path.to_route()[0].id, source);
            }
            (None, SearchOutcome::Exhausted) => {}
            (expected, outcome) => {
                prop_assert!(false, "expected {:?}, got {:?}", expected, outcome.path().map(Path::total_cost));
            }
        }
    }

    #[test]
    fn astar_with_manhattan_matches_bfs(grid in grid_strategy()) {
        let grid = Arc::new(grid);
        let goal_xy = (grid.width - 1, grid.height - 1);
        let expected = bfs_steps(&grid, (0, 0), goal_xy);

        let start = Cell { x: 0, y: 0, grid: Arc::clone(&grid) };
        let goal = Cell { x: goal_xy.0, y: goal_xy.1, grid: Arc::clone(&grid) };
        let estimate = |c: &Cell| (c.x.abs_diff(goal_xy.0) + c.y.abs_diff(goal_xy.1)) as f64;
        let result = find_path(start, &goal, |_, _| 1.0, estimate);

        match (expected, result.outcome.path()) {
            (Some(steps), Some(path)) => {
                prop_assert_eq!(path.total_cost(), steps as f64);
                prop_assert_eq!(path.len(), steps + 1);
            }
            (None, None) => prop_assert!(matches!(result.outcome, SearchOutcome::Exhausted)),
            (expected, found) => {
                prop_assert!(false, "expected {:?}, found {:?}", expected, found.map(Path::total_cost));
            }
        }
    }

    #[test]
    fn estimate_zero_and_manhattan_agree(grid in grid_strategy()) {
        let grid = Arc::new(grid);
        let goal_xy = (grid.width - 1, grid.height - 1);
        let start = Cell { x: 0, y: 0, grid: Arc::clone(&grid) };
        let goal = Cell { x: goal_xy.0, y: goal_xy.1, grid: Arc::clone(&grid) };

        let blind = find_path(start.clone(), &goal, |_, _| 1.0, |_| 0.0);
        let guided = find_path(start, &goal, |_, _| 1.0, |c: &Cell| (c.x.abs_diff(goal_xy.0) + c.y.abs_diff(goal_xy.1)) as f64);

        prop_assert_eq!(
            blind.outcome.path().map(Path::total_cost),
            guided.outcome.path().map(Path::total_cost)
        );
        prop_assert!(guided.stats.expanded <= blind.stats.expanded);
    }
}
