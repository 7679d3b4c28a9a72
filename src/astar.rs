//! Best-first shortest path search over a [GridWorld]. Based on the structure of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html):
//! a binary heap that may hold several entries for one cell, with outdated entries skipped when
//! popped, and a parents map from which the path is reconstructed.
use log::{info, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::Cell;
use crate::grid_world::GridWorld;
use crate::heuristic::{Euclidean, Heuristic};
use crate::FxIndexMap;

/// Best known cost-so-far (`g`) and estimated total cost (`f`) per cell, indexed by the
/// linearized cell coordinate. Allocated for a single search and dropped with it.
pub(crate) struct ScoreTable {
    g: Vec<f64>,
    f: Vec<f64>,
}

impl ScoreTable {
    pub(crate) fn new(cell_count: usize) -> ScoreTable {
        ScoreTable {
            g: vec![f64::INFINITY; cell_count],
            f: vec![f64::INFINITY; cell_count],
        }
    }

    pub(crate) fn g(&self, ix: usize) -> f64 {
        self.g[ix]
    }

    pub(crate) fn f(&self, ix: usize) -> f64 {
        self.f[ix]
    }

    pub(crate) fn set(&mut self, ix: usize, g: f64, f: f64) {
        self.g[ix] = g;
        self.f[ix] = f;
    }
}

struct OpenEntry {
    estimated_cost: f64,
    cost: f64,
    cell: Cell,
    index: usize,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimated cost first, then the smallest cell.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.cell.cmp(&self.cell),
            s => s,
        }
    }
}

fn reverse_path(parents: &FxIndexMap<Cell, usize>, start: usize) -> Vec<Cell> {
    let mut path: Vec<Cell> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(&cell, &parent)| {
            *i = parent;
            cell
        })
    })
    .collect();
    path.reverse();
    path
}

/// A* over a borrowed [GridWorld] with unit cost per move. Holds no search state between calls,
/// so one instance can serve many concurrent searches.
#[derive(Clone, Debug)]
pub struct AStarSearch<'a, H = Euclidean> {
    grid: &'a GridWorld,
    heuristic: H,
}

impl<'a> AStarSearch<'a, Euclidean> {
    /// Uses the Euclidean heuristic scaled to the grid's movement offsets.
    pub fn new(grid: &'a GridWorld) -> Self {
        AStarSearch {
            grid,
            heuristic: Euclidean::admissible_for(grid.directions()),
        }
    }
}

impl<'a, H: Heuristic> AStarSearch<'a, H> {
    pub fn with_heuristic(grid: &'a GridWorld, heuristic: H) -> Self {
        AStarSearch { grid, heuristic }
    }

    pub fn grid(&self) -> &'a GridWorld {
        self.grid
    }

    /// Computes a shortest path from `start` to `goal`, both included. Returns [None] if the goal
    /// cannot be reached or either endpoint is not passable.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        let grid = self.grid;
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let start_ix = grid.index(&start)?;

        let mut scores = ScoreTable::new(grid.cell_count());
        let h = self.heuristic.estimate(&start, &goal);
        scores.set(start_ix, 0.0, h);

        let mut parents: FxIndexMap<Cell, usize> = FxIndexMap::default();
        parents.insert(start, usize::MAX);
        let mut to_see = BinaryHeap::new();
        to_see.push(OpenEntry {
            estimated_cost: h,
            cost: 0.0,
            cell: start,
            index: 0,
        });

        while let Some(OpenEntry {
            cost, cell, index, ..
        }) = to_see.pop()
        {
            if cell == goal {
                return Some(reverse_path(&parents, index));
            }
            let Some(ix) = grid.index(&cell) else {
                continue;
            };
            // A better way to reach this cell was found after this entry was pushed.
            if cost > scores.g(ix) {
                continue;
            }
            for neighbour in grid.neighbours(cell) {
                let Some(n_ix) = grid.index(&neighbour) else {
                    continue;
                };
                let new_cost = cost + 1.0;
                if new_cost < scores.g(n_ix) {
                    let h = self.heuristic.estimate(&neighbour, &goal);
                    scores.set(n_ix, new_cost, new_cost + h);
                    let (n, _) = parents.insert_full(neighbour, index);
                    to_see.push(OpenEntry {
                        estimated_cost: scores.f(n_ix),
                        cost: new_cost,
                        cell: neighbour,
                        index: n,
                    });
                }
            }
        }
        if grid.has_components() {
            warn!("Reachable goal could not be pathed to, is the component map correct?");
        }
        None
    }

    /// Number of moves on a shortest path, or [None] if there is none.
    pub fn path_cost(&self, start: Cell, goal: Cell) -> Option<usize> {
        self.find_path(start, goal).map(|path| path.len() - 1)
    }
}

/// Shortest path on `grid` using the default heuristic.
pub fn find_path(grid: &GridWorld, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    AStarSearch::new(grid).find_path(start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::NEUMANN_OFFSETS;
    use crate::grid_world::GridSpecification;
    use crate::heuristic::Uninformed;

    fn grid(spec: GridSpecification) -> GridWorld {
        GridWorld::new(spec).unwrap()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let g = grid(GridSpecification::new(1, 1, Cell::new(0, 0), Cell::new(0, 0)));
        let path = find_path(&g, g.start(), g.destination()).unwrap();
        assert_eq!(path, vec![Cell::new(0, 0)]);
    }

    /// Asserts that the optimal 4 step all-diagonal solution is found.
    #[test]
    fn solve_open_grid() {
        let g = grid(GridSpecification::new(5, 5, Cell::new(0, 0), Cell::new(4, 4)));
        let path = find_path(&g, g.start(), g.destination()).unwrap();
        assert_eq!(path.len() - 1, 4);
        assert_eq!(
            path,
            (0..5).map(|k| Cell::new(k, k)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn solve_open_grid_without_diagonals() {
        let g = grid(
            GridSpecification::new(5, 5, Cell::new(0, 0), Cell::new(4, 4))
                .with_directions(NEUMANN_OFFSETS),
        );
        assert_eq!(AStarSearch::new(&g).path_cost(g.start(), g.destination()), Some(8));
    }

    /// A full-width wall on row 5 with a single gap at x = 7. Every route has to cross row 5
    /// there: 6 moves to reach the gap and 3 more to the goal.
    #[test]
    fn routes_through_gap() {
        let mut spec = GridSpecification::new(10, 10, Cell::new(1, 2), Cell::new(7, 8))
            .with_obstacle_rect(0, 5, 10, 1);
        spec.obstacles.shift_remove(&Cell::new(7, 5));
        let g = grid(spec);
        let path = find_path(&g, g.start(), g.destination()).unwrap();
        assert!(path.contains(&Cell::new(7, 5)));
        assert_eq!(path.len() - 1, 9);
    }

    /// A wall of four cells on row 5 (x = 3..=6). The only 6 move route is the pure diagonal,
    /// which runs into the wall at (4, 5); crossing at (2, 5) costs 3 + 5 moves.
    #[test]
    fn walks_around_wall() {
        let g = grid(
            GridSpecification::new(10, 10, Cell::new(1, 2), Cell::new(7, 8))
                .with_obstacle_rect(3, 5, 4, 1),
        );
        let path = find_path(&g, g.start(), g.destination()).unwrap();
        assert_eq!(path.len() - 1, 8);
        assert!(path.iter().all(|c| g.is_passable(c)));
    }

    /// The goal is walled in completely:
    /// |S...|
    /// |.###|
    /// |.#G#|
    /// |.###|
    #[test]
    fn enclosed_goal() {
        let ring = (1..4)
            .flat_map(|x| (1..4).map(move |y| Cell::new(x, y)))
            .filter(|c| *c != Cell::new(2, 2));
        let g = grid(
            GridSpecification::new(4, 4, Cell::new(0, 0), Cell::new(2, 2)).with_obstacles(ring),
        );
        assert!(find_path(&g, g.start(), g.destination()).is_none());
        assert!(g.shortest_path().cells.is_empty());
    }

    #[test]
    fn impassable_endpoints() {
        let g = grid(
            GridSpecification::new(3, 3, Cell::new(0, 0), Cell::new(2, 2))
                .with_obstacles([Cell::new(1, 1)]),
        );
        assert!(find_path(&g, Cell::new(0, 0), Cell::new(1, 1)).is_none());
        assert!(find_path(&g, Cell::new(-1, 0), Cell::new(2, 2)).is_none());
    }

    /// One-way movement cannot be checked with components, the frontier simply runs dry.
    #[test]
    fn asymmetric_directions() {
        let g = grid(
            GridSpecification::new(4, 1, Cell::new(0, 0), Cell::new(3, 0)).with_directions([(1, 0)]),
        );
        assert_eq!(find_path(&g, g.start(), g.destination()).map(|p| p.len()), Some(4));
        assert!(find_path(&g, g.destination(), g.start()).is_none());
    }

    #[test]
    fn matches_dijkstra() {
        let g = grid(
            GridSpecification::new(8, 8, Cell::new(0, 0), Cell::new(7, 7))
                .with_obstacle_rect(1, 0, 1, 7)
                .with_obstacle_rect(3, 1, 1, 7)
                .with_obstacle_rect(5, 0, 1, 7),
        );
        let astar = AStarSearch::new(&g).path_cost(g.start(), g.destination());
        let dijkstra =
            AStarSearch::with_heuristic(&g, Uninformed).path_cost(g.start(), g.destination());
        assert!(astar.is_some());
        assert_eq!(astar, dijkstra);
    }

    /// From (0, 0) to (1, 1) on a 4-grid both (1, 0) and (0, 1) have the same estimate; the
    /// lexicographically smaller (0, 1) is expanded first and ends up on the path.
    #[test]
    fn deterministic_tie_breaking() {
        let g = grid(
            GridSpecification::new(3, 3, Cell::new(0, 0), Cell::new(1, 1))
                .with_directions(NEUMANN_OFFSETS),
        );
        assert_eq!(
            find_path(&g, g.start(), g.destination()),
            Some(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)])
        );
        let g = grid(
            GridSpecification::new(3, 3, Cell::new(1, 1), Cell::new(0, 0))
                .with_directions(NEUMANN_OFFSETS),
        );
        assert_eq!(
            find_path(&g, g.start(), g.destination()),
            Some(vec![Cell::new(1, 1), Cell::new(0, 1), Cell::new(0, 0)])
        );
    }

    #[test]
    fn score_table_starts_infinite() {
        let mut scores = ScoreTable::new(4);
        assert!(scores.g(3).is_infinite() && scores.f(3).is_infinite());
        scores.set(3, 1.0, 2.5);
        assert_eq!((scores.g(3), scores.f(3)), (1.0, 2.5));
    }
}
