use crate::astar::AStarSearch;
use crate::cell::Cell;
use crate::grid_world::GridWorld;
use crate::heuristic::{Euclidean, Heuristic};
use crate::path::Segment;

/// Scores waypoint sequences by the total number of moves needed to visit them in order.
#[derive(Clone, Debug)]
pub struct FitnessEvaluator<'a, H = Euclidean> {
    search: AStarSearch<'a, H>,
}

impl<'a> FitnessEvaluator<'a, Euclidean> {
    pub fn new(grid: &'a GridWorld) -> Self {
        FitnessEvaluator {
            search: AStarSearch::new(grid),
        }
    }
}

impl<'a, H: Heuristic> FitnessEvaluator<'a, H> {
    pub fn with_search(search: AStarSearch<'a, H>) -> Self {
        FitnessEvaluator { search }
    }

    pub fn grid(&self) -> &'a GridWorld {
        self.search.grid()
    }

    /// The legs `start -> waypoints[0] -> ... -> waypoints[k-1] -> goal`, each searched
    /// independently.
    pub fn segments(&self, waypoints: &[Cell], start: Cell, goal: Cell) -> Vec<Segment> {
        let stops: Vec<Cell> = std::iter::once(start)
            .chain(waypoints.iter().copied())
            .chain(std::iter::once(goal))
            .collect();
        stops
            .windows(2)
            .map(|leg| Segment {
                from: leg[0],
                to: leg[1],
                path: self.search.find_path(leg[0], leg[1]),
            })
            .collect()
    }

    /// Sum of the moves over all legs. [f64::INFINITY] if any leg has no path, so such
    /// sequences are never preferred. Repeated waypoints contribute zero-move legs.
    pub fn fitness(&self, waypoints: &[Cell], start: Cell, goal: Cell) -> f64 {
        let mut stops = std::iter::once(&start)
            .chain(waypoints)
            .chain(std::iter::once(&goal))
            .peekable();
        let mut total = 0usize;
        while let Some(from) = stops.next() {
            let Some(to) = stops.peek() else {
                break;
            };
            match self.search.path_cost(*from, **to) {
                Some(cost) => total += cost,
                None => return f64::INFINITY,
            }
        }
        total as f64
    }

    /// [fitness](Self::fitness) between the grid's own start and destination.
    pub fn route_fitness(&self, waypoints: &[Cell]) -> f64 {
        let grid = self.grid();
        self.fitness(waypoints, grid.start(), grid.destination())
    }
}
