use core::fmt;

use itertools::Itertools;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astar::AStarSearch;
use crate::cell::{Cell, Offset, MOORE_OFFSETS};
use crate::error::{Endpoint, Error, Result};
use crate::path::PathResult;
use crate::FxIndexSet;

/// Plain description of a grid as handed over by a caller or renderer. Turned into a validated
/// [GridWorld] with [GridWorld::new].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpecification {
    pub width: i32,
    pub height: i32,
    pub start: Cell,
    pub destination: Cell,
    pub obstacles: FxIndexSet<Cell>,
    pub directions: Vec<Offset>,
}

impl GridSpecification {
    /// An obstacle-free grid using 8-directional movement.
    pub fn new(width: i32, height: i32, start: Cell, destination: Cell) -> GridSpecification {
        GridSpecification {
            width,
            height,
            start,
            destination,
            obstacles: FxIndexSet::default(),
            directions: MOORE_OFFSETS.to_vec(),
        }
    }

    pub fn with_obstacles<I: IntoIterator<Item = Cell>>(mut self, obstacles: I) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Blocks the `w` by `h` rectangle whose top-left corner is `(x, y)`.
    pub fn with_obstacle_rect(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.obstacles
            .extend((x..x + w).cartesian_product(y..y + h).map(Cell::from));
        self
    }

    /// Replaces the movement offsets. Repeated offsets are dropped.
    pub fn with_directions<I: IntoIterator<Item = Offset>>(mut self, directions: I) -> Self {
        self.directions = directions.into_iter().unique().collect();
        self
    }
}

/// Immutable, validated grid. Obstacles are stored densely, indexed by the linearized cell
/// coordinate `y * width + x`. If the movement offsets are symmetric, connected components of
/// passable cells are precomputed with a [UnionFind] so that searches between disconnected cells
/// can be rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width: i32,
    height: i32,
    start: Cell,
    destination: Cell,
    obstacles: FxIndexSet<Cell>,
    directions: Vec<Offset>,
    blocked: Vec<bool>,
    components: Option<UnionFind<usize>>,
}

impl GridWorld {
    pub fn new(spec: GridSpecification) -> Result<GridWorld> {
        let GridSpecification {
            width,
            height,
            start,
            destination,
            obstacles,
            directions,
        } = spec;
        if width <= 0 || height <= 0 {
            return Err(Error::ZeroDimension { width, height });
        }
        let mut grid = GridWorld {
            width,
            height,
            start,
            destination,
            obstacles: FxIndexSet::default(),
            directions: directions.into_iter().unique().collect(),
            blocked: vec![false; width as usize * height as usize],
            components: None,
        };
        for obstacle in obstacles {
            match grid.index(&obstacle) {
                Some(ix) => {
                    grid.blocked[ix] = true;
                    grid.obstacles.insert(obstacle);
                }
                None => debug!("Ignoring obstacle {} outside the grid", obstacle),
            }
        }
        for (role, cell) in [(Endpoint::Start, start), (Endpoint::Destination, destination)] {
            if !grid.in_bounds(&cell) {
                return Err(Error::OutOfBounds { role, cell });
            }
            if !grid.is_passable(&cell) {
                return Err(Error::Blocked { role, cell });
            }
        }
        if grid.symmetric_directions() {
            grid.generate_components();
        } else {
            info!("Movement offsets are asymmetric: skipping component generation");
        }
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn destination(&self) -> Cell {
        self.destination
    }
    pub fn directions(&self) -> &[Offset] {
        &self.directions
    }
    /// The in-bounds obstacles, in the order they were specified.
    pub fn obstacles(&self) -> impl Iterator<Item = &Cell> {
        self.obstacles.iter()
    }
    /// Total number of cells, passable or not.
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Linearized index of `cell`, or [None] if it lies outside the grid.
    pub fn index(&self, cell: &Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// True iff `cell` is inside the grid and not an obstacle.
    pub fn is_passable(&self, cell: &Cell) -> bool {
        self.index(cell).map_or(false, |ix| !self.blocked[ix])
    }

    /// Passable neighbours of `cell` under the grid's movement offsets. Offsets that would
    /// overflow the coordinate range lead nowhere.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.directions
            .iter()
            .filter_map(move |&offset| cell.checked_add(offset))
            .filter(move |n| self.is_passable(n))
    }

    /// All passable cells, ordered by `x` and then by `y`.
    pub fn passable_cells(&self) -> Vec<Cell> {
        (0..self.width)
            .cartesian_product(0..self.height)
            .map(Cell::from)
            .filter(|c| self.is_passable(c))
            .collect()
    }

    fn symmetric_directions(&self) -> bool {
        self.directions
            .iter()
            .all(|&(dx, dy)| match (dx.checked_neg(), dy.checked_neg()) {
                (Some(rx), Some(ry)) => self.directions.contains(&(rx, ry)),
                _ => false,
            })
    }

    /// Links every passable cell to its passable neighbours in a fresh [UnionFind].
    fn generate_components(&mut self) {
        debug!("Generating connected components");
        let mut components = UnionFind::new(self.cell_count());
        for cell in self.passable_cells() {
            let Some(ix) = self.index(&cell) else {
                continue;
            };
            for n in self.neighbours(cell) {
                if let Some(n_ix) = self.index(&n) {
                    components.union(ix, n_ix);
                }
            }
        }
        self.components = Some(components);
    }

    /// Checks whether `goal` is known to be unreachable from `start`. Impassable endpoints are
    /// always unreachable. Without precomputed components only that check is made.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if !self.is_passable(start) || !self.is_passable(goal) {
            return true;
        }
        match (&self.components, self.index(start), self.index(goal)) {
            (Some(components), Some(s), Some(g)) => !components.equiv(s, g),
            _ => false,
        }
    }

    /// Whether connected components were generated for this grid.
    pub fn has_components(&self) -> bool {
        self.components.is_some()
    }

    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Plain description of this grid, e.g. for handing to a renderer.
    pub fn specification(&self) -> GridSpecification {
        GridSpecification {
            width: self.width,
            height: self.height,
            start: self.start,
            destination: self.destination,
            obstacles: self.obstacles.clone(),
            directions: self.directions.clone(),
        }
    }

    /// Runs A* from the grid's start to its destination.
    pub fn shortest_path(&self) -> PathResult {
        AStarSearch::new(self)
            .find_path(self.start, self.destination)
            .into()
    }

    /// ASCII map with the cells of `path` marked by `*`.
    pub fn render_path(&self, path: &PathResult) -> String {
        let on_path: FxIndexSet<Cell> = path.cells.iter().copied().collect();
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let c = Cell::new(x, y);
                out.push(if c == self.start {
                    'S'
                } else if c == self.destination {
                    'G'
                } else if !self.is_passable(&c) {
                    '#'
                } else if on_path.contains(&c) {
                    '*'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl TryFrom<GridSpecification> for GridWorld {
    type Error = Error;

    fn try_from(spec: GridSpecification) -> Result<GridWorld> {
        GridWorld::new(spec)
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_path(&PathResult::not_found()))
    }
}
