//! # waypoint_pathfinding
//!
//! Shortest paths on a 2-D grid with static obstacles, and optimization of routes through
//! several waypoints on such a grid.
//!
//! [AStarSearch] finds shortest paths with unit cost per move over the movement offsets of a
//! [GridWorld] (8-directional by default), using a Euclidean estimate scaled so that it never
//! overestimates. Searches between cells in different
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are rejected
//! without flood-filling.
//!
//! [GeneticOptimizer] searches for a sequence of waypoints whose route from start to destination,
//! one A* leg per pair of consecutive stops, is as short as possible, and stitches the best one
//! into a single [PathResult].
//!
//! ```
//! use waypoint_pathfinding::{Cell, GridSpecification, GridWorld};
//!
//! let spec = GridSpecification::new(5, 5, Cell::new(0, 0), Cell::new(4, 4));
//! let grid = GridWorld::new(spec).unwrap();
//! let path = grid.shortest_path();
//! assert_eq!(path.cost, 4);
//! ```
pub mod astar;
pub mod cell;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod grid_world;
pub mod heuristic;
pub mod path;

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

pub use astar::{find_path, AStarSearch};
pub use cell::{Cell, Offset, MOORE_OFFSETS, NEUMANN_OFFSETS};
pub use error::{Endpoint, Error, Result};
pub use fitness::FitnessEvaluator;
pub use genetic::{
    Chromosome, GenerationStats, GeneticConfig, GeneticOptimizer, RestartReport, Route,
};
pub use grid_world::{GridSpecification, GridWorld};
pub use heuristic::{Euclidean, Heuristic, Uninformed};
pub use path::{dedup_consecutive, is_contiguous, stitch, PathResult, Segment};
