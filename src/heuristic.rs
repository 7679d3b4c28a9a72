use crate::cell::{Cell, Offset};

/// Estimates the remaining cost between two cells. A search stays optimal as long as the
/// estimate never exceeds the true remaining cost.
pub trait Heuristic {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64;
}

/// Euclidean distance, divided by the geometric length of the longest allowed step.
///
/// Every move costs 1, so a single step covers at most `max_step` units of straight-line
/// distance and `distance / max_step` never overestimates. On an 8-grid the plain distance
/// does overestimate: `(0, 0)` to `(4, 4)` costs 4 moves but is `5.66` apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Euclidean {
    scale: f64,
}

impl Euclidean {
    /// The unscaled distance. Not admissible for diagonal movement.
    pub fn raw() -> Euclidean {
        Euclidean { scale: 1.0 }
    }

    /// Scaled so that it is admissible for unit-cost moves along `directions`.
    pub fn admissible_for(directions: &[Offset]) -> Euclidean {
        let max_step = directions
            .iter()
            .map(|&(dx, dy)| (dx as f64).hypot(dy as f64))
            .fold(0.0, f64::max);
        if max_step > 0.0 {
            Euclidean {
                scale: max_step.recip(),
            }
        } else {
            Euclidean::raw()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for Euclidean {
    fn default() -> Self {
        Euclidean::raw()
    }
}

impl Heuristic for Euclidean {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        from.distance(to) * self.scale
    }
}

/// Always estimates zero, which turns A* into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uninformed;

impl Heuristic for Uninformed {
    fn estimate(&self, _: &Cell, _: &Cell) -> f64 {
        0.0
    }
}
