use core::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A movement offset `(dx, dy)` applied to a [Cell].
pub type Offset = (i32, i32);

/// The 8 unit offsets including diagonals, in the order the original grid configuration
/// lists them: the four cardinal moves followed by the four diagonal ones.
pub const MOORE_OFFSETS: [Offset; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// The 4 cardinal unit offsets.
pub const NEUMANN_OFFSETS: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// An integer grid coordinate. Ordering is lexicographic on `(x, y)`, which is what the
/// search uses to break ties between equally promising cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// `self` moved by `offset`, or [None] if either coordinate overflows.
    pub fn checked_add(self, (dx, dy): Offset) -> Option<Cell> {
        Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// The offset leading from `self` to `other`.
    pub fn delta(&self, other: &Cell) -> Offset {
        (other.x - self.x, other.y - self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Cell {
        Cell::new(x, y)
    }
}

impl Add<Offset> for Cell {
    type Output = Cell;

    fn add(self, (dx, dy): Offset) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl Sub for Cell {
    type Output = Offset;

    fn sub(self, rhs: Cell) -> Offset {
        rhs.delta(&self)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
