use thiserror::Error;

use crate::cell::Cell;

/// Which endpoint of the grid a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Destination,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: i32, height: i32 },
    #[error("{role} {cell} lies outside the grid")]
    OutOfBounds { role: Endpoint, cell: Cell },
    #[error("{role} {cell} is an obstacle")]
    Blocked { role: Endpoint, cell: Cell },
    #[error("invalid genetic configuration: {0}")]
    InvalidConfig(String),
    #[error("need {needed} distinct passable cells to build a chromosome, grid has {available}")]
    NotEnoughCells { needed: usize, available: usize },
    #[error("segment {segment} from {from} to {to} has no path")]
    Unreachable { segment: usize, from: Cell, to: Cell },
}

pub type Result<T> = std::result::Result<T, Error>;
