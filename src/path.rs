use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Offset};
use crate::error::{Error, Result};

/// Final output of a search or an optimization, as consumed by a renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    pub cells: Vec<Cell>,
    /// Number of moves, `cells.len() - 1`; zero if no path was found.
    pub cost: usize,
    pub found: bool,
}

impl PathResult {
    pub fn from_cells(cells: Vec<Cell>) -> PathResult {
        PathResult {
            cost: cells.len().saturating_sub(1),
            found: !cells.is_empty(),
            cells,
        }
    }

    pub fn not_found() -> PathResult {
        PathResult::default()
    }

    /// Checks that every step of the path is one of `directions`.
    pub fn is_contiguous(&self, directions: &[Offset]) -> bool {
        is_contiguous(&self.cells, directions)
    }
}

impl From<Option<Vec<Cell>>> for PathResult {
    fn from(path: Option<Vec<Cell>>) -> PathResult {
        path.map_or_else(PathResult::not_found, PathResult::from_cells)
    }
}

/// Checks that consecutive cells of `cells` differ by one of `directions`.
pub fn is_contiguous(cells: &[Cell], directions: &[Offset]) -> bool {
    cells
        .iter()
        .tuple_windows()
        .all(|(a, b)| directions.contains(&a.delta(b)))
}

/// Removes consecutive repeats of a cell, keeping the first.
pub fn dedup_consecutive(cells: Vec<Cell>) -> Vec<Cell> {
    cells.into_iter().dedup().collect()
}

/// One leg of a route together with its search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: Cell,
    pub to: Cell,
    pub path: Option<Vec<Cell>>,
}

impl Segment {
    /// Number of moves along the segment, or [None] if it has no path.
    pub fn cost(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Joins the segments into one path. A segment starting where the previous one ended has its
/// first cell dropped, so shared endpoints appear once. Fails on the first segment without a
/// path.
pub fn stitch(segments: &[Segment]) -> Result<Vec<Cell>> {
    let mut joined: Vec<Cell> = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        let path = segment.path.as_ref().ok_or(Error::Unreachable {
            segment: i,
            from: segment.from,
            to: segment.to,
        })?;
        let skip = match (joined.last(), path.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        joined.extend(path.iter().skip(skip));
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::MOORE_OFFSETS;

    fn line(from: i32, to: i32) -> Segment {
        let path = if from <= to {
            (from..=to).map(|x| Cell::new(x, 0)).collect()
        } else {
            (to..=from).rev().map(|x| Cell::new(x, 0)).collect()
        };
        Segment {
            from: Cell::new(from, 0),
            to: Cell::new(to, 0),
            path: Some(path),
        }
    }

    #[test]
    fn shared_endpoints_appear_once() {
        let segments = [line(0, 3), line(3, 5), line(5, 2)];
        let total: usize = segments.iter().map(|s| s.path.as_ref().unwrap().len()).sum();
        let path = stitch(&segments).unwrap();
        assert_eq!(path.len(), total - (segments.len() - 1));
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(2, 0)));
        assert!(is_contiguous(&path, &MOORE_OFFSETS));
    }

    #[test]
    fn zero_length_segments_collapse() {
        let path = stitch(&[line(0, 2), line(2, 2), line(2, 4)]).unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn missing_segment_fails() {
        let mut broken = line(3, 5);
        broken.path = None;
        assert_eq!(
            stitch(&[line(0, 3), broken]),
            Err(Error::Unreachable {
                segment: 1,
                from: Cell::new(3, 0),
                to: Cell::new(5, 0)
            })
        );
    }

    #[test]
    fn dedup_only_touches_neighbours() {
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 0);
        assert_eq!(dedup_consecutive(vec![a, a, b, b, a]), vec![a, b, a]);
    }

    #[test]
    fn path_result_cost() {
        let result = PathResult::from(Some(vec![Cell::new(0, 0), Cell::new(1, 1)]));
        assert!(result.found);
        assert_eq!(result.cost, 1);
        let missing = PathResult::from(None);
        assert!(!missing.found && missing.cells.is_empty() && missing.cost == 0);
    }
}
