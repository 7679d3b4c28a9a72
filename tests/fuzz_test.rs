/// Fuzzes the search by comparing it against a breadth-first search on many random grids. Every
/// returned path must be contiguous, avoid obstacles and be exactly as long as the BFS distance;
/// no path may be returned when BFS cannot reach the goal. Both the 8-grid and the 4-grid are
/// tested.
use std::collections::VecDeque;

use rand::prelude::*;
use waypoint_pathfinding::{
    find_path, Cell, GridSpecification, GridWorld, Offset, MOORE_OFFSETS, NEUMANN_OFFSETS,
};

fn random_grid(n: i32, rng: &mut StdRng, directions: &[Offset]) -> GridWorld {
    let start = Cell::new(0, 0);
    let end = Cell::new(n - 1, n - 1);
    let obstacles = (0..n)
        .flat_map(|x| (0..n).map(move |y| Cell::new(x, y)))
        .filter(|c| *c != start && *c != end)
        .filter(|_| rng.gen_bool(0.4))
        .collect::<Vec<_>>();
    GridWorld::new(
        GridSpecification::new(n, n, start, end)
            .with_obstacles(obstacles)
            .with_directions(directions.iter().copied()),
    )
    .unwrap()
}

fn bfs_distance(grid: &GridWorld, start: Cell, goal: Cell) -> Option<usize> {
    let mut dist = vec![usize::MAX; grid.cell_count()];
    let mut queue = VecDeque::from([start]);
    dist[grid.index(&start)?] = 0;
    while let Some(cell) = queue.pop_front() {
        let d = dist[grid.index(&cell)?];
        if cell == goal {
            return Some(d);
        }
        for n in grid.neighbours(cell) {
            let ix = grid.index(&n)?;
            if dist[ix] == usize::MAX {
                dist[ix] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_grid(grid: &GridWorld) {
    println!("{}", grid);
}

#[test]
fn fuzz_distance() {
    const N: i32 = 8;
    const N_GRIDS: usize = 3000;
    let mut rng = StdRng::seed_from_u64(0);
    for directions in [&MOORE_OFFSETS[..], &NEUMANN_OFFSETS[..]] {
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, &mut rng, directions);
            let (start, end) = (grid.start(), grid.destination());
            let expected = bfs_distance(&grid, start, end);
            let path = find_path(&grid, start, end);
            if path.as_ref().map(|p| p.len() - 1) != expected {
                visualize_grid(&grid);
                println!("Path: {path:?}; BFS distance: {expected:?}");
            }
            assert_eq!(path.as_ref().map(|p| p.len() - 1), expected);
            if let Some(path) = path {
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(path.iter().all(|c| grid.is_passable(c)));
                assert!(waypoint_pathfinding::is_contiguous(&path, directions));
            }
        }
    }
}

/// Random pairs of passable cells, not only the corners.
#[test]
fn fuzz_random_endpoints() {
    const N: i32 = 6;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let grid = random_grid(N, &mut rng, &MOORE_OFFSETS);
        let cells = grid.passable_cells();
        for _ in 0..5 {
            let a = *cells.choose(&mut rng).unwrap();
            let b = *cells.choose(&mut rng).unwrap();
            let cost = find_path(&grid, a, b).map(|p| p.len() - 1);
            assert_eq!(cost, bfs_distance(&grid, a, b));
            assert_eq!(cost.is_some(), grid.reachable(&a, &b));
        }
    }
}
