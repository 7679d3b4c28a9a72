use waypoint_pathfinding::{Cell, GridSpecification, GridWorld};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have an 8-neighborhood

fn main() {
    let spec = GridSpecification::new(3, 3, Cell::new(0, 0), Cell::new(2, 2))
        .with_obstacles([Cell::new(1, 1)]);
    let grid = GridWorld::new(spec).unwrap();
    println!("{}", grid);
    let path = grid.shortest_path();
    println!("Path:");
    for p in &path.cells {
        println!("{}", p);
    }
    println!("Cost: {}", path.cost);
}
