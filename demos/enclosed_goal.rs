use waypoint_pathfinding::{Cell, GridSpecification, GridWorld};

// The goal is walled in on all sides, so no path exists
//  ____
// |S   |
// | ###|
// | #G#|
// | ###|
//  ____

fn main() {
    let ring = (1..4)
        .flat_map(|x| (1..4).map(move |y| Cell::new(x, y)))
        .filter(|c| *c != Cell::new(2, 2));
    let spec = GridSpecification::new(4, 4, Cell::new(0, 0), Cell::new(2, 2)).with_obstacles(ring);
    let grid = GridWorld::new(spec).unwrap();
    println!("{}", grid);
    let path = grid.shortest_path();
    if path.found {
        println!("Path: {:?}", path.cells);
    } else {
        println!("No possible path");
    }
}
