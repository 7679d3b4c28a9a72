use waypoint_pathfinding::{Cell, GridSpecification, GridWorld, NEUMANN_OFFSETS};

fn main() {
    let spec = GridSpecification::new(10, 10, Cell::new(0, 0), Cell::new(7, 7))
        .with_obstacle_rect(1, 1, 2, 2)
        .with_obstacle_rect(5, 0, 2, 2)
        .with_obstacle_rect(0, 5, 2, 2)
        .with_obstacle_rect(8, 8, 2, 2)
        .with_directions(NEUMANN_OFFSETS);
    let grid = GridWorld::new(spec).unwrap();
    let path = grid.shortest_path();
    print!("{}", grid.render_path(&path));
    println!("{:?}", path.cells);
}
