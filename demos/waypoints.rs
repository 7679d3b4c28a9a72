use rand::rngs::StdRng;
use rand::SeedableRng;
use waypoint_pathfinding::{Cell, GeneticConfig, GeneticOptimizer, GridSpecification, GridWorld};

// Optimizes a route through five waypoints on a 10x10 grid with a wall of four cells,
// using the default genetic parameters (population 500, 10 generations, 5 restarts).

fn main() {
    let spec = GridSpecification::new(10, 10, Cell::new(1, 2), Cell::new(7, 8))
        .with_obstacle_rect(3, 5, 4, 1);
    let grid = GridWorld::new(spec).unwrap();
    let optimizer = GeneticOptimizer::new(&grid, GeneticConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    match optimizer.optimize(&mut rng) {
        Ok(route) => {
            print!("{}", grid.render_path(&route.path));
            println!("Waypoints: {:?}", route.waypoints);
            for report in &route.restarts {
                println!(
                    "Restart {}: best fitness {}",
                    report.restart, report.best_fitness
                );
            }
            let travelled = route.path.cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
            println!("Path travelled: {}", travelled.join(" -> "));
            println!("Total cost: {}", route.path.cost);
        }
        Err(e) => println!("No route: {}", e),
    }
}
