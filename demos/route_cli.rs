use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use waypoint_pathfinding::{
    Cell, GeneticConfig, GeneticOptimizer, GridSpecification, GridWorld, NEUMANN_OFFSETS,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Single shortest path from start to goal
    Astar,
    /// Route through optimized waypoints
    Genetic,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Cell::new(x, y))
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Config {
    #[arg(long, value_enum, default_value_t = Mode::Astar)]
    mode: Mode,

    #[arg(long, default_value_t = 10)]
    width: i32,

    #[arg(long, default_value_t = 10)]
    height: i32,

    #[arg(long, value_parser = parse_cell, default_value = "1,2")]
    start: Cell,

    #[arg(long, value_parser = parse_cell, default_value = "7,8")]
    goal: Cell,

    /// Obstacle cell, may be repeated. Without any, a wall from (3,5) to (6,5) is used
    #[arg(long = "obstacle", value_parser = parse_cell)]
    obstacles: Vec<Cell>,

    /// Use no obstacles at all
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Only move horizontally and vertically
    #[arg(long, default_value_t = false)]
    no_diagonal: bool,

    #[arg(long, default_value_t = 500)]
    population_size: usize,

    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    #[arg(long, default_value_t = 10)]
    generations: usize,

    #[arg(long, default_value_t = 5)]
    restarts: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    let config = Config::parse();

    let mut spec = GridSpecification::new(config.width, config.height, config.start, config.goal);
    if !config.open {
        if config.obstacles.is_empty() {
            spec = spec.with_obstacle_rect(3, 5, 4, 1);
        } else {
            spec = spec.with_obstacles(config.obstacles.iter().copied());
        }
    }
    if config.no_diagonal {
        spec = spec.with_directions(NEUMANN_OFFSETS);
    }
    let grid = match GridWorld::new(spec) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid: {}", e);
            std::process::exit(1);
        }
    };

    let path = match config.mode {
        Mode::Astar => grid.shortest_path(),
        Mode::Genetic => {
            let ga_config = GeneticConfig::default()
                .with_population_size(config.population_size)
                .with_mutation_rate(config.mutation_rate)
                .with_generations(config.generations)
                .with_restarts(config.restarts);
            let optimizer = match GeneticOptimizer::new(&grid, ga_config) {
                Ok(optimizer) => optimizer,
                Err(e) => {
                    eprintln!("Invalid genetic configuration: {}", e);
                    std::process::exit(1);
                }
            };
            match optimizer.optimize(&mut StdRng::seed_from_u64(config.seed)) {
                Ok(route) => {
                    println!("Waypoints: {:?}", route.waypoints);
                    route.path
                }
                Err(e) => {
                    println!("No route: {}", e);
                    return;
                }
            }
        }
    };

    print!("{}", grid.render_path(&path));
    if path.found {
        let cells = path.cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        println!("Path found: {}", cells.join(" -> "));
        println!("Total cost: {}", path.cost);
    } else {
        println!("No possible path");
    }
}
