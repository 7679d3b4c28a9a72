//! Genetic search for a waypoint sequence whose stitched route is as short as possible.
//!
//! Each restart samples a fresh population of chromosomes (distinct passable cells), then for a
//! fixed number of generations keeps every chromosome within `parent_slack` of the best fitness
//! as a parent and breeds a new population from random parent pairs using single-point crossover
//! and per-gene mutation. The best chromosome over all restarts is stitched into one path.
use itertools::Itertools;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::grid_world::GridWorld;
use crate::path::{dedup_consecutive, stitch, PathResult};

/// Ordered waypoints visited between the start and the destination.
pub type Chromosome = Vec<Cell>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Probability with which each gene of an offspring is replaced by a random passable cell.
    pub mutation_rate: f64,
    pub generations: usize,
    /// Number of independent runs; the best result over all of them is kept.
    pub restarts: usize,
    pub chromosome_len: usize,
    /// Absolute fitness margin above the generation's best within which chromosomes may breed.
    pub parent_slack: f64,
    /// Number of best parents copied unchanged into the next generation. `0` builds every
    /// generation purely from crossover and mutation offspring, without elite retention.
    pub elite_count: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 500,
            mutation_rate: 0.1,
            generations: 10,
            restarts: 5,
            chromosome_len: 5,
            parent_slack: 2.0,
            elite_count: 1,
        }
    }
}

impl GeneticConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
    pub fn with_chromosome_len(mut self, chromosome_len: usize) -> Self {
        self.chromosome_len = chromosome_len;
        self
    }
    pub fn with_parent_slack(mut self, parent_slack: f64) -> Self {
        self.parent_slack = parent_slack;
        self
    }
    pub fn with_elite_count(mut self, elite_count: usize) -> Self {
        self.elite_count = elite_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));
        if self.population_size == 0 {
            return invalid("population_size must be at least 1".to_owned());
        }
        if self.restarts == 0 {
            return invalid("restarts must be at least 1".to_owned());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!(
                "mutation_rate {} must be between 0.0 and 1.0",
                self.mutation_rate
            ));
        }
        if self.chromosome_len < 2 {
            return invalid(format!(
                "chromosome_len {} leaves no crossover point",
                self.chromosome_len
            ));
        }
        if self.parent_slack.is_nan() || self.parent_slack < 0.0 {
            return invalid(format!(
                "parent_slack {} must be a non-negative number",
                self.parent_slack
            ));
        }
        if self.elite_count > self.population_size {
            return invalid(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub min_fitness: f64,
    /// Size of the breeding pool.
    pub parent_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestartReport {
    pub restart: usize,
    pub generations: Vec<GenerationStats>,
    pub best: Chromosome,
    pub best_fitness: f64,
}

/// Result of [GeneticOptimizer::optimize].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub waypoints: Chromosome,
    pub fitness: f64,
    pub path: PathResult,
    pub restarts: Vec<RestartReport>,
}

/// Evolves waypoint sequences between the start and destination of a [GridWorld]. All
/// randomness comes from the generator handed to [optimize](Self::optimize), so a seeded
/// generator reproduces a run exactly.
#[derive(Clone, Debug)]
pub struct GeneticOptimizer<'a> {
    evaluator: FitnessEvaluator<'a>,
    config: GeneticConfig,
    pool: Vec<Cell>,
}

impl<'a> GeneticOptimizer<'a> {
    pub fn new(grid: &'a GridWorld, config: GeneticConfig) -> Result<Self> {
        config.validate()?;
        let pool = grid.passable_cells();
        if pool.len() < config.chromosome_len {
            return Err(Error::NotEnoughCells {
                needed: config.chromosome_len,
                available: pool.len(),
            });
        }
        Ok(GeneticOptimizer {
            evaluator: FitnessEvaluator::new(grid),
            config,
            pool,
        })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }

    /// `chromosome_len` distinct passable cells.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        self.pool
            .choose_multiple(rng, self.config.chromosome_len)
            .copied()
            .collect()
    }

    pub fn random_population<R: Rng>(&self, rng: &mut R) -> Vec<Chromosome> {
        (0..self.config.population_size)
            .map(|_| self.random_chromosome(rng))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    pub fn evaluate(&self, population: &[Chromosome]) -> Vec<f64> {
        population
            .iter()
            .map(|c| self.evaluator.route_fitness(c))
            .collect()
    }

    /// Every chromosome gets its own searches, so they are scored in parallel.
    #[cfg(feature = "parallel")]
    pub fn evaluate(&self, population: &[Chromosome]) -> Vec<f64> {
        population
            .par_iter()
            .map(|c| self.evaluator.route_fitness(c))
            .collect()
    }

    /// Indices of the chromosomes whose fitness lies within `parent_slack` of the best one,
    /// sorted from best to worst. Ties keep population order.
    pub fn select_parents(&self, fitness: &[f64]) -> Vec<usize> {
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let threshold = min + self.config.parent_slack;
        (0..fitness.len())
            .filter(|&i| fitness[i] <= threshold)
            .sorted_by(|&a, &b| fitness[a].total_cmp(&fitness[b]))
            .collect()
    }

    /// Prefix of `first` up to a random cut in `1..len`, followed by the suffix of `second`.
    pub fn crossover<R: Rng>(&self, first: &[Cell], second: &[Cell], rng: &mut R) -> Chromosome {
        let cut = rng.gen_range(1..first.len());
        first[..cut].iter().chain(&second[cut..]).copied().collect()
    }

    /// Replaces each gene with probability `mutation_rate`. The new cell may already occur in
    /// the chromosome.
    pub fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        for gene in chromosome.iter_mut() {
            if rng.gen_bool(self.config.mutation_rate) {
                if let Some(cell) = self.pool.choose(rng) {
                    *gene = *cell;
                }
            }
        }
    }

    /// Builds the next population from the parents, given as indices into `population`.
    pub fn breed<R: Rng>(
        &self,
        population: &[Chromosome],
        parents: &[usize],
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let size = self.config.population_size;
        let mut next: Vec<Chromosome> = parents
            .iter()
            .take(self.config.elite_count)
            .map(|&i| population[i].clone())
            .collect();
        while next.len() < size {
            let (Some(&p1), Some(&p2)) = (parents.choose(rng), parents.choose(rng)) else {
                break;
            };
            let mut offspring = self.crossover(&population[p1], &population[p2], rng);
            self.mutate(&mut offspring, rng);
            next.push(offspring);
        }
        next
    }

    /// One independent run from a fresh random population.
    pub fn run_restart<R: Rng>(&self, restart: usize, rng: &mut R) -> RestartReport {
        let mut population = self.random_population(rng);
        let mut generations = Vec::with_capacity(self.config.generations);
        for generation in 0..self.config.generations {
            let fitness = self.evaluate(&population);
            let parents = self.select_parents(&fitness);
            let min_fitness = parents.first().map_or(f64::INFINITY, |&i| fitness[i]);
            debug!(
                "Restart {} generation {}: best fitness {}, {} parents",
                restart,
                generation,
                min_fitness,
                parents.len()
            );
            generations.push(GenerationStats {
                generation,
                min_fitness,
                parent_count: parents.len(),
            });
            population = self.breed(&population, &parents, rng);
        }
        let fitness = self.evaluate(&population);
        let (best, best_fitness) = population
            .into_iter()
            .zip(fitness)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or_else(|| (Chromosome::new(), f64::INFINITY));
        info!("Restart {} finished with fitness {}", restart, best_fitness);
        RestartReport {
            restart,
            generations,
            best,
            best_fitness,
        }
    }

    /// Runs all restarts and stitches the best chromosome into a path from the grid's start to
    /// its destination. Fails if even the best chromosome has a leg without a path.
    pub fn optimize<R: Rng>(&self, rng: &mut R) -> Result<Route> {
        let mut reports: Vec<RestartReport> = Vec::with_capacity(self.config.restarts);
        let mut best: Option<usize> = None;
        for restart in 0..self.config.restarts {
            let report = self.run_restart(restart, rng);
            if best.map_or(true, |b| report.best_fitness < reports[b].best_fitness) {
                best = Some(reports.len());
            }
            reports.push(report);
        }
        let best = best.map_or_else(Chromosome::new, |b| reports[b].best.clone());
        let grid = self.evaluator.grid();
        let segments = self
            .evaluator
            .segments(&best, grid.start(), grid.destination());
        let path = PathResult::from_cells(dedup_consecutive(stitch(&segments)?));
        let fitness = self.evaluator.route_fitness(&best);
        info!("Best route has fitness {} through {:?}", fitness, best);
        Ok(Route {
            waypoints: best,
            fitness,
            path,
            restarts: reports,
        })
    }
}
