use super::{decode, Chromosome};
use crate::core::{Instance, Schedule, Scheduler};
use rand::prelude::*;
use thiserror::Error;

/// A population member: a chromosome paired with its cached makespan.
type Entry = (u64, Chromosome);

/// Configuration error for the genetic search.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("population size must be positive")]
    EmptyPopulation,
    #[error("population size must be even, got {0}")]
    OddPopulation(usize),
    #[error("crossover probability must be within [0, 1], got {0}")]
    CrossoverProbability(f64),
    #[error("mutation probability must be within [0, 1], got {0}")]
    MutationProbability(f64),
}

/// Validated parameters of the genetic search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneticParams {
    pub seed: u64,
    pub population_size: usize,
    pub iterations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
}

impl GeneticParams {
    /// Creates validated parameters.
    ///
    /// The population size must be positive and even, so every member has a
    /// mating partner each generation. Probabilities must lie within [0, 1].
    ///
    /// # Errors
    /// - If the population size is zero or odd.
    /// - If a probability lies outside [0, 1].
    pub fn new(
        seed: u64,
        population_size: usize,
        iterations: usize,
        crossover_probability: f64,
        mutation_probability: f64,
    ) -> Result<Self, ParamsError> {
        if population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if population_size % 2 != 0 {
            return Err(ParamsError::OddPopulation(population_size));
        }
        if !(0.0..=1.0).contains(&crossover_probability) {
            return Err(ParamsError::CrossoverProbability(crossover_probability));
        }
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(ParamsError::MutationProbability(mutation_probability));
        }

        Ok(Self {
            seed,
            population_size,
            iterations,
            crossover_probability,
            mutation_probability,
        })
    }
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            seed: 0,
            population_size: 50,
            iterations: 1000,
            crossover_probability: 1.0,
            mutation_probability: 0.1,
        }
    }
}

/// Genetic search over chromosome encodings of the instance.
///
/// Deterministic for a fixed seed: all stochastic choices draw from one
/// seeded generator in a fixed order.
#[derive(Clone, Debug)]
pub struct Genetic {
    params: GeneticParams,
    rng: StdRng,
}

impl Genetic {
    /// Creates a new genetic search with the given parameters.
    #[must_use]
    pub fn new(params: GeneticParams) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self { params, rng }
    }

    /// Builds and evaluates the initial population of random chromosomes.
    fn initial_population(&mut self, instance: &Instance) -> Vec<Entry> {
        let chromosomes: Vec<_> = (0..self.params.population_size)
            .map(|_| Chromosome::random(instance, &mut self.rng))
            .collect();
        evaluate(chromosomes, instance)
    }

    /// Runs one generation: random mating pairs, recombination, offspring
    /// evaluation, and elitist truncation back to the configured size.
    fn evolve(&mut self, population: &mut Vec<Entry>, instance: &Instance) {
        population.shuffle(&mut self.rng);

        let half = population.len() / 2;
        let mut offspring = Vec::new();
        for i in 0..half {
            if !self.rng.gen_bool(self.params.crossover_probability) {
                continue;
            }

            let (first, second) = (&population[i].1, &population[half + i].1);
            for mut child in [first.crossover(second, &mut self.rng), second.crossover(first, &mut self.rng)] {
                if self.rng.gen_bool(self.params.mutation_probability) {
                    child = child.mutate(&mut self.rng);
                }
                offspring.push(child);
            }
        }

        population.extend(evaluate(offspring, instance));
        population.sort_by_key(|&(makespan, _)| makespan);
        population.truncate(self.params.population_size);
    }
}

impl Default for Genetic {
    fn default() -> Self {
        Self::new(GeneticParams::default())
    }
}

impl Scheduler for Genetic {
    fn schedule<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        if instance.total_operations() == 0 {
            return Schedule::new(instance);
        }

        let mut population = self.initial_population(instance);
        for _ in 0..self.params.iterations {
            self.evolve(&mut population, instance);
        }

        population.sort_by_key(|&(makespan, _)| makespan);
        decode::schedule(&population[0].1, instance)
    }

    fn name(&self) -> &'static str {
        "Genetic"
    }
}

/// Maps a batch of chromosomes to evaluated population entries.
/// Each evaluation is independent of the others.
fn evaluate(chromosomes: Vec<Chromosome>, instance: &Instance) -> Vec<Entry> {
    chromosomes
        .into_iter()
        .map(|chromosome| (decode::makespan(&chromosome, instance), chromosome))
        .collect()
}
