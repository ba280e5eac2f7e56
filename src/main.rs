use anyhow::Context;
use clap::Parser;
use jobshop_ga::algo::{Genetic, GeneticParams};
use jobshop_ga::run_reader;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Genetic search for short-makespan job-shop schedules.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the instance file.
    instance: PathBuf,
    /// Random seed.
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
    /// Population size. Must be even.
    #[clap(short, long, default_value_t = 50)]
    population: usize,
    /// Number of generations to run.
    #[clap(short, long, default_value_t = 1000)]
    iterations: usize,
    /// Crossover probability, within [0, 1].
    #[clap(short, long, default_value_t = 1.0)]
    crossover: f64,
    /// Mutation probability, within [0, 1].
    #[clap(short, long, default_value_t = 0.1)]
    mutation: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let params = GeneticParams::new(
        args.seed,
        args.population,
        args.iterations,
        args.crossover,
        args.mutation,
    )?;

    let file = File::open(&args.instance)
        .with_context(|| format!("Cannot open instance file {}", args.instance.display()))?;

    run_reader(&mut Genetic::new(params), &mut BufReader::new(file))
}
