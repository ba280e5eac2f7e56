mod chromosome;
pub mod decode;
mod genetic;

pub use chromosome::Chromosome;
pub use genetic::{Genetic, GeneticParams, ParamsError};
