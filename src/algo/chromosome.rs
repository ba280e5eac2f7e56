use crate::core::Instance;
use ahash::{HashSet, HashSetExt};
use rand::prelude::*;

/// An encoded candidate solution: a sequence of job ids with repetition.
///
/// The i-th occurrence of job `j` means "dispatch the next not-yet-dispatched
/// operation of job `j` at this point in global dispatch order". For every
/// job, the number of occurrences equals the number of operations in that
/// job. Every operator preserves this invariant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Creates a random chromosome: an independent shuffle of the base
    /// multiset of job ids.
    #[must_use]
    pub fn random(instance: &Instance, rng: &mut impl RngCore) -> Self {
        let mut genes: Vec<_> = instance
            .jobs
            .iter()
            .enumerate()
            .flat_map(|(id, job)| std::iter::repeat(id).take(job.len()))
            .collect();
        genes.shuffle(rng);
        Self { genes }
    }

    /// Returns the encoded job-id sequence.
    #[must_use]
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Returns the number of genes, equal to the total operation count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns whether the chromosome is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns whether the per-job occurrence counts match the instance's
    /// per-job operation counts.
    #[must_use]
    pub fn matches(&self, instance: &Instance) -> bool {
        let mut counts = vec![0_usize; instance.jobs.len()];
        for &gene in &self.genes {
            match counts.get_mut(gene) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        counts
            .iter()
            .zip(&instance.jobs)
            .all(|(&count, job)| count == job.len())
    }

    /// Generalized order crossover. Implants a contiguous, possibly
    /// wrap-around segment of `self` into `other` at a random cut point,
    /// removing the implanted (job, occurrence) pairs from `other` first.
    ///
    /// Every (job, occurrence) pair ends up in the child exactly once, so
    /// the occurrence-count invariant carries over from the parents.
    #[must_use]
    pub fn crossover(&self, other: &Self, rng: &mut impl RngCore) -> Self {
        let first = annotate(&self.genes);
        let second = annotate(&other.genes);
        let total = first.len();

        let length = rng.gen_range(1..=total);
        let start = rng.gen_range(0..total);
        let cut = rng.gen_range(0..=total);

        let head = total.min(start + length);
        let implant: Vec<_> = first[start..head]
            .iter()
            .chain(&first[..length - (head - start)])
            .copied()
            .collect();
        let implanted: HashSet<_> = implant.iter().copied().collect();

        let (prefix, suffix) = second.split_at(cut);
        let genes = prefix
            .iter()
            .filter(|pair| !implanted.contains(*pair))
            .chain(&implant)
            .chain(suffix.iter().filter(|pair| !implanted.contains(*pair)))
            .map(|&(job, _)| job)
            .collect();

        Self { genes }
    }

    /// Swap mutation: exchanges two positions chosen independently and
    /// uniformly. The positions may coincide, leaving the chromosome
    /// unchanged. The gene multiset is untouched either way.
    #[must_use]
    pub fn mutate(&self, rng: &mut impl RngCore) -> Self {
        let mut genes = self.genes.clone();
        let first = rng.gen_range(0..genes.len());
        let second = rng.gen_range(0..genes.len());
        genes.swap(first, second);
        Self { genes }
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self { genes }
    }
}

/// Pairs every gene with its occurrence index so positions are globally
/// distinguishable even when job ids repeat.
fn annotate(genes: &[usize]) -> Vec<(usize, usize)> {
    let mut seen = vec![0_usize; genes.iter().max().map_or(0, |&max| max + 1)];
    genes
        .iter()
        .map(|&job| {
            let occurrence = seen[job];
            seen[job] += 1;
            (job, occurrence)
        })
        .collect()
}
