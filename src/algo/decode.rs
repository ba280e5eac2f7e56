//! Decoding of chromosomes into feasible schedules.
//!
//! A chromosome is scanned left to right, resolving each gene to the next
//! not-yet-dispatched operation of its job. Machine contention follows the
//! relative order implied by the chromosome itself, so every decode yields a
//! feasible schedule without a repair step. Precedences are collected into a
//! DAG whose node order is the decode order, which is already topological;
//! the makespan is the longest path to a synthetic sink node.

use super::Chromosome;
use crate::core::{Instance, Schedule};

/// One entry of a decoded schedule: a dispatched operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedOperation {
    pub job: usize,
    pub index: usize,
    pub machine: usize,
    pub duration: u64,
}

/// Precedence DAG over decoded-schedule nodes plus a synthetic sink.
///
/// Edges are stored as predecessor lists and always point to lower-indexed
/// nodes; the sink is the highest-indexed node and precedes nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrecedenceGraph {
    predecessors: Vec<Vec<usize>>,
}

impl PrecedenceGraph {
    /// Returns the number of nodes, including the sink.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Returns whether the graph has no operation nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predecessors.len() <= 1
    }

    /// Returns the index of the synthetic sink node.
    #[must_use]
    pub fn sink(&self) -> usize {
        self.predecessors.len() - 1
    }

    /// Returns the predecessors of a node.
    #[must_use]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.predecessors[node]
    }
}

/// Decodes a chromosome into its operation sequence and precedence graph.
///
/// Deterministic and total for any chromosome matching the instance; a
/// mismatched chromosome is a programming error.
#[must_use]
pub fn decode(chromosome: &Chromosome, instance: &Instance) -> (Vec<DecodedOperation>, PrecedenceGraph) {
    debug_assert!(
        chromosome.matches(instance),
        "Chromosome violates the occurrence-count invariant"
    );

    let total = chromosome.len();
    let mut operations = Vec::with_capacity(total);
    let mut predecessors = vec![Vec::new(); total + 1];

    let mut dispatched = vec![0_usize; instance.jobs.len()];
    let mut job_tail = vec![None; instance.jobs.len()];
    // Most recent node occupying each machine, tracked per job so each
    // contender contributes exactly one edge.
    let mut machine_tail = vec![vec![None; instance.jobs.len()]; instance.machines];

    for (node, &job) in chromosome.genes().iter().enumerate() {
        let index = dispatched[job];
        let operation = instance.jobs[job].operations[index];
        operations.push(DecodedOperation {
            job,
            index,
            machine: operation.machine,
            duration: operation.duration,
        });

        if index + 1 == instance.jobs[job].len() {
            predecessors[total].push(node);
        }

        let job_predecessor = if index > 0 { job_tail[job] } else { None };
        if let Some(previous) = job_predecessor {
            predecessors[node].push(previous);
        }

        for &user in machine_tail[operation.machine].iter().flatten() {
            if Some(user) != job_predecessor {
                predecessors[node].push(user);
            }
        }

        dispatched[job] = index + 1;
        job_tail[job] = Some(node);
        machine_tail[operation.machine][job] = Some(node);
    }

    (operations, PrecedenceGraph { predecessors })
}

/// Longest-path completion time for every node, sink included.
///
/// Valid because node order is topological by construction: a node with no
/// predecessors completes after its own duration, any other after the
/// latest predecessor. The sink carries zero duration, so its completion
/// time is the makespan.
#[must_use]
pub fn completion_times(operations: &[DecodedOperation], graph: &PrecedenceGraph) -> Vec<u64> {
    let mut completion = vec![0_u64; graph.len()];

    for node in 0..graph.len() {
        let duration = operations.get(node).map_or(0, |operation| operation.duration);
        let ready = graph
            .predecessors(node)
            .iter()
            .map(|&previous| completion[previous])
            .max()
            .unwrap_or_default();
        completion[node] = ready + duration;
    }

    completion
}

/// Decodes and evaluates a chromosome, returning only its makespan.
#[must_use]
pub fn makespan(chromosome: &Chromosome, instance: &Instance) -> u64 {
    let (operations, graph) = decode(chromosome, instance);
    completion_times(&operations, &graph)[graph.sink()]
}

/// Decodes and evaluates a chromosome into a full schedule with per-operation
/// start times.
#[must_use]
pub fn schedule<'a>(chromosome: &Chromosome, instance: &'a Instance) -> Schedule<'a> {
    let (operations, graph) = decode(chromosome, instance);
    let completion = completion_times(&operations, &graph);

    let mut schedule = Schedule::new(instance);
    for (node, operation) in operations.iter().enumerate() {
        let start = completion[node] - operation.duration;
        schedule.set_start(operation.job, operation.index, start);
    }

    schedule
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{Job, Operation};
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn shared_machine_instance() -> Instance {
        Instance::new(
            1,
            vec![
                Job::new(vec![Operation::new(0, 3)]),
                Job::new(vec![Operation::new(0, 5)]),
            ],
        )
    }

    #[test]
    fn shared_machine_serializes_in_both_orders() {
        let instance = shared_machine_instance();

        assert_eq!(makespan(&Chromosome::from(vec![0, 1]), &instance), 8);
        assert_eq!(makespan(&Chromosome::from(vec![1, 0]), &instance), 8);
    }

    #[test]
    fn singleton_jobs_on_distinct_machines_run_in_parallel() {
        let instance = Instance::new(
            3,
            vec![
                Job::new(vec![Operation::new(0, 4)]),
                Job::new(vec![Operation::new(1, 9)]),
                Job::new(vec![Operation::new(2, 2)]),
            ],
        );

        assert_eq!(makespan(&Chromosome::from(vec![2, 0, 1]), &instance), 9);
    }

    #[test]
    fn interleaved_two_machine_instance() {
        let instance = Instance::new(
            2,
            vec![
                Job::new(vec![Operation::new(0, 3), Operation::new(1, 2)]),
                Job::new(vec![Operation::new(1, 2), Operation::new(0, 1)]),
            ],
        );

        let schedule = schedule(&Chromosome::from(vec![0, 1, 0, 1]), &instance);
        assert!(schedule.verify());
        assert_eq!(schedule.makespan(), 5);
        assert_eq!(schedule.start(0, 0), Some(0));
        assert_eq!(schedule.start(1, 0), Some(0));
        assert_eq!(schedule.start(0, 1), Some(3));
        assert_eq!(schedule.start(1, 1), Some(3));
    }

    #[test]
    fn reentrant_machine_within_one_job_is_serialized() {
        let instance = Instance::new(
            1,
            vec![Job::new(vec![Operation::new(0, 2), Operation::new(0, 3)])],
        );

        assert_eq!(makespan(&Chromosome::from(vec![0, 0]), &instance), 5);
    }

    #[test]
    fn node_order_is_topological() {
        let instance = Instance::new(
            3,
            vec![
                Job::new(vec![Operation::new(0, 3), Operation::new(1, 2)]),
                Job::new(vec![Operation::new(1, 4), Operation::new(0, 1)]),
                Job::new(vec![
                    Operation::new(2, 1),
                    Operation::new(0, 2),
                    Operation::new(2, 5),
                ]),
            ],
        );
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let chromosome = Chromosome::random(&instance, &mut rng);
            let (operations, graph) = decode(&chromosome, &instance);

            assert_eq!(graph.sink(), operations.len());
            for node in 0..graph.len() {
                for &previous in graph.predecessors(node) {
                    assert!(previous < node);
                }
            }
        }
    }

    #[test]
    fn decode_is_deterministic() {
        let instance = shared_machine_instance();
        let chromosome = Chromosome::from(vec![1, 0]);

        let first = decode(&chromosome, &instance);
        let second = decode(&chromosome, &instance);

        assert_eq!(first, second);
        assert_eq!(
            makespan(&chromosome, &instance),
            makespan(&chromosome, &instance)
        );
    }

    #[test]
    fn decoded_schedules_are_always_feasible() {
        let instance = Instance::new(
            2,
            vec![
                Job::new(vec![Operation::new(0, 3), Operation::new(1, 6)]),
                Job::new(vec![Operation::new(1, 8), Operation::new(0, 5)]),
                Job::new(vec![Operation::new(0, 5), Operation::new(1, 4)]),
            ],
        );
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..100 {
            let chromosome = Chromosome::random(&instance, &mut rng);
            let schedule = schedule(&chromosome, &instance);

            assert!(schedule.verify());
            assert_eq!(schedule.makespan(), makespan(&chromosome, &instance));
        }
    }
}
