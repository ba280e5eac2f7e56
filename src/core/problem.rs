/// A single operation of a job. Requires exclusive use of one machine
/// for its whole duration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Operation {
    pub machine: usize,
    pub duration: u64,
}

impl Operation {
    /// Creates a new operation.
    #[must_use]
    pub const fn new(machine: usize, duration: u64) -> Self {
        Self { machine, duration }
    }
}

/// A job: a strictly ordered sequence of operations.
/// The order is fixed and never altered by the search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Job {
    pub operations: Vec<Operation>,
}

impl Job {
    /// Creates a new job from its operation sequence.
    #[must_use]
    pub const fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// Returns the number of operations in the job.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns whether the job has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// An instance of the job-shop scheduling problem.
/// Loaded once at startup and read-only for the remainder of the run.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    pub machines: usize,
    pub jobs: Vec<Job>,
}

impl Instance {
    /// Creates a new instance.
    #[must_use]
    pub const fn new(machines: usize, jobs: Vec<Job>) -> Self {
        Self { machines, jobs }
    }

    /// Returns the total number of operations across all jobs.
    #[must_use]
    pub fn total_operations(&self) -> usize {
        self.jobs.iter().map(Job::len).sum()
    }

    /// Returns whether every referenced machine id is within the machine
    /// count and every duration is positive.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.jobs
            .iter()
            .flat_map(|job| &job.operations)
            .all(|op| op.machine < self.machines && op.duration > 0)
    }
}
