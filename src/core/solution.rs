use super::Instance;

/// A concrete schedule: a start time for every operation of the instance.
#[derive(Clone, Debug)]
pub struct Schedule<'a> {
    instance: &'a Instance,
    starts: Vec<Vec<Option<u64>>>,
}

impl<'a> Schedule<'a> {
    /// Creates a new empty schedule for the given instance.
    #[must_use]
    pub fn new(instance: &'a Instance) -> Self {
        let starts = instance.jobs.iter().map(|job| vec![None; job.len()]).collect();
        Self { instance, starts }
    }

    /// Returns the instance the schedule belongs to.
    #[must_use]
    pub const fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Sets the start time of an operation.
    pub fn set_start(&mut self, job: usize, operation: usize, start: u64) {
        self.starts[job][operation] = Some(start);
    }

    /// Returns the start time of an operation, if it has been scheduled.
    #[must_use]
    pub fn start(&self, job: usize, operation: usize) -> Option<u64> {
        self.starts.get(job).and_then(|starts| *starts.get(operation)?)
    }

    /// Returns the completion time of the last-finishing operation,
    /// or zero for an empty schedule.
    #[must_use]
    pub fn makespan(&self) -> u64 {
        self.starts
            .iter()
            .enumerate()
            .flat_map(|(job, starts)| {
                starts.iter().enumerate().filter_map(move |(op, start)| {
                    start.map(|start| (job, op, start))
                })
            })
            .map(|(job, op, start)| start + self.instance.jobs[job].operations[op].duration)
            .max()
            .unwrap_or_default()
    }

    /// Returns whether the schedule is feasible: every operation has a start
    /// time, operations of a job run in order without overlap, and no two
    /// operations occupy the same machine at the same time.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.all_scheduled() && self.jobs_in_order() && self.machines_exclusive()
    }

    fn all_scheduled(&self) -> bool {
        self.starts.iter().flatten().all(Option::is_some)
    }

    fn jobs_in_order(&self) -> bool {
        self.instance.jobs.iter().enumerate().all(|(id, job)| {
            job.operations.iter().enumerate().skip(1).all(|(op, _)| {
                let previous = self.start(id, op - 1).map(|start| {
                    start + job.operations[op - 1].duration
                });
                match (previous, self.start(id, op)) {
                    (Some(end), Some(start)) => start >= end,
                    _ => false,
                }
            })
        })
    }

    fn machines_exclusive(&self) -> bool {
        let mut usage = vec![Vec::new(); self.instance.machines];

        for (id, job) in self.instance.jobs.iter().enumerate() {
            for (op, operation) in job.operations.iter().enumerate() {
                let Some(start) = self.start(id, op) else {
                    return false;
                };
                usage[operation.machine].push((start, start + operation.duration));
            }
        }

        usage.iter_mut().all(|intervals| {
            intervals.sort_unstable();
            intervals.windows(2).all(|pair| pair[0].1 <= pair[1].0)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{Job, Operation};

    fn two_jobs_one_machine() -> Instance {
        Instance::new(
            1,
            vec![
                Job::new(vec![Operation::new(0, 3)]),
                Job::new(vec![Operation::new(0, 5)]),
            ],
        )
    }

    #[test]
    fn serialized_machine_use_verifies() {
        let instance = two_jobs_one_machine();
        let mut schedule = Schedule::new(&instance);
        schedule.set_start(0, 0, 0);
        schedule.set_start(1, 0, 3);

        assert!(schedule.verify());
        assert_eq!(schedule.makespan(), 8);
    }

    #[test]
    fn overlapping_machine_use_fails_verify() {
        let instance = two_jobs_one_machine();
        let mut schedule = Schedule::new(&instance);
        schedule.set_start(0, 0, 0);
        schedule.set_start(1, 0, 2);

        assert!(!schedule.verify());
    }

    #[test]
    fn out_of_order_job_fails_verify() {
        let instance = Instance::new(
            2,
            vec![Job::new(vec![Operation::new(0, 4), Operation::new(1, 2)])],
        );
        let mut schedule = Schedule::new(&instance);
        schedule.set_start(0, 0, 0);
        schedule.set_start(0, 1, 2);

        assert!(!schedule.verify());
    }

    #[test]
    fn unscheduled_operation_fails_verify() {
        let instance = two_jobs_one_machine();
        let mut schedule = Schedule::new(&instance);
        schedule.set_start(0, 0, 0);

        assert!(!schedule.verify());
        assert_eq!(schedule.makespan(), 3);
    }

    #[test]
    fn empty_schedule_has_zero_makespan() {
        let instance = Instance::new(0, Vec::new());
        let schedule = Schedule::new(&instance);

        assert!(schedule.verify());
        assert_eq!(schedule.makespan(), 0);
    }
}
