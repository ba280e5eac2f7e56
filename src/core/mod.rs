mod problem;
mod solution;

pub use problem::*;
pub use solution::*;

/// Schedules the operations of an instance.
pub trait Scheduler {
    /// Produces a feasible schedule for the given instance.
    fn schedule<'a>(&mut self, instance: &'a Instance) -> Schedule<'a>;

    /// Returns the name of the scheduler.
    fn name(&self) -> &str;
}
