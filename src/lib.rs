#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given scheduler on the instance read from reader and writes the
/// resulting schedule to stdout, followed by its makespan.
///
/// # Errors
/// - If the instance could not be read from the reader.
///
/// # Panics
/// - If the schedule is infeasible in debug mode.
pub fn run_reader(scheduler: &mut dyn core::Scheduler, reader: &mut impl BufRead) -> Result<()> {
    let instance = data::read_instance(reader)?;
    let schedule = scheduler.schedule(&instance);

    debug_assert!(schedule.verify(), "Schedule is infeasible: {schedule:?}");

    print!("{}", data::to_string(&schedule));
    println!("{}", schedule.makespan());

    Ok(())
}
