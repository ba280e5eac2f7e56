mod run;

pub use run::*;

use crate::core::{Instance, Job, Operation, Schedule};
use std::io::BufRead;
use thiserror::Error;

/// Error raised while reading an instance file.
/// Always fatal; no search is attempted on a malformed instance.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing header line with job and machine counts")]
    MissingHeader,
    #[error("line {line}: invalid integer field {field:?}")]
    InvalidInteger { line: usize, field: String },
    #[error("line {line}: expected {expected} fields, found {found}")]
    ShortLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: machine id {machine} out of range for {machines} machines")]
    MachineRange {
        line: usize,
        machine: usize,
        machines: usize,
    },
    #[error("line {line}: operation duration must be positive")]
    ZeroDuration { line: usize },
    #[error("expected {expected} jobs, found {found}")]
    JobCount { expected: usize, found: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads an instance from the text format: a header line with job and
/// machine counts, then one line per job holding the operation count
/// followed by (machine, duration) pairs. Machine ids are 0-based.
/// Blank lines and lines too short to hold one operation are skipped.
///
/// # Errors
/// - If the reader fails.
/// - If the text does not follow the format.
pub fn read_instance(reader: &mut impl BufRead) -> Result<Instance, ParseError> {
    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        return Err(ParseError::MissingHeader);
    }

    let mut counts = header.split_whitespace();
    let (Some(job_count), Some(machines)) = (counts.next(), counts.next()) else {
        return Err(ParseError::MissingHeader);
    };
    let job_count: usize = parse_field(1, job_count)?;
    let machines: usize = parse_field(1, machines)?;

    let mut jobs = Vec::with_capacity(job_count);
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let number = number + 2;
        let fields: Vec<_> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }

        let operations: usize = parse_field(number, fields[0])?;
        if fields.len() < 1 + 2 * operations {
            return Err(ParseError::ShortLine {
                line: number,
                expected: 1 + 2 * operations,
                found: fields.len(),
            });
        }

        let mut job = Vec::with_capacity(operations);
        for pair in fields[1..=2 * operations].chunks_exact(2) {
            let machine: usize = parse_field(number, pair[0])?;
            let duration: u64 = parse_field(number, pair[1])?;

            if machine >= machines {
                return Err(ParseError::MachineRange {
                    line: number,
                    machine,
                    machines,
                });
            }
            if duration == 0 {
                return Err(ParseError::ZeroDuration { line: number });
            }

            job.push(Operation::new(machine, duration));
        }
        jobs.push(Job::new(job));
    }

    if jobs.len() != job_count {
        return Err(ParseError::JobCount {
            expected: job_count,
            found: jobs.len(),
        });
    }

    Ok(Instance::new(machines, jobs))
}

/// Renders a schedule as text: one line per operation in job order, holding
/// job id, operation index, machine, start time, and duration.
#[must_use]
pub fn to_string(schedule: &Schedule) -> String {
    let mut output = String::new();

    for (id, job) in schedule.instance().jobs.iter().enumerate() {
        for (index, operation) in job.operations.iter().enumerate() {
            if let Some(start) = schedule.start(id, index) {
                output.push_str(&format!(
                    "{id} {index} {} {start} {}\n",
                    operation.machine, operation.duration
                ));
            }
        }
    }

    output
}

fn parse_field<T: std::str::FromStr>(line: usize, field: &str) -> Result<T, ParseError> {
    field.parse().map_err(|_| ParseError::InvalidInteger {
        line,
        field: field.into(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Instance, ParseError> {
        read_instance(&mut Cursor::new(text))
    }

    #[test]
    fn reads_the_documented_format() -> Result<(), ParseError> {
        let instance = read("2 2\n2 0 3 1 6\n1 1 8\n")?;

        assert_eq!(instance.machines, 2);
        assert_eq!(instance.jobs.len(), 2);
        assert_eq!(instance.jobs[0].operations[0], Operation::new(0, 3));
        assert_eq!(instance.jobs[0].operations[1], Operation::new(1, 6));
        assert_eq!(instance.jobs[1].operations[0], Operation::new(1, 8));
        assert!(instance.verify());
        Ok(())
    }

    #[test]
    fn skips_blank_and_short_lines() -> Result<(), ParseError> {
        let instance = read("1 1\n\n  \n1 0 4\n\n")?;

        assert_eq!(instance.jobs.len(), 1);
        assert_eq!(instance.jobs[0].operations[0], Operation::new(0, 4));
        Ok(())
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(read(""), Err(ParseError::MissingHeader)));
        assert!(matches!(read("3\n"), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn rejects_non_integer_fields() {
        assert!(matches!(
            read("1 x\n1 0 4\n"),
            Err(ParseError::InvalidInteger { line: 1, .. })
        ));
        assert!(matches!(
            read("1 1\n1 0 four\n"),
            Err(ParseError::InvalidInteger { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_truncated_operation_list() {
        assert!(matches!(
            read("1 2\n2 0 3 1\n"),
            Err(ParseError::ShortLine { line: 2, expected: 5, found: 4 })
        ));
    }

    #[test]
    fn rejects_machine_out_of_range() {
        assert!(matches!(
            read("1 1\n1 1 4\n"),
            Err(ParseError::MachineRange { machine: 1, machines: 1, .. })
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        assert!(matches!(
            read("1 1\n1 0 0\n"),
            Err(ParseError::ZeroDuration { line: 2 })
        ));
    }

    #[test]
    fn rejects_wrong_job_count() {
        assert!(matches!(
            read("2 1\n1 0 4\n"),
            Err(ParseError::JobCount { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn renders_start_times_in_job_order() -> Result<(), ParseError> {
        let instance = read("2 1\n1 0 3\n1 0 5\n")?;
        let mut schedule = Schedule::new(&instance);
        schedule.set_start(0, 0, 5);
        schedule.set_start(1, 0, 0);

        assert_eq!(to_string(&schedule), "0 0 0 5 3\n1 0 0 0 5\n");
        Ok(())
    }
}
