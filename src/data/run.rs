use crate::core::Scheduler;
use crate::data::read_instance;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;

/// Report of running a directory of instances.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    scheduler: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    fn new(scheduler: String) -> Self {
        let entries = Vec::new();
        Self { scheduler, entries }
    }

    /// Get the scheduler name.
    #[must_use]
    pub fn scheduler_name(&self) -> &str {
        &self.scheduler
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Scheduler: {}", self.scheduler)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single instance.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub makespan: u64,
    pub best_known: u64,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: {} (best known {}) in {:.2} sec",
            self.name, self.makespan, self.best_known, self.time
        )
    }
}

/// Run all instances in the `samples` directory.
/// Print the report to stdout.
///
/// # Errors
/// - If a file cannot be read.
/// - If no samples are found.
///
/// # Panics
/// - If a schedule is infeasible.
pub fn samples(solver: &mut dyn Scheduler) -> anyhow::Result<()> {
    run("samples", false, solver).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run all `.jsp` instances in the `dir` directory.
/// Filenames encode the best-known makespan: `<name>_<makespan>.jsp`.
///
/// # Arguments
/// - `exact` is true, require the best-known makespan to be reached.
/// - `solver` is the scheduler to run.
///
/// # Errors
/// - If a file cannot be read or parsed.
///
/// # Panics
/// - If a schedule is infeasible.
/// - If the best-known makespan is missed and `exact` is true.
pub fn run(dir: &str, exact: bool, solver: &mut dyn Scheduler) -> anyhow::Result<Report> {
    let mut report = Report::new(solver.name().into());

    for file in std::fs::read_dir(dir)? {
        let file = file?;
        if file.path().extension().map_or(true, |ext| ext != "jsp") {
            continue;
        }
        let (name, best_known) = parse_filename(&file.file_name())?;

        let instance = read_instance(&mut BufReader::new(File::open(file.path())?))?;

        let time = std::time::Instant::now();
        let schedule = solver.schedule(&instance);
        let time = time.elapsed().as_secs_f64();

        assert!(schedule.verify(), "Infeasible schedule created");

        let makespan = schedule.makespan();
        if exact {
            assert_eq!(makespan, best_known, "Best known makespan missed on {name}");
        }

        report.entries.push(ReportEntry {
            name,
            makespan,
            best_known,
            time,
        });
    }

    Ok(report)
}

fn parse_filename(filename: &std::ffi::OsString) -> anyhow::Result<(String, u64)> {
    static NAME_ERR: &str = "Cannot read filename";

    let name = filename.to_str().ok_or_else(|| anyhow!(NAME_ERR))?;
    let stem = name.split('.').next().ok_or_else(|| anyhow!(NAME_ERR))?;
    let best = stem.rsplit('_').next().ok_or_else(|| anyhow!(NAME_ERR))?;
    Ok((name.into(), best.parse()?))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_filename() -> anyhow::Result<()> {
        let (name, best) = parse_filename(&"ft06_55.jsp".into())?;
        assert_eq!(name, "ft06_55.jsp");
        assert_eq!(best, 55);

        let (name, best) = parse_filename(&"two_machine_6.jsp".into())?;
        assert_eq!(name, "two_machine_6.jsp");
        assert_eq!(best, 6);
        Ok(())
    }

    #[test]
    fn test_parse_filename_errors() {
        assert!(parse_filename(&"".into()).is_err());
        assert!(parse_filename(&".jsp".into()).is_err());
        assert!(parse_filename(&"ft06.jsp".into()).is_err());
        assert!(parse_filename(&"ft06_best.jsp".into()).is_err());
    }
}
