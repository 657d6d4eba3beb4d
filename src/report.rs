// file: src/report.rs
// version: 1.0.0
// guid: 6c343212-5f2a-47c1-8fdb-3b05d87ac68a

//! Per-path outcomes and their terminal rendering

use std::io::{self, Write};

use crate::cli::args::BIN_NAME;
use crate::error::{exit_code, ChownError, FsError, Result};
use crate::ownership::Ownership;

/// Result of changing ownership of one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Success,
    Failure(FsError),
}

impl PathOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PathOutcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    pub path: String,
    pub outcome: PathOutcome,
}

impl PathReport {
    pub fn success(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: PathOutcome::Success,
        }
    }

    pub fn failure(path: impl Into<String>, error: FsError) -> Self {
        Self {
            path: path.into(),
            outcome: PathOutcome::Failure(error),
        }
    }
}

/// Every path touched on behalf of one command-line operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: String,
    pub paths: Vec<PathReport>,
}

impl TargetReport {
    pub fn new(target: impl Into<String>, paths: Vec<PathReport>) -> Self {
        Self {
            target: target.into(),
            paths,
        }
    }

    pub fn is_success(&self) -> bool {
        self.paths.iter().all(|p| p.outcome.is_success())
    }
}

/// Outcomes of a whole run, in operand order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub targets: Vec<TargetReport>,
}

impl ExecutionReport {
    pub fn new(targets: Vec<TargetReport>) -> Self {
        Self { targets }
    }

    /// All path outcomes, flattened in traversal order
    pub fn paths(&self) -> impl Iterator<Item = &PathReport> {
        self.targets.iter().flat_map(|t| t.paths.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PathReport> {
        self.paths().filter(|p| !p.outcome.is_success())
    }

    pub fn total(&self) -> usize {
        self.paths().count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// `Err(PathsFailed)` when any path was not updated
    pub fn check(&self) -> Result<()> {
        let failed = self.failed();
        if failed == 0 {
            Ok(())
        } else {
            Err(ChownError::PathsFailed {
                failed,
                total: self.total(),
            })
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.check() {
            Ok(()) => exit_code::SUCCESS,
            Err(err) => err.exit_code(),
        }
    }
}

pub fn success_line(path: &str, ownership: &Ownership) -> String {
    format!("ownership of '{}' changed to {}", path, ownership)
}

pub fn failure_line(path: &str, error: &FsError) -> String {
    format!("{}: cannot change ownership of '{}': {}", BIN_NAME, path, error)
}

/// Successes go to `out`, failures and the summary to `err`
pub fn write_report<O: Write, E: Write>(
    report: &ExecutionReport,
    ownership: &Ownership,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for path in report.paths() {
        match &path.outcome {
            PathOutcome::Success => writeln!(out, "{}", success_line(&path.path, ownership))?,
            PathOutcome::Failure(error) => writeln!(err, "{}", failure_line(&path.path, error))?,
        }
    }

    if let Err(failure) = report.check() {
        writeln!(err, "{}: {}", BIN_NAME, failure)?;
    }

    out.flush()?;
    err.flush()
}

pub fn print_report(report: &ExecutionReport, ownership: &Ownership) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    write_report(report, ownership, &mut stdout.lock(), &mut stderr.lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> ExecutionReport {
        ExecutionReport::new(vec![
            TargetReport::new(
                "/a",
                vec![PathReport::failure("/a", FsError::permission_denied("not owner"))],
            ),
            TargetReport::new(
                "/b",
                vec![PathReport::success("/b"), PathReport::success("/b/c")],
            ),
        ])
    }

    #[test]
    fn test_counts() {
        let report = mixed();
        assert_eq!(report.total(), 3);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert!(!report.targets[0].is_success());
        assert!(report.targets[1].is_success());
        assert_eq!(report.exit_code(), exit_code::PATHS_FAILED);
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = ExecutionReport::default();
        assert!(report.check().is_ok());
        assert_eq!(report.exit_code(), exit_code::SUCCESS);
    }

    #[test]
    fn test_write_report() {
        let ownership: Ownership = "alice:staff".parse().unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_report(&mixed(), &ownership, &mut out, &mut err).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ownership of '/b' changed to alice:staff\nownership of '/b/c' changed to alice:staff\n"
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "dfs-chown: cannot change ownership of '/a': Permission denied: not owner\n\
             dfs-chown: 1 of 3 paths failed\n"
        );
    }
}
