//! Shared data models for scan output.

use serde::Serialize;

#[derive(Serialize, Clone)]
/// A single compatibility issue with severity and location.
///
/// Settings-level issues carry no line number; file read failures use
/// line 0 and no code field, matching the report format.
pub struct Issue {
    pub file: String,
    pub line: Option<usize>,
    pub code: Option<String>,
    pub check: String,
    pub severity: String,
    pub message: String,
}

#[derive(Serialize)]
/// Aggregated counts used by printers and exit-code policy.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
    pub shims: usize,
}

#[derive(Serialize)]
/// Scan results container.
pub struct ScanResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl Summary {
    /// Tally severities over a finished issue list.
    pub fn tally(issues: &[Issue], files: usize, shims: usize) -> Summary {
        let mut errs = 0usize;
        let mut warns = 0usize;
        let mut infos = 0usize;
        for is in issues {
            match is.severity.as_str() {
                "error" => errs += 1,
                "warning" | "warn" => warns += 1,
                _ => infos += 1,
            }
        }
        Summary {
            errors: errs,
            warnings: warns,
            infos,
            files,
            shims,
        }
    }
}
