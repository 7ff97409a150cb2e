//! Deprecation scan over source files matched by glob patterns.
//!
//! Produces a `ScanResult` with issues and a summary. A match is dropped
//! when its surrounding context looks like an intentional compatibility
//! shim: a try/except idiom inside the context window, or an explicit
//! fallback marker on the matching line. The window is a fixed span
//! (four lines before through three after the match), so it is a
//! heuristic rather than control-flow analysis.

use crate::checks::{compile_checks, CompiledCheck};
use crate::config::CheckOverride;
use crate::models::{Issue, ScanResult, Summary};
use crate::settings;
use crate::shims;
use glob::glob;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker comment that exempts a line from deprecation checks.
const FALLBACK_MARKER: &str = "# Django 3 fallback";

/// Run the full scan: source patterns, optional settings file, shim tally.
///
/// Source issues come first (file order x line order x check-table
/// order), then settings issues. The settings file, when it is also
/// matched by a source pattern, is checked once as settings only.
pub fn run_scan(
    repo_root: &str,
    sources: &[String],
    settings_path: Option<&str>,
    overrides: &HashMap<String, CheckOverride>,
) -> ScanResult {
    let root = PathBuf::from(repo_root);
    let checks = compile_checks(overrides);
    let settings_abs = settings_path.map(|s| root.join(s));

    let mut targets = collect_targets(&root, sources);
    if let Some(sp) = settings_abs.as_ref() {
        targets.retain(|t| t != sp);
    }

    // Indexed collect preserves target order, keeping the issue list
    // deterministic without a sort.
    let per_file: Vec<(Vec<Issue>, usize)> = targets
        .par_iter()
        .map(|path| scan_file(path, &checks))
        .collect();

    let mut issues: Vec<Issue> = Vec::new();
    let mut shim_count = 0usize;
    for (mut file_issues, file_shims) in per_file {
        issues.append(&mut file_issues);
        shim_count += file_shims;
    }

    let mut files = targets.len();
    if let Some(sp) = settings_abs.as_ref() {
        issues.extend(settings::check_settings_file(sp));
        files += 1;
    }

    let summary = Summary::tally(&issues, files, shim_count);
    ScanResult { issues, summary }
}

/// Expand source globs relative to `root`, deduplicated in glob order.
pub fn collect_targets(root: &Path, sources: &[String]) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in sources {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        for entry in glob(&pattern).expect("bad glob pattern").flatten() {
            if entry.is_file() && seen.insert(entry.clone()) {
                targets.push(entry);
            }
        }
    }
    targets
}

/// Scan one file; returns its issues and shim tally.
///
/// Read failures become a single `file_read_error` issue and the scan
/// continues with remaining files.
fn scan_file(path: &Path, checks: &[CompiledCheck]) -> (Vec<Issue>, usize) {
    let display = path.to_string_lossy().to_string();
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            return (
                vec![Issue {
                    file: display,
                    line: Some(0),
                    code: None,
                    check: "file_read_error".into(),
                    severity: "error".into(),
                    message: format!("Error reading file: {}", e),
                }],
                0,
            );
        }
    };
    let issues = scan_text(&display, &content, checks);
    let shim_count = shims::count_shims(&content);
    (issues, shim_count)
}

/// Apply the line checks to file text (pure, for tests and callers).
pub fn scan_text(file: &str, content: &str, checks: &[CompiledCheck]) -> Vec<Issue> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut issues: Vec<Issue> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        for check in checks {
            if !check.regex.is_match(line) {
                continue;
            }
            if is_fallback_line(line) || in_shim_context(&lines, idx) {
                continue;
            }
            issues.push(Issue {
                file: file.to_string(),
                line: Some(idx + 1),
                code: Some(line.trim().to_string()),
                check: check.id.to_string(),
                severity: check.severity.clone(),
                message: check.message.to_string(),
            });
        }
    }
    issues
}

/// True when the context window around `idx` holds a try/except idiom.
fn in_shim_context(lines: &[&str], idx: usize) -> bool {
    let start = idx.saturating_sub(4);
    let end = (idx + 4).min(lines.len());
    lines[start..end]
        .iter()
        .any(|l| l.contains("try:") || l.contains("except ImportError"))
}

/// True when the line itself is an explicit fallback.
fn is_fallback_line(line: &str) -> bool {
    line.contains("except ImportError") || line.contains(FALLBACK_MARKER)
}
