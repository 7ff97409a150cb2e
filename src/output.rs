//! Output rendering for scan, settings, and shims commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! serialized `ScanResult`; the human form groups issues by severity and
//! ends with a summary and derived recommendations.

use crate::models::{Issue, ScanResult};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Display path relative to the repo root when possible.
fn rel_display(file: &str, root: &Path) -> String {
    pathdiff::diff_paths(Path::new(file), root)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string())
}

fn line_display(issue: &Issue) -> String {
    match issue.line {
        Some(n) => n.to_string(),
        None => "?".to_string(),
    }
}

/// Print one severity section (header plus indented entries).
fn print_section(title: &str, issues: &[&Issue], root: &Path, color: bool) {
    if issues.is_empty() {
        return;
    }
    let header = format!("{} ({}):", title, issues.len());
    if color {
        let painted = match title {
            "ERRORS" => header.red().bold().to_string(),
            "WARNINGS" => header.yellow().bold().to_string(),
            _ => header.blue().bold().to_string(),
        };
        println!("\n{}", painted);
    } else {
        println!("\n{}", header);
    }
    for is in issues {
        println!("  {}:{}", rel_display(&is.file, root), line_display(is));
        println!("    {}", is.message);
        if let Some(code) = is.code.as_ref().filter(|c| !c.is_empty()) {
            println!("    Code: {}", code);
        }
    }
}

fn split_by_severity<'a>(res: &'a ScanResult) -> (Vec<&'a Issue>, Vec<&'a Issue>, Vec<&'a Issue>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for is in &res.issues {
        match is.severity.as_str() {
            "error" => errors.push(is),
            "warning" | "warn" => warnings.push(is),
            _ => infos.push(is),
        }
    }
    (errors, warnings, infos)
}

/// Print scan results in the requested format.
pub fn print_scan(res: &ScanResult, output: &str, root: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            let (errors, warnings, infos) = split_by_severity(res);
            print_section("ERRORS", &errors, root, color);
            print_section("WARNINGS", &warnings, root, color);
            print_section("INFO", &infos, root, color);
            println!("\nCOMPATIBILITY:");
            println!("  Found {} compatibility shims", res.summary.shims);
            print_summary(res, color);
            print_recommendations(res, color);
        }
    }
}

/// Print settings-only results: sections and summary, no shim tally.
pub fn print_settings(res: &ScanResult, output: &str, root: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            let (errors, warnings, infos) = split_by_severity(res);
            print_section("ERRORS", &errors, root, color);
            print_section("WARNINGS", &warnings, root, color);
            print_section("INFO", &infos, root, color);
            if res.issues.is_empty() {
                println!("No settings issues found");
            }
            print_summary(res, color);
        }
    }
}

/// Print per-file shim tallies and the total.
pub fn print_shims(per_file: &[(String, usize)], total: usize, output: &str, root: &Path) {
    match output {
        "json" => {
            let items: Vec<_> = per_file
                .iter()
                .map(|(file, shims)| json!({"file": file, "shims": shims}))
                .collect();
            let out = json!({"files": items, "total": total});
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        _ => {
            let color = use_colors(output);
            for (file, shims) in per_file {
                if *shims > 0 {
                    println!("  {}: {}", rel_display(file, root), shims);
                }
            }
            let line = format!("Found {} compatibility shims in {} files", total, per_file.len());
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn print_summary(res: &ScanResult, color: bool) {
    let header = "SUMMARY:";
    if color {
        println!("\n{}", header.bold());
    } else {
        println!("\n{}", header);
    }
    println!("  Files analyzed: {}", res.summary.files);
    println!("  Errors: {}", res.summary.errors);
    println!("  Warnings: {}", res.summary.warnings);
    println!("  Info: {}", res.summary.infos);
}

fn print_recommendations(res: &ScanResult, color: bool) {
    let header = "RECOMMENDATIONS:";
    if color {
        println!("\n{}", header.bold());
    } else {
        println!("\n{}", header);
    }
    let assessment = if res.summary.errors > 0 {
        let s = "CRITICAL: Fix errors before upgrading to Django 4/5";
        if color {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    } else if res.summary.warnings > 0 {
        let s = "MODERATE: Address warnings for better Django 4/5 compatibility";
        if color {
            s.yellow().bold().to_string()
        } else {
            s.to_string()
        }
    } else {
        let s = "GOOD: No critical issues found";
        if color {
            s.green().bold().to_string()
        } else {
            s.to_string()
        }
    };
    println!("  {}", assessment);
    if res.summary.shims > 0 {
        println!("  Compatibility shims are present - good for gradual migration");
    } else {
        println!("  No compatibility shims found - may cause issues during upgrade");
    }
}

/// Compose scan JSON object (pure) for testing/snapshot purposes.
pub fn compose_scan_json(res: &ScanResult) -> JsonVal {
    // Directly serialize ScanResult as JSON, keeping stable shape
    serde_json::to_value(res).unwrap()
}
