//! compatscan CLI binary entry point.
//! Delegates to modules for scan/settings/shims and prints results.

mod checks;
mod cli;
mod config;
mod models;
mod output;
mod scan;
mod settings;
mod shims;
mod utils;

use crate::models::{ScanResult, Summary};
use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            repo_root,
            sources,
            settings,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &sources,
                settings.as_deref(),
                output.as_deref(),
            );
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No compatscan.toml found; using defaults."
                );
            }
            if let Some(sp) = eff.settings.as_ref() {
                if !eff.repo_root.join(sp).is_file() {
                    eprintln!(
                        "{} {}",
                        crate::utils::error_prefix(),
                        format!("Settings file not found: {}", sp)
                    );
                    std::process::exit(2);
                }
            }
            if eff.output != "json" {
                eprintln!(
                    "{} {}",
                    crate::utils::info_prefix(),
                    format!("Scanning sources: [{}]", eff.sources.join(", "))
                );
            }
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let result = scan::run_scan(
                &repo_root_str,
                &eff.sources,
                eff.settings.as_deref(),
                &eff.check_overrides,
            );
            output::print_scan(&result, &eff.output, &eff.repo_root);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Settings {
            repo_root,
            path,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &[],
                path.as_deref(),
                output.as_deref(),
            );
            let Some(sp) = eff.settings.as_ref() else {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    "Settings file is not configured. Pass a path or set `settings` in compatscan.toml."
                );
                std::process::exit(2);
            };
            let full = eff.repo_root.join(sp);
            if !full.is_file() {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    format!("Settings file not found: {}", full.to_string_lossy())
                );
                std::process::exit(2);
            }
            let issues = settings::check_settings_file(&full);
            let summary = Summary::tally(&issues, 1, 0);
            let result = ScanResult { issues, summary };
            output::print_settings(&result, &eff.output, &eff.repo_root);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Shims {
            repo_root,
            sources,
            output,
        } => {
            let eff =
                config::resolve_effective(repo_root.as_deref(), &sources, None, output.as_deref());
            let targets = scan::collect_targets(&eff.repo_root, &eff.sources);
            let per_file: Vec<(String, usize)> = targets
                .iter()
                .map(|p| {
                    (
                        p.to_string_lossy().to_string(),
                        shims::count_shims_file(p),
                    )
                })
                .collect();
            let total: usize = per_file.iter().map(|(_, n)| *n).sum();
            output::print_shims(&per_file, total, &eff.output, &eff.repo_root);
        }
    }
}
