//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "compatscan",
    version,
    about = "Django 4/5 compatibility scanner",
    long_about = "compatscan — a tiny, fast CLI to scan Python/Django codebases for deprecated API usage and compatibility shims.\n\nConfiguration precedence: CLI > compatscan.toml > defaults.",
    after_help = "Examples:\n  compatscan scan --source 'filebrowser/**/*.py' --settings filebrowsertest/settings.py\n  compatscan scan --output json\n  compatscan settings filebrowsertest/settings.py\n  compatscan shims --source 'src/**/*.py'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning sources, settings, and shims.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current compatscan version."
    )]
    Version,
    /// Scan source files for deprecated API usage
    #[command(
        about = "Run the compatibility scan",
        long_about = "Scan files matched by source globs against the built-in deprecation checks, suppressing matches inside compatibility shims. Error-severity issues make the exit code 1.",
        after_help = "Examples:\n  compatscan scan\n  compatscan scan --source 'app/**/*.py' --output json"
    )]
    Scan {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long = "source", help = "Source glob, relative to the repo root (repeatable)")]
        sources: Vec<String>,
        #[arg(long, help = "Settings file to check, relative to the repo root")]
        settings: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Check a Django settings file
    #[command(
        about = "Check a settings file",
        long_about = "Apply the settings-text checks (middleware, auto field, template configuration) to one settings file.",
        after_help = "Examples:\n  compatscan settings filebrowsertest/settings.py"
    )]
    Settings {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(help = "Settings file path, relative to the repo root")]
        path: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Tally compatibility shims per file
    #[command(
        about = "Count compatibility shims",
        long_about = "Count try/except import fallback patterns per matched file. Informational only; always exits 0.",
        after_help = "Examples:\n  compatscan shims\n  compatscan shims --output json"
    )]
    Shims {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long = "source", help = "Source glob, relative to the repo root (repeatable)")]
        sources: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
