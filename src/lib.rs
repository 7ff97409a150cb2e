//! compatscan core library.
//!
//! This crate exposes programmatic APIs for scanning Python/Django
//! codebases for deprecated API usage, checking settings files, and
//! tallying compatibility shims.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `checks`: The built-in deprecation check table and compilation.
//! - `scan`: The per-line scan pass with shim-context suppression.
//! - `settings`: Settings-text checks.
//! - `shims`: Compatibility-shim tally.
//! - `models`: Issue/summary output structs.
//! - `output`: Human/JSON printers.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod scan;
pub mod settings;
pub mod shims;
pub mod utils;
