//! Configuration discovery and effective settings resolution.
//!
//! compatscan reads `compatscan.toml|yaml|yml` from the repository root
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `sources`: `["**/*.py"]`
//! - `settings`: none
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `compatscan.toml|yaml`.
pub struct CompatConfig {
    pub sources: Option<Vec<String>>,
    pub settings: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub checks: Option<HashMap<String, CheckOverride>>, // [checks.<id>]
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Per-check override under `[checks.<id>]`.
pub struct CheckOverride {
    pub enabled: Option<bool>,
    /// Severity override: error|warning|info
    pub level: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub sources: Vec<String>,
    pub settings: Option<String>,
    pub output: String,
    pub check_overrides: HashMap<String, CheckOverride>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `compatscan.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("compatscan.toml").exists()
            || cur.join("compatscan.yaml").exists()
            || cur.join("compatscan.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `CompatConfig` from `compatscan.toml` or `compatscan.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<CompatConfig> {
    let toml_path = root.join("compatscan.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: CompatConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["compatscan.yaml", "compatscan.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: CompatConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_sources: &[String],
    cli_settings: Option<&str>,
    cli_output: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let sources = if !cli_sources.is_empty() {
        cli_sources.to_vec()
    } else {
        cfg.sources
            .unwrap_or_else(|| vec!["**/*.py".to_string()])
    };

    let settings = cli_settings.map(|s| s.to_string()).or(cfg.settings);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        repo_root,
        sources,
        settings,
        output,
        check_overrides: cfg.checks.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("compatscan.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
sources = ["filebrowser/**/*.py"]
settings = "filebrowsertest/settings.py"
output = "json"
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), &[], None, None);
        assert_eq!(eff.sources, vec!["filebrowser/**/*.py".to_string()]);
        assert_eq!(eff.settings.as_deref(), Some("filebrowsertest/settings.py"));
        assert_eq!(eff.output, "json");
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("compatscan.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], None, None);
        assert_eq!(eff.sources, vec!["**/*.py".to_string()]);
        assert!(eff.settings.is_none());
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("compatscan.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
sources = ["app/**/*.py"]
output = "json"
            "#
        )
        .unwrap();

        let cli_sources = vec!["other/**/*.py".to_string()];
        let eff = resolve_effective(root.to_str(), &cli_sources, None, Some("human"));
        assert_eq!(eff.sources, cli_sources);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_check_overrides_loaded() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("compatscan.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
[checks.ugettext_usage]
enabled = false
[checks.simplejson_usage]
level = "warning"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], None, None);
        assert_eq!(
            eff.check_overrides.get("ugettext_usage").and_then(|o| o.enabled),
            Some(false)
        );
        assert_eq!(
            eff.check_overrides
                .get("simplejson_usage")
                .and_then(|o| o.level.as_deref()),
            Some("warning")
        );
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), &[], None, None);
        assert_eq!(eff.sources, vec!["**/*.py".to_string()]);
        assert_eq!(eff.output, "human");
        assert!(eff.check_overrides.is_empty());
    }
}
