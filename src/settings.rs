//! Settings-file compatibility checks.
//!
//! Three independent presence/absence checks over the raw settings text,
//! at most one issue each. No Python parsing; the new-style MIDDLEWARE
//! presence test uses an assignment regex so it is not shadowed by the
//! `MIDDLEWARE_CLASSES` substring.

use crate::models::Issue;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Apply the settings checks to a settings file's full text.
pub fn check_settings_text(path: &str, content: &str) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();

    let middleware_assign = Regex::new(r"(?m)^\s*MIDDLEWARE\s*=").expect("builtin pattern");
    if content.contains("MIDDLEWARE_CLASSES") && !middleware_assign.is_match(content) {
        issues.push(Issue {
            file: path.to_string(),
            line: None,
            code: None,
            check: "middleware_setting".into(),
            severity: "warning".into(),
            message: "MIDDLEWARE_CLASSES is deprecated, should use MIDDLEWARE".into(),
        });
    }

    if !content.contains("DEFAULT_AUTO_FIELD") {
        issues.push(Issue {
            file: path.to_string(),
            line: None,
            code: None,
            check: "default_auto_field".into(),
            severity: "info".into(),
            message: "DEFAULT_AUTO_FIELD should be set for Django 3.2+".into(),
        });
    }

    if content.contains("TEMPLATE_DIRS") || content.contains("TEMPLATE_LOADERS") {
        issues.push(Issue {
            file: path.to_string(),
            line: None,
            code: None,
            check: "template_settings".into(),
            severity: "error".into(),
            message: "Old template settings detected, should use TEMPLATES".into(),
        });
    }

    issues
}

/// Read a settings file and check it; read failures become one issue.
pub fn check_settings_file(path: &Path) -> Vec<Issue> {
    let display = path.to_string_lossy().to_string();
    match fs::read_to_string(path) {
        Ok(content) => check_settings_text(&display, &content),
        Err(e) => vec![Issue {
            file: display,
            line: None,
            code: None,
            check: "settings_read_error".into(),
            severity: "error".into(),
            message: format!("Error reading settings: {}", e),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_middleware_without_new_setting_warns_once() {
        let content = "MIDDLEWARE_CLASSES = [\n    'django.middleware.common.CommonMiddleware',\n]\nDEFAULT_AUTO_FIELD = 'django.db.models.BigAutoField'\n";
        let issues = check_settings_text("settings.py", content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check, "middleware_setting");
        assert_eq!(issues[0].severity, "warning");
    }

    #[test]
    fn test_middleware_assignment_suppresses_legacy_warning() {
        let content = "MIDDLEWARE_CLASSES = []\nMIDDLEWARE = []\nDEFAULT_AUTO_FIELD = 'x'\n";
        let issues = check_settings_text("settings.py", content);
        assert!(issues.iter().all(|i| i.check != "middleware_setting"));
    }

    #[test]
    fn test_old_template_settings_are_an_error() {
        let content = "TEMPLATE_DIRS = []\nDEFAULT_AUTO_FIELD = 'x'\nMIDDLEWARE = []\n";
        let issues = check_settings_text("settings.py", content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check, "template_settings");
        assert_eq!(issues[0].severity, "error");
    }

    #[test]
    fn test_missing_default_auto_field_is_info() {
        let content = "MIDDLEWARE = []\nTEMPLATES = []\n";
        let issues = check_settings_text("settings.py", content);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check, "default_auto_field");
        assert_eq!(issues[0].severity, "info");
    }

    #[test]
    fn test_modern_settings_are_clean() {
        let content = "MIDDLEWARE = [\n    'django.middleware.security.SecurityMiddleware',\n]\nDEFAULT_AUTO_FIELD = 'django.db.models.BigAutoField'\nTEMPLATES = [\n    {'BACKEND': 'django.template.backends.django.DjangoTemplates'},\n]\n";
        assert!(check_settings_text("settings.py", content).is_empty());
    }

    #[test]
    fn test_unreadable_settings_becomes_issue() {
        let dir = tempfile::tempdir().unwrap();
        let issues = check_settings_file(&dir.path().join("missing.py"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check, "settings_read_error");
        assert_eq!(issues[0].severity, "error");
    }
}
