//! Built-in deprecation checks and their compilation.
//!
//! The table is a static ordered slice; declaration order is the
//! tie-break order for deterministic reporting. Severity is one of
//! `error|warning|info`. Config may disable a check or override its
//! level via `[checks.<id>]`.

use crate::config::CheckOverride;
use regex::Regex;
use std::collections::HashMap;

/// A single registered check: id, line regex, message, default severity.
pub struct CheckDef {
    pub id: &'static str,
    pub pattern: &'static str,
    pub message: &'static str,
    pub severity: &'static str,
}

/// A check with its compiled regex and effective severity.
pub struct CompiledCheck {
    pub id: &'static str,
    pub regex: Regex,
    pub message: &'static str,
    pub severity: String,
}

/// Deprecated-API checks applied per source line.
///
/// Note: `ugettext_usage` also matches `ugettext_lazy` occurrences, so a
/// lazy call reports under both ids. This mirrors long-standing scanner
/// behavior and keeps per-id counts simple.
pub const BUILTIN_CHECKS: &[CheckDef] = &[
    CheckDef {
        id: "ugettext_usage",
        pattern: r"ugettext",
        message: "ugettext is deprecated in Django 4+, should use gettext",
        severity: "warning",
    },
    CheckDef {
        id: "ugettext_lazy_usage",
        pattern: r"ugettext_lazy",
        message: "ugettext_lazy is deprecated in Django 4+, should use gettext_lazy",
        severity: "warning",
    },
    CheckDef {
        id: "render_to_response_usage",
        pattern: r"render_to_response\(",
        message: "render_to_response is deprecated, should use render",
        severity: "warning",
    },
    CheckDef {
        id: "django_conf_urls",
        pattern: r"from django\.conf\.urls import url",
        message: "django.conf.urls.url is deprecated, should use django.urls.re_path",
        severity: "warning",
    },
    CheckDef {
        id: "smart_unicode_usage",
        pattern: r"smart_unicode",
        message: "smart_unicode is deprecated, should use smart_str",
        severity: "error",
    },
    CheckDef {
        id: "simplejson_usage",
        pattern: r"from django\.utils import simplejson",
        message: "django.utils.simplejson is deprecated, should use standard json",
        severity: "info",
    },
    CheckDef {
        id: "forms_util_usage",
        pattern: r"from django\.forms import util",
        message: "django.forms.util is deprecated, should use django.forms.utils",
        severity: "warning",
    },
];

/// Compile the built-in table, applying per-check config overrides.
///
/// Disabled checks are skipped entirely; a `level` override replaces the
/// default severity. Table order is preserved.
pub fn compile_checks(overrides: &HashMap<String, CheckOverride>) -> Vec<CompiledCheck> {
    let mut out = Vec::with_capacity(BUILTIN_CHECKS.len());
    for def in BUILTIN_CHECKS {
        let ov = overrides.get(def.id);
        if ov.and_then(|o| o.enabled) == Some(false) {
            continue;
        }
        let severity = ov
            .and_then(|o| o.level.clone())
            .unwrap_or_else(|| def.severity.to_string());
        // Patterns are static literals; compilation cannot fail.
        let regex = Regex::new(def.pattern).expect("builtin check pattern");
        out.push(CompiledCheck {
            id: def.id,
            regex,
            message: def.message,
            severity,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ids_unique_and_severities_valid() {
        let mut seen = std::collections::HashSet::new();
        for def in BUILTIN_CHECKS {
            assert!(seen.insert(def.id), "duplicate check id {}", def.id);
            assert!(matches!(def.severity, "error" | "warning" | "info"));
        }
    }

    #[test]
    fn test_compile_applies_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "ugettext_usage".to_string(),
            CheckOverride {
                enabled: Some(false),
                level: None,
            },
        );
        overrides.insert(
            "simplejson_usage".to_string(),
            CheckOverride {
                enabled: None,
                level: Some("warning".to_string()),
            },
        );
        let compiled = compile_checks(&overrides);
        assert_eq!(compiled.len(), BUILTIN_CHECKS.len() - 1);
        assert!(compiled.iter().all(|c| c.id != "ugettext_usage"));
        let sj = compiled.iter().find(|c| c.id == "simplejson_usage").unwrap();
        assert_eq!(sj.severity, "warning");
    }

    #[test]
    fn test_compile_preserves_table_order() {
        let compiled = compile_checks(&HashMap::new());
        let ids: Vec<&str> = compiled.iter().map(|c| c.id).collect();
        let expected: Vec<&str> = BUILTIN_CHECKS.iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
    }
}
