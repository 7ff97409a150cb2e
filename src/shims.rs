//! Compatibility-shim tally.
//!
//! A shim is a try/except import fallback letting code run under both
//! old and new Django versions. The tally is informational only and
//! never affects the exit code.

use regex::RegexBuilder;
use std::fs;
use std::path::Path;

/// Fallback-import patterns counted per file (presence, not occurrences).
/// Compiled with dot-matches-newline so `\s*` and `.*` span line breaks.
const SHIM_PATTERNS: &[&str] = &[
    r"try:\s*from django\.utils\.translation import gettext",
    r"except ImportError:\s*from django\.utils\.translation import ugettext",
    r"try:\s*from django\.forms import utils",
    r"except ImportError.*from django\.forms import util",
    r"try:\s*from django\.utils import simplejson",
    r"except ImportError.*import json",
];

/// Count how many of the fixed shim patterns appear in `content`.
pub fn count_shims(content: &str) -> usize {
    let mut found = 0usize;
    for pat in SHIM_PATTERNS {
        let re = RegexBuilder::new(pat)
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .expect("builtin shim pattern");
        if re.is_match(content) {
            found += 1;
        }
    }
    found
}

/// Count shims in a file; unreadable files count as zero.
pub fn count_shims_file(path: &Path) -> usize {
    match fs::read_to_string(path) {
        Ok(content) => count_shims(&content),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_multiline_fallback_pair() {
        let src = "try:\n    from django.utils.translation import gettext as _\n\
                   except ImportError:\n    from django.utils.translation import ugettext as _\n";
        assert_eq!(count_shims(src), 2);
    }

    #[test]
    fn test_presence_not_occurrences() {
        let one = "try:\n    from django.forms import utils\nexcept Exception:\n    pass\n";
        let twice = format!("{one}{one}");
        assert_eq!(count_shims(one), 1);
        assert_eq!(count_shims(&twice), 1);
    }

    #[test]
    fn test_monotonic_as_patterns_are_added() {
        let mut src = String::from("x = 1\n");
        let before = count_shims(&src);
        assert_eq!(before, 0);
        src.push_str("try:\n    from django.utils import simplejson\n");
        let mid = count_shims(&src);
        assert!(mid >= before);
        src.push_str("except ImportError:\n    import json\n");
        let after = count_shims(&src);
        assert!(after >= mid);
        assert_eq!(after, 2);
    }

    #[test]
    fn test_unreadable_file_counts_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_shims_file(&dir.path().join("missing.py")), 0);
    }
}
