// crates/core/src/scanner.rs
//! Sensitive-data detection for generated code snippets.

use std::sync::LazyLock;

use regex_lite::Regex;

pub trait Scanner {
    /// Whether the snippet appears to contain a credential or secret.
    fn has_sensitive(&self, code: &str) -> bool;
}

const SENSITIVE_PATTERNS: &[&str] = &[
    // API key prefixes
    r"sk-[A-Za-z0-9_-]{20,}",
    r"ghp_[A-Za-z0-9]{36}",
    r"AKIA[0-9A-Z]{16}",
    r"xox[bp]-[A-Za-z0-9-]{10,}",
    // Private keys
    r"-----BEGIN (RSA |EC |OPENSSH |DSA )?PRIVATE KEY-----",
    // Literal assignments
    r#"(?i)(password|passwd|secret|token|api_key|apikey)\s*[:=]\s*["'][^"'\s]{4,}["']"#,
    r"(?i)bearer\s+[A-Za-z0-9._-]{20,}",
];

static SENSITIVE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SENSITIVE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Regex-based scanner over well-known secret shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScanner;

impl Scanner for PatternScanner {
    fn has_sensitive(&self, code: &str) -> bool {
        SENSITIVE.iter().any(|re| re.is_match(code))
    }
}
