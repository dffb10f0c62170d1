// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a `Store` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Errors that can occur while producing aggregate reports.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl AnalyticsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Named prompt-template lookup failures.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {name} (available: {})", available.join(", "))]
    NotFound { name: String, available: Vec<String> },
}

/// Errors that can occur when loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_lists_alternatives() {
        let err = TemplateError::NotFound {
            name: "nope".into(),
            available: vec!["bug_fix".into(), "code_review".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("bug_fix, code_review"));
    }

    #[test]
    fn test_analytics_error_from_store() {
        let err: AnalyticsError = StoreError::backend("disk full").into();
        assert!(matches!(err, AnalyticsError::Store(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_analytics_error_io_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AnalyticsError::io("/tmp/library.md", io_err);
        assert!(err.to_string().contains("/tmp/library.md"));
    }
}
