//! Centralized path functions for all app storage locations.
//!
//! Data root is `~/.claude-x/`, overridable with `CLAUDE_X_HOME`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "CLAUDE_X_HOME";

/// Data root: `$CLAUDE_X_HOME` or `~/.claude-x/`.
pub fn data_dir() -> Option<PathBuf> {
    if let Some(custom) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(custom));
    }
    dirs::home_dir().map(|h| h.join(".claude-x"))
}

/// SQLite database file: `<data_dir>/data/claude_x.db`.
pub fn db_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("data").join("claude_x.db"))
}

/// Optional configuration file: `<data_dir>/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.toml"))
}

/// Exported prompt library for a project: `<data_dir>/prompt-library/<project>-prompts.md`.
pub fn prompt_library_path(project: &str) -> Option<PathBuf> {
    data_dir().map(|d| library_file_in(&d, project))
}

pub(crate) fn library_file_in(data_dir: &Path, project: &str) -> PathBuf {
    data_dir
        .join("prompt-library")
        .join(format!("{project}-prompts.md"))
}

/// Claude Code home: `~/.claude/`.
pub fn claude_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".claude"))
}

/// Claude Code session transcripts: `~/.claude/projects/`.
pub fn claude_projects_dir() -> Option<PathBuf> {
    claude_dir().map(|d| d.join("projects"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path() {
        let path = db_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().ends_with("claude_x.db"));
        assert!(path.parent().unwrap().ends_with("data"));
    }

    #[test]
    fn test_library_file_in() {
        let path = library_file_in(Path::new("/tmp/cx"), "front");
        assert_eq!(path, PathBuf::from("/tmp/cx/prompt-library/front-prompts.md"));
    }

    #[test]
    fn test_claude_projects_dir() {
        let dir = claude_projects_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with(".claude/projects"));
    }
}
