// crates/core/src/extensions.rs
//! Installed Claude Code extensions (slash commands and skills) and the
//! matcher that recommends one for a prompt.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Source of the set of installed extension names.
pub trait ExtensionDetector {
    fn detect_installed(&self) -> BTreeSet<String>;
}

/// Detector that reports nothing installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtensions;

impl ExtensionDetector for NoExtensions {
    fn detect_installed(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Scans `<claude_dir>/commands/**/*.md` and `<claude_dir>/skills/<name>/`.
#[derive(Debug, Clone)]
pub struct FsExtensionDetector {
    pub claude_dir: PathBuf,
}

impl FsExtensionDetector {
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
        }
    }
}

impl ExtensionDetector for FsExtensionDetector {
    fn detect_installed(&self) -> BTreeSet<String> {
        let mut installed = BTreeSet::new();
        scan_commands(&self.claude_dir.join("commands"), &mut installed);
        scan_skills(&self.claude_dir.join("skills"), &mut installed);
        debug!(count = installed.len(), dir = %self.claude_dir.display(), "Detected extensions");
        installed
    }
}

/// Collect `.md` file stems, recursing into subdirectories.
fn scan_commands(dir: &Path, out: &mut BTreeSet<String>) {
    if !dir.exists() {
        return;
    }
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Cannot read commands directory");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some("md") {
            if let Some(stem) = path.file_stem().and_then(|n| n.to_str()) {
                out.insert(stem.to_string());
            }
        }
    }
}

/// Every direct subdirectory of `skills/` is a skill.
fn scan_skills(dir: &Path, out: &mut BTreeSet<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot read skills directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                out.insert(name.to_string());
            }
        }
    }
}

// ============================================================================
// Matching
// ============================================================================

/// An installed command that fits the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionSuggestion {
    pub command: String,
    pub reason: String,
    pub confidence: f64,
}

struct IntentRule {
    intent: &'static str,
    keywords: &'static [&'static str],
    commands: &'static [&'static str],
    confidence: f64,
}

/// Evaluated in order; first installed candidate wins.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: "code review",
        keywords: &["리뷰", "review", "검토"],
        commands: &["review", "code-review", "review-pr"],
        confidence: 0.8,
    },
    IntentRule {
        intent: "testing",
        keywords: &["테스트", "test"],
        commands: &["test", "tdd", "test-driven-development"],
        confidence: 0.75,
    },
    IntentRule {
        intent: "commit",
        keywords: &["커밋", "commit"],
        commands: &["commit", "commit-push-pr"],
        confidence: 0.8,
    },
    IntentRule {
        intent: "debugging",
        keywords: &["버그", "에러", "오류", "bug", "error", "debug"],
        commands: &["debug", "systematic-debugging", "fix"],
        confidence: 0.7,
    },
    IntentRule {
        intent: "refactoring",
        keywords: &["리팩토링", "refactor"],
        commands: &["refactor", "simplify"],
        confidence: 0.7,
    },
    IntentRule {
        intent: "documentation",
        keywords: &["문서", "docs", "readme", "documentation"],
        commands: &["docs", "document", "readme"],
        confidence: 0.65,
    },
    IntentRule {
        intent: "planning",
        keywords: &["계획", "설계", "plan", "design"],
        commands: &["plan", "brainstorm", "writing-plans"],
        confidence: 0.65,
    },
];

/// Recommend an installed command whose intent matches the prompt.
pub fn suggest_extension_command(
    prompt: &str,
    installed: &BTreeSet<String>,
) -> Option<ExtensionSuggestion> {
    if prompt.trim().is_empty() || installed.is_empty() {
        return None;
    }
    let lower = prompt.to_lowercase();

    INTENT_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
        .find_map(|rule| {
            rule.commands
                .iter()
                .find(|cmd| installed.contains(**cmd))
                .map(|cmd| ExtensionSuggestion {
                    command: format!("/{cmd}"),
                    reason: format!("Prompt looks like a {} task", rule.intent),
                    confidence: rule.confidence,
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_commands_and_skills() {
        let tmp = TempDir::new().unwrap();
        let commands = tmp.path().join("commands");
        fs::create_dir_all(commands.join("git")).unwrap();
        fs::write(commands.join("review.md"), "# Review").unwrap();
        fs::write(commands.join("git/commit.md"), "# Commit").unwrap();
        fs::write(commands.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(tmp.path().join("skills/systematic-debugging")).unwrap();

        let installed = FsExtensionDetector::new(tmp.path()).detect_installed();
        assert_eq!(installed, set(&["commit", "review", "systematic-debugging"]));
    }

    #[test]
    fn test_missing_claude_dir_no_crash() {
        let installed = FsExtensionDetector::new("/nonexistent/claude-x/dir").detect_installed();
        assert!(installed.is_empty());
        assert!(NoExtensions.detect_installed().is_empty());
    }

    #[test]
    fn test_suggest_installed_command() {
        let suggestion = suggest_extension_command("이 PR 리뷰해줘", &set(&["review", "commit"]))
            .expect("review intent should match");
        assert_eq!(suggestion.command, "/review");
        assert!(suggestion.confidence > 0.0 && suggestion.confidence <= 1.0);
    }

    #[test]
    fn test_suggest_skips_uninstalled_intent() {
        // Review intent matches but nothing for it is installed; debugging wins.
        let suggestion =
            suggest_extension_command("Review this bug", &set(&["systematic-debugging"])).unwrap();
        assert_eq!(suggestion.command, "/systematic-debugging");
    }

    #[test]
    fn test_suggest_none() {
        assert!(suggest_extension_command("안녕", &set(&["review"])).is_none());
        assert!(suggest_extension_command("review this", &BTreeSet::new()).is_none());
    }
}
