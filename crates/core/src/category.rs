// crates/core/src/category.rs
//! Rule-based classification of first prompts and git branches.
//!
//! | Category | Keywords (first match wins) |
//! |----------|-----------------------------|
//! | Code Review | 리뷰, review |
//! | Testing | 테스트, test |
//! | Bug Fix | 버그, bug, fix |
//! | Feature | 구현, implement, add |
//! | Refactoring | 리팩토링, refactor |
//! | Docs | 문서, doc |
//! | Other | everything else |

use serde::{Deserialize, Serialize};

/// Task category of a session, derived from its first prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    CodeReview,
    Testing,
    BugFix,
    Feature,
    Refactoring,
    Docs,
    Other,
}

/// Keyword rules in evaluation order.
const CATEGORY_RULES: &[(PromptCategory, &[&str])] = &[
    (PromptCategory::CodeReview, &["리뷰", "review"]),
    (PromptCategory::Testing, &["테스트", "test"]),
    (PromptCategory::BugFix, &["버그", "bug", "fix"]),
    (PromptCategory::Feature, &["구현", "implement", "add"]),
    (PromptCategory::Refactoring, &["리팩토링", "refactor"]),
    (PromptCategory::Docs, &["문서", "doc"]),
];

impl PromptCategory {
    /// Classify a first prompt by case-insensitive keyword containment.
    pub fn classify(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(category, _)| *category)
            .unwrap_or(PromptCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeReview => "code_review",
            Self::Testing => "testing",
            Self::BugFix => "bug_fix",
            Self::Feature => "feature",
            Self::Refactoring => "refactoring",
            Self::Docs => "docs",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CodeReview => "Code Review",
            Self::Testing => "Testing",
            Self::BugFix => "Bug Fix",
            Self::Feature => "Feature",
            Self::Refactoring => "Refactoring",
            Self::Docs => "Docs",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Branch type of a session's git branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchType {
    Feature,
    Hotfix,
    Dev,
    Main,
    Other,
}

impl BranchType {
    pub fn classify(branch: Option<&str>) -> Self {
        match branch {
            Some(b) if b.starts_with("feature/") => Self::Feature,
            Some(b) if b.starts_with("hotfix/") => Self::Hotfix,
            Some("dev") => Self::Dev,
            Some("main") | Some("master") => Self::Main,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Hotfix => "hotfix",
            Self::Dev => "dev",
            Self::Main => "main",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Hotfix => "Hotfix",
            Self::Dev => "Dev",
            Self::Main => "Main",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for BranchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
