// crates/core/src/types.rs
//! Value types shared by the scorers, the coach, and aggregate reporting.

use serde::{Deserialize, Serialize};

use crate::extensions::ExtensionSuggestion;
use crate::i18n::Language;

// ============================================================================
// Session data
// ============================================================================

/// Per-session numeric aggregates supplied by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub message_count: u32,
    pub user_prompt_count: u32,
    pub code_count: u32,
    pub total_lines: u32,
    /// Count of distinct code languages produced in the session.
    pub language_diversity: u32,
    pub sensitive_count: u32,
}

/// One session as seen by aggregate reporting: identity plus metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub project: String,
    pub first_prompt: String,
    pub git_branch: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub metrics: SessionMetrics,
}

// ============================================================================
// Scores
// ============================================================================

/// Structure and context scores of a single prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptScores {
    pub structure: f64,
    pub context: f64,
}

impl PromptScores {
    /// Score a prompt on structure and context.
    pub fn of(prompt: &str) -> Self {
        Self {
            structure: crate::scoring::calculate_structure_score(prompt),
            context: crate::scoring::calculate_context_score(prompt),
        }
    }

    pub fn combined(&self) -> f64 {
        self.structure + self.context
    }
}

/// Full v2 breakdown: five sub-scores plus the weighted composite, all in [0, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub structure_score: f64,
    pub context_score: f64,
    pub productivity_score: f64,
    pub efficiency_score: f64,
    pub diversity_score: f64,
    pub composite_score: f64,
}

// ============================================================================
// Coaching
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// Named problem categories produced by the problem identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    NoTarget,
    NoContext,
    Conversational,
    NoFile,
    NoError,
}

impl ProblemKind {
    /// Catalog key stem, e.g. `no_target`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTarget => "no_target",
            Self::NoContext => "no_context",
            Self::Conversational => "conversational",
            Self::NoFile => "no_file",
            Self::NoError => "no_error",
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected prompt problem, localized at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub issue: ProblemKind,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub how_to_fix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    UserPattern,
    Generic,
}

/// An improvement suggestion with a reusable template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub template: String,
    pub example: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Current vs. projected value of one outcome metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetric<T> {
    pub current: T,
    pub expected: T,
    /// Signed percentage string (`"+40%"`, `"-33%"`) or `"N/A"`.
    pub improvement: String,
}

/// Projected improvement if the suggestions are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub messages: ImpactMetric<u32>,
    pub code_generation: ImpactMetric<u32>,
    pub success_rate: ImpactMetric<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Strength,
    Weakness,
}

/// A strength or weakness derived from the user's own best prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    pub recommendation: String,
}

/// Everything `PromptCoach::analyze` produces for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachingResult {
    pub language: Language,
    pub original_prompt: String,
    pub scores: PromptScores,
    pub problems: Vec<Problem>,
    pub suggestions: Vec<Suggestion>,
    pub extension_suggestion: Option<ExtensionSuggestion>,
    pub expected_impact: ImpactEstimate,
    pub user_insights: Vec<UserInsight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_summary_flattens_metrics() {
        let summary = SessionSummary {
            session_id: "s1".into(),
            metrics: SessionMetrics {
                message_count: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["message_count"], 4);
        assert_eq!(json["session_id"], "s1");
    }

    #[test]
    fn test_suggestion_serializes_type_field() {
        let s = Suggestion {
            kind: SuggestionKind::UserPattern,
            title: "t".into(),
            template: "[FILE]".into(),
            example: "a.py".into(),
            confidence: 0.8,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"type\":\"user_pattern\""));
    }

    #[test]
    fn test_problem_kind_keys() {
        assert_eq!(ProblemKind::NoTarget.as_str(), "no_target");
        assert_eq!(ProblemKind::NoError.to_string(), "no_error");
        let json = serde_json::to_string(&ProblemKind::Conversational).unwrap();
        assert_eq!(json, "\"conversational\"");
    }

    #[test]
    fn test_prompt_scores_combined() {
        let scores = PromptScores {
            structure: 4.0,
            context: 2.0,
        };
        assert_eq!(scores.combined(), 6.0);
    }
}
