// crates/core/src/tools.rs
//! Tool-gateway operations: transport-free functions returning serializable
//! results.
//!
//! When there is no underlying session data, results carry a guidance
//! `message` explaining how to collect some. That message is part of the
//! result, not an error.

use serde::Serialize;

use crate::analytics::{
    BranchStat, CategoryStat, LanguageStat, PromptAnalytics, RankedPrompt, Store, TimeAnalysis,
};
use crate::category::PromptCategory;
use crate::error::AnalyticsError;
use crate::library::truncate_prompt;
use crate::scoring::{calculate_context_score, calculate_structure_score};

const COLLECT_STEPS: &str = "1. Run 'cx import' to load your Claude Code sessions, or\n\
     2. Just use Claude Code normally - sessions are auto-saved to ~/.claude/projects/\n\
     3. Make sure you've used Claude Code at least once since installing claude-x";

/// Best prompts examined by [`get_prompt_patterns`].
const PATTERN_POOL: usize = 20;

fn no_data_message() -> String {
    format!("No session data found. To collect data:\n{COLLECT_STEPS}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptListResult {
    pub count: usize,
    pub prompts: Vec<RankedPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PromptListResult {
    fn from_prompts(prompts: Vec<RankedPrompt>) -> Self {
        let message = prompts.is_empty().then(no_data_message);
        Self {
            count: prompts.len(),
            prompts,
            message,
        }
    }
}

pub fn get_best_prompts<S: Store>(
    analytics: &PromptAnalytics<S>,
    project: Option<&str>,
    limit: usize,
    strict: bool,
    min_quality: Option<f64>,
) -> Result<PromptListResult, AnalyticsError> {
    let prompts = analytics.get_best_prompts(project, limit, strict, min_quality)?;
    Ok(PromptListResult::from_prompts(prompts))
}

pub fn get_worst_prompts<S: Store>(
    analytics: &PromptAnalytics<S>,
    project: Option<&str>,
    limit: usize,
) -> Result<PromptListResult, AnalyticsError> {
    let prompts = analytics.get_worst_prompts(project, limit)?;
    Ok(PromptListResult::from_prompts(prompts))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionAnalysisResult {
    pub time_analysis: TimeAnalysis,
    pub language_distribution: Vec<LanguageStat>,
    pub category_stats: Vec<CategoryStat>,
    pub branch_productivity: Vec<BranchStat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn analyze_sessions<S: Store>(
    analytics: &PromptAnalytics<S>,
    project: Option<&str>,
) -> Result<SessionAnalysisResult, AnalyticsError> {
    let report = analytics.generate_full_report(project)?;
    let message = (analytics.session_count(project)? == 0).then(|| {
        format!(
            "No session data found for project '{}'. To collect data:\n{COLLECT_STEPS}",
            report.project
        )
    });
    Ok(SessionAnalysisResult {
        time_analysis: report.time_analysis,
        language_distribution: report.language_distribution,
        category_stats: report.category_stats,
        branch_productivity: report.branch_productivity,
        message,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptScoreResult {
    pub structure_score: f64,
    pub context_score: f64,
    pub combined_score: f64,
    pub suggestions: Vec<String>,
}

pub fn score_prompt(prompt: &str) -> PromptScoreResult {
    let structure = calculate_structure_score(prompt);
    let context = calculate_context_score(prompt);

    let mut suggestions = Vec::new();
    if structure < 4.0 {
        suggestions
            .push("Add a clear goal or action verb (e.g., '추가해줘', 'fix', 'implement')".to_string());
    }
    if structure < 6.0 {
        suggestions.push("Be more specific about what you want to achieve".to_string());
    }
    if context < 2.0 {
        suggestions.push("Add file paths or component names".to_string());
    }
    if context < 4.0 {
        suggestions.push("Mention the technology stack (React, TypeScript, etc.)".to_string());
    }
    if prompt.chars().count() < 20 {
        suggestions.push("Provide more details about the task".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("Good prompt! No major improvements needed.".to_string());
    }

    PromptScoreResult {
        structure_score: structure,
        context_score: context,
        combined_score: structure + context,
        suggestions,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternCounts {
    pub file_references: u32,
    pub technology_mentions: u32,
    pub clear_goals: u32,
    pub code_blocks: u32,
    pub questions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternExample {
    pub prompt: String,
    pub score: f64,
    pub category: PromptCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPatternsResult {
    pub patterns: PatternCounts,
    pub top_examples: Vec<PatternExample>,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

const PATTERN_TECH: &[&str] = &["react", "typescript", "python", "javascript"];
const PATTERN_GOALS: &[&str] = &["해줘", "fix", "add", "implement", "create"];

/// Count common traits among the first `limit` strict-mode best prompts.
pub fn get_prompt_patterns<S: Store>(
    analytics: &PromptAnalytics<S>,
    project: Option<&str>,
    limit: usize,
) -> Result<PromptPatternsResult, AnalyticsError> {
    let best = analytics.get_best_prompts(project, PATTERN_POOL, true, None)?;

    let mut patterns = PatternCounts::default();
    let mut top_examples = Vec::new();

    for p in best.iter().take(limit) {
        let text = p.first_prompt();
        let lower = text.to_lowercase();

        if text.contains('/') || text.contains('.') {
            patterns.file_references += 1;
        }
        if PATTERN_TECH.iter().any(|t| lower.contains(t)) {
            patterns.technology_mentions += 1;
        }
        if PATTERN_GOALS.iter().any(|g| text.contains(g)) {
            patterns.clear_goals += 1;
        }
        if text.contains("```") {
            patterns.code_blocks += 1;
        }
        if text.contains('?') {
            patterns.questions += 1;
        }

        top_examples.push(PatternExample {
            prompt: truncate_prompt(text, 100),
            score: p.composite_score,
            category: p.category,
        });
    }

    let message = best.is_empty().then(|| {
        format!("No session data found to analyze patterns. To collect data:\n{COLLECT_STEPS}")
    });

    Ok(PromptPatternsResult {
        patterns,
        top_examples,
        recommendation:
            "Include file paths, technology names, and clear action verbs for best results."
                .to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_store::{session, MemoryStore};
    use pretty_assertions::assert_eq;

    const GOOD_PROMPT: &str =
        "현재 React 프로젝트의 src/components/LoginForm.tsx 컴포넌트에 유효성 검사를 추가해줘. \
         기존 SignupForm처럼 `zod`를 사용하고, 외부 라이브러리 없이 구현해줘.";

    #[test]
    fn test_empty_store_adds_guidance() {
        let analytics = PromptAnalytics::new(MemoryStore::default());

        let best = get_best_prompts(&analytics, None, 10, false, None).unwrap();
        assert_eq!(best.count, 0);
        assert!(best.message.as_deref().unwrap().contains("cx import"));

        let worst = get_worst_prompts(&analytics, None, 10).unwrap();
        assert!(worst.message.is_some());

        let sessions = analyze_sessions(&analytics, Some("front")).unwrap();
        assert!(sessions.message.unwrap().contains("project 'front'"));

        let patterns = get_prompt_patterns(&analytics, None, 5).unwrap();
        assert!(patterns.message.is_some());
        assert_eq!(patterns.patterns, PatternCounts::default());
    }

    #[test]
    fn test_data_present_no_guidance() {
        let analytics =
            PromptAnalytics::new(MemoryStore::with(vec![session("s1", "front", GOOD_PROMPT, 3, 90, 6)]));
        let best = get_best_prompts(&analytics, None, 10, false, None).unwrap();
        assert_eq!(best.count, 1);
        assert!(best.message.is_none());
        let json = serde_json::to_value(&best).unwrap();
        assert!(json.get("message").is_none());

        let sessions = analyze_sessions(&analytics, None).unwrap();
        assert!(sessions.message.is_none());
    }

    #[test]
    fn test_score_prompt_weak() {
        let result = score_prompt("fix it");
        assert_eq!(result.combined_score, result.structure_score + result.context_score);
        assert_eq!(
            result.suggestions,
            vec![
                "Add a clear goal or action verb (e.g., '추가해줘', 'fix', 'implement')",
                "Be more specific about what you want to achieve",
                "Add file paths or component names",
                "Mention the technology stack (React, TypeScript, etc.)",
                "Provide more details about the task",
            ]
        );
    }

    #[test]
    fn test_score_prompt_good() {
        let result = score_prompt(GOOD_PROMPT);
        assert_eq!(result.suggestions, vec!["Good prompt! No major improvements needed."]);
        assert!(result.combined_score >= 14.0);
    }

    #[test]
    fn test_prompt_patterns_counts() {
        let analytics = PromptAnalytics::new(MemoryStore::with(vec![
            session("s1", "front", GOOD_PROMPT, 3, 90, 6),
            session("s2", "front", "fix it", 1, 10, 40),
        ]));
        let result = get_prompt_patterns(&analytics, None, 5).unwrap();
        // only the strict-mode prompt is counted
        assert_eq!(
            result.patterns,
            PatternCounts {
                file_references: 1,
                technology_mentions: 1,
                clear_goals: 1,
                code_blocks: 0,
                questions: 0,
            }
        );
        assert_eq!(result.top_examples.len(), 1);
        assert!(result.top_examples[0].prompt.ends_with("..."));
        assert!(result.message.is_none());
    }
}
