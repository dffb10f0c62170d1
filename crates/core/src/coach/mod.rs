// crates/core/src/coach/mod.rs
//! Prompt coaching pipeline.
//!
//! `PromptCoach::analyze` is synchronous and keeps no state between calls:
//! detect the language, score the prompt, identify problems, look up the
//! user's best prompts, generate suggestions, match an installed extension,
//! estimate impact and derive user insights. Optional collaborators (history
//! and extensions) degrade to empty results instead of failing the analysis.

pub mod impact;
pub mod insights;
pub mod problems;
pub mod suggestions;

use tracing::{debug, warn};

use crate::error::AnalyticsError;
use crate::extensions::{suggest_extension_command, ExtensionDetector, NoExtensions};
use crate::i18n::{Catalog, Translator};
use crate::types::{CoachingResult, PromptScores};

pub use impact::{calculate_expected_impact, percent_change};
pub use insights::generate_user_insights;
pub use problems::identify_problems;
pub use suggestions::generate_suggestions;

pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Source of the user's historical best prompts (already quality-filtered).
pub trait PromptHistory {
    fn best_prompts(&self, limit: usize) -> Result<Vec<String>, AnalyticsError>;
}

/// History source with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl PromptHistory for NoHistory {
    fn best_prompts(&self, _limit: usize) -> Result<Vec<String>, AnalyticsError> {
        Ok(Vec::new())
    }
}

pub struct PromptCoach<'a> {
    history: &'a dyn PromptHistory,
    translator: &'a dyn Translator,
    extensions: &'a dyn ExtensionDetector,
    history_limit: usize,
}

impl<'a> PromptCoach<'a> {
    /// Coach with the built-in catalog and no extension detection.
    pub fn new(history: &'a dyn PromptHistory) -> Self {
        Self {
            history,
            translator: &Catalog,
            extensions: &NoExtensions,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_extensions(mut self, extensions: &'a dyn ExtensionDetector) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn analyze(
        &self,
        prompt: &str,
        detect_extensions: bool,
        include_history: bool,
    ) -> CoachingResult {
        let lang = self.translator.detect_language(prompt);
        let scores = PromptScores::of(prompt);
        let problems = identify_problems(prompt, &scores, lang, self.translator);

        let user_best = if include_history {
            self.user_best_prompts()
        } else {
            Vec::new()
        };

        let suggestions = generate_suggestions(prompt, &problems, &user_best, lang, self.translator);

        let extension_suggestion = if detect_extensions {
            let installed = self.extensions.detect_installed();
            suggest_extension_command(prompt, &installed)
        } else {
            None
        };

        let expected_impact = calculate_expected_impact(&scores);
        let user_insights = generate_user_insights(&user_best, lang, self.translator);

        debug!(
            language = %lang,
            structure = scores.structure,
            context = scores.context,
            problems = problems.len(),
            suggestions = suggestions.len(),
            "Prompt analyzed"
        );

        CoachingResult {
            language: lang,
            original_prompt: prompt.to_string(),
            scores,
            problems,
            suggestions,
            extension_suggestion,
            expected_impact,
            user_insights,
        }
    }

    fn user_best_prompts(&self) -> Vec<String> {
        match self.history.best_prompts(self.history_limit) {
            Ok(mut prompts) => {
                prompts.truncate(self.history_limit);
                prompts
            }
            Err(e) => {
                warn!(error = %e, "History lookup failed; coaching without history");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::i18n::Language;
    use crate::types::{ProblemKind, SuggestionKind};
    use std::collections::BTreeSet;

    struct FixedHistory(Vec<String>);

    impl PromptHistory for FixedHistory {
        fn best_prompts(&self, _limit: usize) -> Result<Vec<String>, AnalyticsError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenHistory;

    impl PromptHistory for BrokenHistory {
        fn best_prompts(&self, _limit: usize) -> Result<Vec<String>, AnalyticsError> {
            Err(StoreError::backend("database is locked").into())
        }
    }

    struct FixedExtensions(&'static [&'static str]);

    impl ExtensionDetector for FixedExtensions {
        fn detect_installed(&self) -> BTreeSet<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn test_analyze_vague_korean_prompt() {
        let coach = PromptCoach::new(&NoHistory);
        let result = coach.analyze("버그를 수정해줘", true, true);

        assert_eq!(result.language, Language::Ko);
        assert!(!result.problems.is_empty());
        assert!(result.problems.iter().any(|p| p.issue == ProblemKind::NoContext));
        assert!(!result.suggestions.is_empty());
        assert!(result.suggestions.len() <= 3);
        assert!(result.extension_suggestion.is_none());
        assert!(result.user_insights.is_empty());
    }

    #[test]
    fn test_history_failure_degrades_to_empty() {
        let coach = PromptCoach::new(&BrokenHistory);
        let result = coach.analyze("fix the login bug", false, true);
        assert!(result.user_insights.is_empty());
        assert!(result
            .suggestions
            .iter()
            .all(|s| s.kind == SuggestionKind::Generic));
    }

    #[test]
    fn test_history_feeds_patterns_and_insights() {
        let history = FixedHistory(vec![
            "src/app.py 에서 로그인 버그 수정해줘".to_string(),
            "components/Nav.tsx 메뉴 추가해줘".to_string(),
        ]);
        let coach = PromptCoach::new(&history);
        let result = coach.analyze("버그 고쳐줘", false, true);
        assert_eq!(result.suggestions[0].kind, SuggestionKind::UserPattern);
        assert_eq!(result.user_insights.len(), 2);

        let without = coach.analyze("버그 고쳐줘", false, false);
        assert!(without.user_insights.is_empty());
        assert!(without
            .suggestions
            .iter()
            .all(|s| s.kind != SuggestionKind::UserPattern));
    }

    #[test]
    fn test_history_limit_applied() {
        let history = FixedHistory(vec!["hello".to_string(); 10]);
        let coach = PromptCoach::new(&history).with_history_limit(3);
        assert_eq!(coach.user_best_prompts().len(), 3);
    }

    #[test]
    fn test_extension_suggestion_when_enabled() {
        let extensions = FixedExtensions(&["review"]);
        let coach = PromptCoach::new(&NoHistory).with_extensions(&extensions);
        let result = coach.analyze("이 PR 리뷰해줘", true, false);
        let ext = result.extension_suggestion.expect("review command installed");
        assert_eq!(ext.command, "/review");

        let result = coach.analyze("이 PR 리뷰해줘", false, false);
        assert!(result.extension_suggestion.is_none());
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let coach = PromptCoach::new(&NoHistory);
        let a = coach.analyze("LoginForm.tsx 컴포넌트에 비밀번호 유효성 검사 추가해줘", false, false);
        let b = coach.analyze("LoginForm.tsx 컴포넌트에 비밀번호 유효성 검사 추가해줘", false, false);
        assert_eq!(a, b);
        assert!(a.scores.structure >= 4.0);
    }
}
