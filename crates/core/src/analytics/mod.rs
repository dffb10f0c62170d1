// crates/core/src/analytics/mod.rs
//! Aggregate reporting over imported sessions.
//!
//! All analysis is read-only: sessions come from a [`Store`], are ranked in
//! memory, and are returned as plain records.

mod ranking;
mod store;

pub use ranking::{rank_sessions, worst_prompt_issues, RankedPrompt, WorstIssue};
pub use store::{
    BranchStat, CategoryStat, DailyActivity, HourActivity, LanguageStat, ProductiveDay,
    SensitiveReport, SensitiveSession, SensitiveStats, SessionFilter, Store, TimeAnalysis,
    TopSession,
};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use crate::coach::PromptHistory;
use crate::config::CoachConfig;
use crate::error::AnalyticsError;

/// Every report section for one project (or all projects).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    pub project: String,
    pub generated_at: DateTime<Local>,
    pub category_stats: Vec<CategoryStat>,
    pub branch_productivity: Vec<BranchStat>,
    pub language_distribution: Vec<LanguageStat>,
    pub time_analysis: TimeAnalysis,
    pub top_sessions: Vec<TopSession>,
    pub sensitive_data: SensitiveReport,
}

pub struct PromptAnalytics<S> {
    store: S,
    config: CoachConfig,
}

impl<S: Store> PromptAnalytics<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CoachConfig::default())
    }

    pub fn with_config(store: S, config: CoachConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Rank every session with code in scope, best first.
    pub fn analyze_prompt_quality(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<RankedPrompt>, AnalyticsError> {
        let sessions = self.store.session_summaries(filter)?;
        let total = sessions.len();
        let ranked = rank_sessions(sessions, self.config.ranking_scheme, self.config.max_lines);
        debug!(
            project = filter.label(),
            sessions = total,
            ranked = ranked.len(),
            "Ranked prompts"
        );
        Ok(ranked)
    }

    /// Best prompts after optional quality filters.
    ///
    /// `strict_mode` keeps prompts meeting both configured structure and
    /// context minimums; `min_quality` keeps prompts whose structure + context
    /// reaches the value. Filters apply before `limit`.
    pub fn get_best_prompts(
        &self,
        project: Option<&str>,
        limit: usize,
        strict_mode: bool,
        min_quality: Option<f64>,
    ) -> Result<Vec<RankedPrompt>, AnalyticsError> {
        let ranked = self.analyze_prompt_quality(&SessionFilter::from_option(project))?;
        Ok(ranked
            .into_iter()
            .filter(|p| !strict_mode || self.meets_strict(p))
            .filter(|p| {
                min_quality
                    .map(|min| p.v2.structure_score + p.v2.context_score >= min)
                    .unwrap_or(true)
            })
            .take(limit)
            .collect())
    }

    /// Lowest-ranked prompts, worst first.
    pub fn get_worst_prompts(
        &self,
        project: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RankedPrompt>, AnalyticsError> {
        let ranked = self.analyze_prompt_quality(&SessionFilter::from_option(project))?;
        Ok(ranked.into_iter().rev().take(limit).collect())
    }

    pub fn generate_full_report(&self, project: Option<&str>) -> Result<FullReport, AnalyticsError> {
        let filter = SessionFilter::from_option(project);
        Ok(FullReport {
            project: filter.label().to_string(),
            generated_at: Local::now(),
            category_stats: self.store.category_stats(&filter)?,
            branch_productivity: self.store.branch_productivity(&filter)?,
            language_distribution: self.store.language_distribution(&filter)?,
            time_analysis: self.store.time_analysis(&filter, self.config.report_days)?,
            top_sessions: self
                .store
                .top_sessions(&filter, self.config.top_sessions_limit)?,
            sensitive_data: self.store.sensitive_report(&filter)?,
        })
    }

    pub fn session_count(&self, project: Option<&str>) -> Result<u64, AnalyticsError> {
        Ok(self
            .store
            .session_count(&SessionFilter::from_option(project))?)
    }

    fn meets_strict(&self, prompt: &RankedPrompt) -> bool {
        prompt.v2.structure_score >= self.config.strict_min_structure
            && prompt.v2.context_score >= self.config.strict_min_context
    }
}

/// The coach's history: best prompts across all projects, strict mode.
impl<S: Store> PromptHistory for PromptAnalytics<S> {
    fn best_prompts(&self, limit: usize) -> Result<Vec<String>, AnalyticsError> {
        Ok(self
            .get_best_prompts(None, limit, true, None)?
            .into_iter()
            .map(|p| p.session.first_prompt)
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::test_store::{session, MemoryStore};
    use super::*;
    use crate::scoring::RankingScheme;

    const GOOD_PROMPT: &str =
        "현재 React 프로젝트의 src/components/LoginForm.tsx 컴포넌트에 유효성 검사를 추가해줘. \
         기존 SignupForm처럼 `zod`를 사용하고, 외부 라이브러리 없이 구현해줘.";

    fn store() -> MemoryStore {
        MemoryStore::with(vec![
            session("s1", "front", GOOD_PROMPT, 5, 300, 6),
            session("s2", "front", "fix it", 1, 10, 60),
            session("s3", "front", "ok", 0, 0, 2),
            session("s4", "back", "add an endpoint", 3, 90, 10),
        ])
    }

    #[test]
    fn test_best_prompts_scoped_and_ranked() {
        let analytics = PromptAnalytics::new(store());
        let best = analytics.get_best_prompts(Some("front"), 10, false, None).unwrap();
        let ids: Vec<_> = best.iter().map(|p| p.session.session_id.as_str()).collect();
        // s3 has no code and is not ranked; s4 is another project
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_strict_mode_filters_weak_prompts() {
        let analytics = PromptAnalytics::new(store());
        let best = analytics.get_best_prompts(None, 10, true, None).unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].session.session_id, "s1");
    }

    #[test]
    fn test_min_quality_filter() {
        let analytics = PromptAnalytics::new(store());
        let best = analytics.get_best_prompts(None, 10, false, Some(12.0)).unwrap();
        assert!(best.iter().all(|p| p.v2.structure_score + p.v2.context_score >= 12.0));
        assert!(best.iter().any(|p| p.session.session_id == "s1"));
    }

    #[test]
    fn test_worst_prompts_reversed() {
        let analytics = PromptAnalytics::new(store());
        let best = analytics.get_best_prompts(None, 10, false, None).unwrap();
        let worst = analytics.get_worst_prompts(None, 10).unwrap();
        assert_eq!(worst.len(), best.len());
        assert_eq!(worst.first().unwrap().session.session_id, best.last().unwrap().session.session_id);

        let only_one = analytics.get_worst_prompts(None, 1).unwrap();
        assert_eq!(only_one[0].session.session_id, "s2");
    }

    #[test]
    fn test_v2_ranking_scheme_from_config() {
        let config = CoachConfig {
            ranking_scheme: RankingScheme::V2,
            ..Default::default()
        };
        let analytics = PromptAnalytics::with_config(store(), config);
        let best = analytics.get_best_prompts(None, 10, false, None).unwrap();
        assert!(best.iter().all(|p| p.composite_score == p.v2.composite_score));
    }

    #[test]
    fn test_store_failure_propagates() {
        let analytics = PromptAnalytics::new(MemoryStore {
            fail: true,
            ..Default::default()
        });
        let err = analytics.get_best_prompts(None, 5, false, None).unwrap_err();
        assert!(matches!(err, AnalyticsError::Store(_)));
    }

    #[test]
    fn test_full_report_sections() {
        let analytics = PromptAnalytics::new(store());
        let report = analytics.generate_full_report(Some("front")).unwrap();
        assert_eq!(report.project, "front");
        assert_eq!(report.top_sessions.len(), 3);
        assert_eq!(report.category_stats[0].session_count, 3);

        let all = analytics.generate_full_report(None).unwrap();
        assert_eq!(all.project, "all");
    }

    #[test]
    fn test_prompt_history_uses_strict_best() {
        let analytics = PromptAnalytics::new(store());
        let history = analytics.best_prompts(5).unwrap();
        assert_eq!(history, vec![GOOD_PROMPT.to_string()]);
    }
}
