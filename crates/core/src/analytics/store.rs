// crates/core/src/analytics/store.rs
//! Read-only session store seam and the report row types it returns.

use serde::{Deserialize, Serialize};

use crate::category::{BranchType, PromptCategory};
use crate::error::StoreError;
use crate::types::SessionSummary;

/// Project scope of a query. `project: None` covers every project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub project: Option<String>,
}

impl SessionFilter {
    pub fn all() -> Self {
        Self { project: None }
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self {
            project: Some(name.into()),
        }
    }

    pub fn from_option(project: Option<&str>) -> Self {
        Self {
            project: project.map(str::to_string),
        }
    }

    /// Label used in report headers and file names.
    pub fn label(&self) -> &str {
        self.project.as_deref().unwrap_or("all")
    }
}

// ============================================================================
// Report rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: PromptCategory,
    pub session_count: u32,
    pub total_messages: u32,
    pub user_prompts: u32,
    pub code_count: u32,
    pub avg_messages_per_session: f64,
    pub avg_code_per_session: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStat {
    pub branch_type: BranchType,
    pub session_count: u32,
    pub total_messages: u32,
    pub code_count: u32,
    pub code_per_message_ratio: f64,
    pub avg_messages_per_session: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub language: String,
    pub count: u32,
    /// Share of all snippets in scope, 2 decimals.
    pub percentage: f64,
    pub total_lines: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// `YYYY-MM-DD`
    pub date: String,
    pub sessions: u32,
    pub messages: u32,
    pub code_snippets: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourActivity {
    pub hour: u32,
    pub sessions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductiveDay {
    pub date: String,
    pub code_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAnalysis {
    /// Newest first, limited to the requested window.
    pub daily_activity: Vec<DailyActivity>,
    /// Busiest hour first.
    pub hour_distribution: Vec<HourActivity>,
    pub most_productive_day: Option<ProductiveDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSession {
    pub session_id: String,
    pub first_prompt: String,
    pub git_branch: Option<String>,
    pub created_at: Option<String>,
    pub message_count: u32,
    pub code_count: u32,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitiveStats {
    pub total_snippets: u32,
    pub sensitive_count: u32,
    /// 0 when there are no snippets.
    pub sensitive_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveSession {
    pub session_id: String,
    pub first_prompt: String,
    pub git_branch: Option<String>,
    pub sensitive_snippet_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitiveReport {
    pub statistics: SensitiveStats,
    pub affected_sessions: Vec<SensitiveSession>,
}

// ============================================================================
// Store
// ============================================================================

/// Read-only aggregate queries over imported sessions.
///
/// One method per report section; every method honors the filter.
pub trait Store {
    /// Every session in scope with its per-session metrics.
    fn session_summaries(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, StoreError>;

    /// Busiest category first.
    fn category_stats(&self, filter: &SessionFilter) -> Result<Vec<CategoryStat>, StoreError>;

    /// Busiest branch type first.
    fn branch_productivity(&self, filter: &SessionFilter) -> Result<Vec<BranchStat>, StoreError>;

    /// Top 15 languages by snippet count.
    fn language_distribution(&self, filter: &SessionFilter)
        -> Result<Vec<LanguageStat>, StoreError>;

    fn time_analysis(&self, filter: &SessionFilter, days: u32) -> Result<TimeAnalysis, StoreError>;

    /// Sessions with the most messages first.
    fn top_sessions(&self, filter: &SessionFilter, limit: usize)
        -> Result<Vec<TopSession>, StoreError>;

    fn sensitive_report(&self, filter: &SessionFilter) -> Result<SensitiveReport, StoreError>;

    fn session_count(&self, filter: &SessionFilter) -> Result<u64, StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn session_summaries(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, StoreError> {
        (**self).session_summaries(filter)
    }
    fn category_stats(&self, filter: &SessionFilter) -> Result<Vec<CategoryStat>, StoreError> {
        (**self).category_stats(filter)
    }
    fn branch_productivity(&self, filter: &SessionFilter) -> Result<Vec<BranchStat>, StoreError> {
        (**self).branch_productivity(filter)
    }
    fn language_distribution(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<LanguageStat>, StoreError> {
        (**self).language_distribution(filter)
    }
    fn time_analysis(&self, filter: &SessionFilter, days: u32) -> Result<TimeAnalysis, StoreError> {
        (**self).time_analysis(filter, days)
    }
    fn top_sessions(
        &self,
        filter: &SessionFilter,
        limit: usize,
    ) -> Result<Vec<TopSession>, StoreError> {
        (**self).top_sessions(filter, limit)
    }
    fn sensitive_report(&self, filter: &SessionFilter) -> Result<SensitiveReport, StoreError> {
        (**self).sensitive_report(filter)
    }
    fn session_count(&self, filter: &SessionFilter) -> Result<u64, StoreError> {
        (**self).session_count(filter)
    }
}
