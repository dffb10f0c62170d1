// crates/core/src/analytics/ranking.rs
//! Batch ranking of sessions by prompt quality.

use serde::Serialize;

use crate::category::PromptCategory;
use crate::scoring::{
    calculate_legacy_composite, composite_v2_with, LegacyScores, RankingScheme, V2_WEIGHTS,
};
use crate::types::{ScoreSet, SessionSummary};

/// One ranked session: its summary, legacy components, v2 breakdown and the
/// composite used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrompt {
    #[serde(flatten)]
    pub session: SessionSummary,
    pub category: PromptCategory,
    #[serde(flatten)]
    pub legacy: LegacyScores,
    /// Composite of the ranking scheme in effect. Legacy composites are not
    /// clamped to [0, 10]; v2 composites are.
    pub composite_score: f64,
    pub v2: ScoreSet,
}

impl RankedPrompt {
    pub fn first_prompt(&self) -> &str {
        &self.session.first_prompt
    }
}

/// Rank sessions that produced code, best first.
///
/// The legacy composite normalizes productivity by the largest `total_lines`
/// in `sessions`, so every score depends on the batch. Ties keep input order.
pub fn rank_sessions(
    sessions: Vec<SessionSummary>,
    scheme: RankingScheme,
    max_lines: i64,
) -> Vec<RankedPrompt> {
    let with_code: Vec<SessionSummary> = sessions
        .into_iter()
        .filter(|s| s.metrics.code_count > 0)
        .collect();

    let batch_max_lines = with_code
        .iter()
        .map(|s| s.metrics.total_lines)
        .max()
        .unwrap_or(0);

    let mut ranked: Vec<RankedPrompt> = with_code
        .into_iter()
        .map(|session| {
            let legacy = LegacyScores::from_metrics(&session.metrics);
            let v2 = composite_v2_with(&session.first_prompt, &session.metrics, max_lines, &V2_WEIGHTS);
            let composite_score = match scheme {
                RankingScheme::Legacy => calculate_legacy_composite(&legacy, batch_max_lines),
                RankingScheme::V2 => v2.composite_score,
            };
            RankedPrompt {
                category: PromptCategory::classify(&session.first_prompt),
                session,
                legacy,
                composite_score,
                v2,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    ranked
}

/// Why a low-ranked prompt underperformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorstIssue {
    /// Fewer than one code block per prompt.
    LowEfficiency,
    /// More than 100 messages.
    LongConversation,
    SensitiveData { count: u32 },
    /// Output in fewer than two languages.
    SingleLanguage,
    General,
}

impl WorstIssue {
    pub fn describe(&self) -> String {
        match self {
            Self::LowEfficiency => "Low efficiency: little code generated per prompt".to_string(),
            Self::LongConversation => {
                "Long conversation: unclear instructions needed many turns".to_string()
            }
            Self::SensitiveData { count } => {
                format!("Security issue: {count} snippet(s) with sensitive data")
            }
            Self::SingleLanguage => "Limited output: only one language produced".to_string(),
            Self::General => "Low results across the board".to_string(),
        }
    }
}

pub fn worst_prompt_issues(prompt: &RankedPrompt) -> Vec<WorstIssue> {
    let metrics = &prompt.session.metrics;
    let mut issues = Vec::new();

    if prompt.legacy.efficiency_score < 1.0 {
        issues.push(WorstIssue::LowEfficiency);
    }
    if metrics.message_count > 100 {
        issues.push(WorstIssue::LongConversation);
    }
    if metrics.sensitive_count > 0 {
        issues.push(WorstIssue::SensitiveData {
            count: metrics.sensitive_count,
        });
    }
    if metrics.language_diversity < 2 {
        issues.push(WorstIssue::SingleLanguage);
    }

    if issues.is_empty() {
        issues.push(WorstIssue::General);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionMetrics;
    use pretty_assertions::assert_eq;

    fn session(id: &str, prompt: &str, code: u32, lines: u32, messages: u32) -> SessionSummary {
        SessionSummary {
            session_id: id.into(),
            project: "front".into(),
            first_prompt: prompt.into(),
            metrics: SessionMetrics {
                message_count: messages,
                user_prompt_count: 2,
                code_count: code,
                total_lines: lines,
                language_diversity: 2,
                sensitive_count: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_sessions_without_code_are_not_ranked() {
        let ranked = rank_sessions(
            vec![session("a", "fix", 0, 0, 4), session("b", "add", 2, 40, 4)],
            RankingScheme::Legacy,
            1000,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].session.session_id, "b");
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank_sessions(
            vec![
                session("long", "fix", 1, 10, 100),
                session("short", "fix", 4, 200, 4),
                session("mid", "fix", 2, 50, 20),
            ],
            RankingScheme::Legacy,
            1000,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.session.session_id.as_str()).collect();
        assert_eq!(ids, vec!["short", "mid", "long"]);
        assert!(ranked.windows(2).all(|w| w[0].composite_score >= w[1].composite_score));
    }

    #[test]
    fn test_legacy_ranking_is_batch_relative() {
        let target = session("t", "fix", 2, 100, 10);
        let alone = rank_sessions(vec![target.clone()], RankingScheme::Legacy, 1000);
        let with_bigger = rank_sessions(
            vec![target, session("big", "fix", 2, 1000, 10)],
            RankingScheme::Legacy,
            1000,
        );
        let score_alone = alone[0].composite_score;
        let score_in_batch = with_bigger
            .iter()
            .find(|r| r.session.session_id == "t")
            .unwrap()
            .composite_score;
        assert!(score_alone > score_in_batch);
        // v2 breakdown does not depend on the batch
        assert_eq!(alone[0].v2, with_bigger.iter().find(|r| r.session.session_id == "t").unwrap().v2);
    }

    #[test]
    fn test_v2_scheme_uses_v2_composite() {
        let ranked = rank_sessions(
            vec![session("a", "LoginForm.tsx 컴포넌트에 검사 추가해줘", 3, 300, 8)],
            RankingScheme::V2,
            1000,
        );
        assert_eq!(ranked[0].composite_score, ranked[0].v2.composite_score);
        assert_eq!(ranked[0].category, PromptCategory::Other);
    }

    #[test]
    fn test_worst_issues() {
        let mut s = session("w", "fix", 1, 10, 150);
        s.metrics.language_diversity = 1;
        s.metrics.sensitive_count = 2;
        let ranked = rank_sessions(vec![s], RankingScheme::Legacy, 1000);
        assert_eq!(
            worst_prompt_issues(&ranked[0]),
            vec![
                WorstIssue::LowEfficiency,
                WorstIssue::LongConversation,
                WorstIssue::SensitiveData { count: 2 },
                WorstIssue::SingleLanguage,
            ]
        );

        let good = rank_sessions(vec![session("g", "fix", 4, 10, 5)], RankingScheme::Legacy, 1000);
        assert_eq!(worst_prompt_issues(&good[0]), vec![WorstIssue::General]);
    }

    #[test]
    fn test_ranked_prompt_serializes_flat() {
        let ranked = rank_sessions(vec![session("a", "fix", 2, 20, 4)], RankingScheme::Legacy, 1000);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["session_id"], "a");
        assert_eq!(json["code_count"], 2);
        assert_eq!(json["quality_score"], 8);
        assert!(json["v2"]["composite_score"].is_number());
    }
}
