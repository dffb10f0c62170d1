// crates/db/src/queries.rs
//! Aggregate report queries: the `Store` implementation for [`SqliteStore`].
//!
//! Every query takes the project name as `?1`; `NULL` selects all projects.

use std::collections::BTreeMap;

use claude_x_core::analytics::{
    BranchStat, CategoryStat, DailyActivity, HourActivity, LanguageStat, ProductiveDay,
    SensitiveReport, SensitiveSession, SensitiveStats, TimeAnalysis, TopSession,
};
use claude_x_core::{
    BranchType, PromptCategory, SessionFilter, SessionMetrics, SessionSummary, Store, StoreError,
};
use rusqlite::params;

use crate::{DbResult, SqliteStore};

const LANGUAGE_LIMIT: usize = 15;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

/// A session summary plus the message count recorded at import time.
struct SessionRow {
    summary: SessionSummary,
    stored_message_count: u32,
}

impl SqliteStore {
    fn session_rows(&self, filter: &SessionFilter) -> DbResult<Vec<SessionRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT
                s.session_id,
                p.name,
                s.first_prompt,
                s.git_branch,
                s.created_at,
                s.message_count,
                COUNT(DISTINCT m.id),
                COUNT(DISTINCT CASE WHEN m.type = 'user' THEN m.id END),
                COUNT(DISTINCT cs.id),
                COALESCE(SUM(cs.line_count), 0),
                COUNT(DISTINCT cs.language),
                COUNT(DISTINCT CASE WHEN cs.has_sensitive = 1 THEN cs.id END)
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             LEFT JOIN messages m ON s.session_id = m.session_id
             LEFT JOIN code_snippets cs ON m.id = cs.message_id
             WHERE (?1 IS NULL OR p.name = ?1)
             GROUP BY s.session_id
             ORDER BY s.created_at, s.session_id",
        )?;
        let rows = stmt.query_map(params![filter.project], |row| {
            Ok(SessionRow {
                summary: SessionSummary {
                    session_id: row.get(0)?,
                    project: row.get(1)?,
                    first_prompt: row.get(2)?,
                    git_branch: row.get(3)?,
                    created_at: row.get(4)?,
                    metrics: SessionMetrics {
                        message_count: row.get(6)?,
                        user_prompt_count: row.get(7)?,
                        code_count: row.get(8)?,
                        total_lines: row.get(9)?,
                        language_diversity: row.get(10)?,
                        sensitive_count: row.get(11)?,
                    },
                },
                stored_message_count: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn query_category_stats(&self, filter: &SessionFilter) -> DbResult<Vec<CategoryStat>> {
        #[derive(Default)]
        struct Acc {
            sessions: u32,
            messages: u32,
            user_prompts: u32,
            code: u32,
            stored_messages: u32,
        }

        let mut groups: BTreeMap<PromptCategory, Acc> = BTreeMap::new();
        for row in self.session_rows(filter)? {
            let m = &row.summary.metrics;
            let acc = groups
                .entry(PromptCategory::classify(&row.summary.first_prompt))
                .or_default();
            acc.sessions += 1;
            acc.messages += m.message_count;
            acc.user_prompts += m.user_prompt_count;
            acc.code += m.code_count;
            acc.stored_messages += row.stored_message_count;
        }

        let mut stats: Vec<CategoryStat> = groups
            .into_iter()
            .map(|(category, acc)| CategoryStat {
                category,
                session_count: acc.sessions,
                total_messages: acc.messages,
                user_prompts: acc.user_prompts,
                code_count: acc.code,
                avg_messages_per_session: round_to(ratio(acc.stored_messages, acc.sessions), 1),
                avg_code_per_session: round_to(ratio(acc.code, acc.sessions), 1),
            })
            .collect();
        stats.sort_by(|a, b| b.session_count.cmp(&a.session_count));
        Ok(stats)
    }

    fn query_branch_productivity(&self, filter: &SessionFilter) -> DbResult<Vec<BranchStat>> {
        #[derive(Default)]
        struct Acc {
            sessions: u32,
            messages: u32,
            code: u32,
            stored_messages: u32,
        }

        let mut groups: BTreeMap<BranchType, Acc> = BTreeMap::new();
        for row in self.session_rows(filter)? {
            let m = &row.summary.metrics;
            let acc = groups
                .entry(BranchType::classify(row.summary.git_branch.as_deref()))
                .or_default();
            acc.sessions += 1;
            acc.messages += m.message_count;
            acc.code += m.code_count;
            acc.stored_messages += row.stored_message_count;
        }

        let mut stats: Vec<BranchStat> = groups
            .into_iter()
            .map(|(branch_type, acc)| BranchStat {
                branch_type,
                session_count: acc.sessions,
                total_messages: acc.messages,
                code_count: acc.code,
                code_per_message_ratio: round_to(ratio(acc.code, acc.messages), 2),
                avg_messages_per_session: round_to(ratio(acc.stored_messages, acc.sessions), 1),
            })
            .collect();
        stats.sort_by(|a, b| b.session_count.cmp(&a.session_count));
        Ok(stats)
    }

    fn query_language_distribution(&self, filter: &SessionFilter) -> DbResult<Vec<LanguageStat>> {
        let mut stmt = self.conn().prepare(
            "SELECT cs.language, COUNT(*), COALESCE(SUM(cs.line_count), 0)
             FROM code_snippets cs
             JOIN sessions s ON cs.session_id = s.session_id
             JOIN projects p ON s.project_id = p.id
             WHERE (?1 IS NULL OR p.name = ?1)
             GROUP BY cs.language
             ORDER BY COUNT(*) DESC, cs.language",
        )?;
        let rows = stmt
            .query_map(params![filter.project], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let total: u32 = rows.iter().map(|(_, count, _)| count).sum();
        Ok(rows
            .into_iter()
            .take(LANGUAGE_LIMIT)
            .map(|(language, count, total_lines)| LanguageStat {
                language,
                count,
                percentage: round_to(ratio(count, total) * 100.0, 2),
                total_lines,
            })
            .collect())
    }

    fn query_time_analysis(&self, filter: &SessionFilter, days: u32) -> DbResult<TimeAnalysis> {
        let window = format!("-{days} days");

        let mut stmt = self.conn().prepare(
            "SELECT
                DATE(s.created_at) AS day,
                COUNT(DISTINCT s.session_id),
                COUNT(DISTINCT m.id),
                COUNT(DISTINCT cs.id)
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             LEFT JOIN messages m ON s.session_id = m.session_id
             LEFT JOIN code_snippets cs ON m.id = cs.message_id
             WHERE (?1 IS NULL OR p.name = ?1)
               AND datetime(s.created_at) >= datetime('now', ?2)
             GROUP BY day
             ORDER BY day DESC",
        )?;
        let daily_activity = stmt
            .query_map(params![filter.project, window], |row| {
                Ok(DailyActivity {
                    date: row.get(0)?,
                    sessions: row.get(1)?,
                    messages: row.get(2)?,
                    code_snippets: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn().prepare(
            "SELECT
                CAST(strftime('%H', s.created_at) AS INTEGER) AS hour,
                COUNT(DISTINCT s.session_id) AS sessions
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             WHERE (?1 IS NULL OR p.name = ?1)
               AND strftime('%H', s.created_at) IS NOT NULL
             GROUP BY hour
             ORDER BY sessions DESC, hour",
        )?;
        let hour_distribution = stmt
            .query_map(params![filter.project], |row| {
                Ok(HourActivity {
                    hour: row.get(0)?,
                    sessions: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn().prepare(
            "SELECT DATE(s.created_at) AS day, COUNT(DISTINCT cs.id) AS code_count
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             LEFT JOIN messages m ON s.session_id = m.session_id
             LEFT JOIN code_snippets cs ON m.id = cs.message_id
             WHERE (?1 IS NULL OR p.name = ?1)
               AND DATE(s.created_at) IS NOT NULL
             GROUP BY day
             ORDER BY code_count DESC, day DESC
             LIMIT 1",
        )?;
        let most_productive_day = stmt
            .query_map(params![filter.project], |row| {
                Ok(ProductiveDay {
                    date: row.get(0)?,
                    code_count: row.get(1)?,
                })
            })?
            .next()
            .transpose()?;

        Ok(TimeAnalysis {
            daily_activity,
            hour_distribution,
            most_productive_day,
        })
    }

    fn query_top_sessions(&self, filter: &SessionFilter, limit: usize) -> DbResult<Vec<TopSession>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn().prepare(
            "SELECT
                s.session_id,
                s.first_prompt,
                s.git_branch,
                s.created_at,
                COUNT(DISTINCT m.id) AS message_count,
                COUNT(DISTINCT cs.id),
                GROUP_CONCAT(DISTINCT cs.language)
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             LEFT JOIN messages m ON s.session_id = m.session_id
             LEFT JOIN code_snippets cs ON m.id = cs.message_id
             WHERE (?1 IS NULL OR p.name = ?1)
             GROUP BY s.session_id
             ORDER BY message_count DESC, s.session_id
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![filter.project, limit], |row| {
            let languages: Option<String> = row.get(6)?;
            let mut languages: Vec<String> = languages
                .map(|l| l.split(',').map(str::to_string).collect())
                .unwrap_or_default();
            languages.sort();
            Ok(TopSession {
                session_id: row.get(0)?,
                first_prompt: row.get(1)?,
                git_branch: row.get(2)?,
                created_at: row.get(3)?,
                message_count: row.get(4)?,
                code_count: row.get(5)?,
                languages,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn query_sensitive_report(&self, filter: &SessionFilter) -> DbResult<SensitiveReport> {
        let (total_snippets, sensitive_count): (u32, u32) = self.conn().query_row(
            "SELECT COUNT(*), COUNT(CASE WHEN cs.has_sensitive = 1 THEN 1 END)
             FROM code_snippets cs
             JOIN sessions s ON cs.session_id = s.session_id
             JOIN projects p ON s.project_id = p.id
             WHERE (?1 IS NULL OR p.name = ?1)",
            params![filter.project],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = self.conn().prepare(
            "SELECT s.session_id, s.first_prompt, s.git_branch, COUNT(DISTINCT cs.id) AS n
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             JOIN messages m ON s.session_id = m.session_id
             JOIN code_snippets cs ON m.id = cs.message_id
             WHERE (?1 IS NULL OR p.name = ?1) AND cs.has_sensitive = 1
             GROUP BY s.session_id
             ORDER BY n DESC, s.session_id",
        )?;
        let affected_sessions = stmt
            .query_map(params![filter.project], |row| {
                Ok(SensitiveSession {
                    session_id: row.get(0)?,
                    first_prompt: row.get(1)?,
                    git_branch: row.get(2)?,
                    sensitive_snippet_count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SensitiveReport {
            statistics: SensitiveStats {
                total_snippets,
                sensitive_count,
                sensitive_percentage: round_to(ratio(sensitive_count, total_snippets) * 100.0, 2),
            },
            affected_sessions,
        })
    }

    fn query_session_count(&self, filter: &SessionFilter) -> DbResult<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*)
             FROM sessions s
             JOIN projects p ON s.project_id = p.id
             WHERE (?1 IS NULL OR p.name = ?1)",
            params![filter.project],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

impl Store for SqliteStore {
    fn session_summaries(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, StoreError> {
        Ok(self
            .session_rows(filter)?
            .into_iter()
            .map(|row| row.summary)
            .collect())
    }

    fn category_stats(&self, filter: &SessionFilter) -> Result<Vec<CategoryStat>, StoreError> {
        Ok(self.query_category_stats(filter)?)
    }

    fn branch_productivity(&self, filter: &SessionFilter) -> Result<Vec<BranchStat>, StoreError> {
        Ok(self.query_branch_productivity(filter)?)
    }

    fn language_distribution(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<LanguageStat>, StoreError> {
        Ok(self.query_language_distribution(filter)?)
    }

    fn time_analysis(&self, filter: &SessionFilter, days: u32) -> Result<TimeAnalysis, StoreError> {
        Ok(self.query_time_analysis(filter, days)?)
    }

    fn top_sessions(
        &self,
        filter: &SessionFilter,
        limit: usize,
    ) -> Result<Vec<TopSession>, StoreError> {
        Ok(self.query_top_sessions(filter, limit)?)
    }

    fn sensitive_report(&self, filter: &SessionFilter) -> Result<SensitiveReport, StoreError> {
        Ok(self.query_sensitive_report(filter)?)
    }

    fn session_count(&self, filter: &SessionFilter) -> Result<u64, StoreError> {
        Ok(self.query_session_count(filter)?)
    }
}
