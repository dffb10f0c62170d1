// crates/core/src/library.rs
//! Markdown prompt library: best prompts to learn from, worst prompts to avoid.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::analytics::{worst_prompt_issues, PromptAnalytics, RankedPrompt, SessionFilter, Store};
use crate::category::PromptCategory;
use crate::error::AnalyticsError;

pub const LIBRARY_BEST_LIMIT: usize = 15;
pub const LIBRARY_WORST_LIMIT: usize = 10;
const PER_CATEGORY_LIMIT: usize = 3;

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_prompt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn short_id(session_id: &str) -> &str {
    match session_id.char_indices().nth(16) {
        Some((idx, _)) => &session_id[..idx],
        None => session_id,
    }
}

/// Render the library document. `total` is the number of ranked prompts.
pub fn render_prompt_library(
    project: &str,
    best: &[RankedPrompt],
    worst: &[RankedPrompt],
    total: usize,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(out, "# Prompt Library: {project}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Prompts analyzed: {total}");
    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out);
    out.push_str(SCORING_SECTION);

    let _ = writeln!(out, "## Best Prompts (Top {LIBRARY_BEST_LIMIT})");
    let _ = writeln!(out);
    let _ = writeln!(out, "Learn from the patterns that worked.");
    let _ = writeln!(out);

    for (i, p) in best.iter().enumerate() {
        let s = &p.session;
        let m = &s.metrics;
        let _ = writeln!(out, "### {}. {} (score: {})", i + 1, p.category, p.composite_score);
        let _ = writeln!(out);
        let _ = writeln!(out, "**Prompt:**");
        let _ = writeln!(out, "> {}", truncate_prompt(&s.first_prompt, 200));
        let _ = writeln!(out);
        let _ = writeln!(out, "**Session:**");
        let _ = writeln!(out, "- Session ID: `{}...`", short_id(&s.session_id));
        let _ = writeln!(out, "- Branch: `{}`", s.git_branch.as_deref().unwrap_or("N/A"));
        let date = s
            .created_at
            .as_deref()
            .map(|d| d.chars().take(10).collect::<String>())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(out, "- Date: {date}");
        let _ = writeln!(out);
        let _ = writeln!(out, "**Metrics:**");
        let _ = writeln!(out, "- Messages: {}", m.message_count);
        let _ = writeln!(out, "- User prompts: {}", m.user_prompt_count);
        let _ = writeln!(out, "- Code generated: {} ({} lines)", m.code_count, m.total_lines);
        let _ = writeln!(out, "- Languages: {}", m.language_diversity);
        let _ = writeln!(out);
        let _ = writeln!(out, "**Score breakdown:**");
        let _ = writeln!(out, "- Efficiency: {} (code/prompt)", p.legacy.efficiency_score);
        let _ = writeln!(out, "- Clarity: {}", p.legacy.clarity_score);
        let _ = writeln!(out, "- Productivity: {} lines", m.total_lines);
        let _ = writeln!(out, "- Quality: {}/10", p.legacy.quality_score);
        let _ = writeln!(
            out,
            "- v2: structure {}, context {}, composite {}",
            p.v2.structure_score, p.v2.context_score, p.v2.composite_score
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
    }

    let mut by_category: BTreeMap<PromptCategory, Vec<&RankedPrompt>> = BTreeMap::new();
    for p in best {
        by_category.entry(p.category).or_default().push(p);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Best Prompts by Category");
    let _ = writeln!(out);
    for (category, prompts) in &by_category {
        let _ = writeln!(out, "### {category}");
        let _ = writeln!(out);
        for p in prompts.iter().take(PER_CATEGORY_LIMIT) {
            let m = &p.session.metrics;
            let _ = writeln!(
                out,
                "- **Score {}**: {}",
                p.composite_score,
                truncate_prompt(&p.session.first_prompt, 100)
            );
            let _ = writeln!(
                out,
                "  - {} code blocks, {} lines, {} messages",
                m.code_count, m.total_lines, m.message_count
            );
            let _ = writeln!(out);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Prompts to Improve (Bottom {LIBRARY_WORST_LIMIT})");
    let _ = writeln!(out);
    let _ = writeln!(out, "Patterns worth avoiding.");
    let _ = writeln!(out);

    for (i, p) in worst.iter().enumerate() {
        let _ = writeln!(out, "### {}. {} (score: {})", i + 1, p.category, p.composite_score);
        let _ = writeln!(out);
        let _ = writeln!(out, "**Prompt:**");
        let _ = writeln!(out, "> {}", truncate_prompt(&p.session.first_prompt, 200));
        let _ = writeln!(out);
        let _ = writeln!(out, "**Issues:**");
        for issue in worst_prompt_issues(p) {
            let _ = writeln!(out, "- {}", issue.describe());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "**How to improve:**");
        let _ = writeln!(out, "- State the requirements concretely");
        let _ = writeln!(out, "- Describe the expected output");
        let _ = writeln!(out, "- Split the work into steps");
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
    }

    out.push_str(TIPS_SECTION);
    let _ = writeln!(
        out,
        "Generated by `cx prompts --project {project} --export`."
    );
    out
}

const SCORING_SECTION: &str = "\
## How Prompts Are Scored

Each prompt is ranked with four session metrics:

- **Efficiency (40%)**: code blocks generated per user prompt
- **Clarity (30%)**: reaching the goal in few messages (100 / messages)
- **Productivity (20%)**: lines of code generated, relative to the busiest session
- **Quality (10%)**: no sensitive data, several languages

**Composite = efficiency x 0.4 + clarity x 0.3 + productivity x 0.2 + quality x 0.1**

---

";

const TIPS_SECTION: &str = "
## Prompt Writing Tips

Based on the best prompts above:

1. **Clear goal**: say exactly what you want built or changed
2. **Context**: describe the current situation and background
3. **Examples**: point at an existing file or a sample of the result
4. **Constraints**: list the rules and limits to respect
5. **Small steps**: split large tasks into smaller ones

---

";

impl<S: Store> PromptAnalytics<S> {
    /// Write the prompt library for `project` and return its path.
    ///
    /// Defaults to `<data dir>/prompt-library/<project>-prompts.md`. Parent
    /// directories are created as needed.
    pub fn export_prompt_library(
        &self,
        project: Option<&str>,
        output_path: Option<&Path>,
    ) -> Result<PathBuf, AnalyticsError> {
        let filter = SessionFilter::from_option(project);
        let label = filter.label().to_string();

        let path = match output_path {
            Some(p) => p.to_path_buf(),
            None => crate::paths::prompt_library_path(&label).ok_or(AnalyticsError::HomeDirNotFound)?,
        };

        let ranked = self.analyze_prompt_quality(&filter)?;
        let total = ranked.len();
        let best: Vec<RankedPrompt> = ranked.iter().take(LIBRARY_BEST_LIMIT).cloned().collect();
        let worst: Vec<RankedPrompt> = ranked.iter().rev().take(LIBRARY_WORST_LIMIT).cloned().collect();

        let markdown = render_prompt_library(&label, &best, &worst, total, Local::now());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AnalyticsError::io(parent, e))?;
        }
        std::fs::write(&path, markdown).map_err(|e| AnalyticsError::io(&path, e))?;

        info!(project = %label, path = %path.display(), prompts = total, "Exported prompt library");
        Ok(path)
    }
}
