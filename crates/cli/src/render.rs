// crates/cli/src/render.rs
//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use anyhow::Result;
use claude_x_core::tools::PromptScoreResult;
use claude_x_core::{CoachingResult, PromptTemplate, RankedPrompt, Severity};
use claude_x_db::ImportStats;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    claude_x_core::library::truncate_prompt(&text.replace('\n', " "), max_chars)
}

pub fn import_summary(stats: &ImportStats) -> String {
    let mut out = String::from("Import complete\n");
    let _ = writeln!(out, "  Sessions:      {}", stats.sessions);
    let _ = writeln!(out, "  Messages:      {}", stats.messages);
    let _ = writeln!(out, "  Code snippets: {}", stats.snippets);
    if stats.failed > 0 {
        let _ = writeln!(out, "  Failed:        {} (see logs)", stats.failed);
    }
    out
}

pub fn score_text(result: &PromptScoreResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Structure: {:.1}/10", result.structure_score);
    let _ = writeln!(out, "Context:   {:.1}/10", result.context_score);
    let _ = writeln!(out, "Combined:  {:.1}/20", result.combined_score);
    let _ = writeln!(out);
    for s in &result.suggestions {
        let _ = writeln!(out, "- {s}");
    }
    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "HIGH",
        Severity::Medium => "MEDIUM",
        Severity::Low => "LOW",
    }
}

pub fn coaching_text(result: &CoachingResult) -> String {
    let mut out = String::new();
    let s = &result.scores;
    let _ = writeln!(
        out,
        "Scores: structure {:.1}, context {:.1} (combined {:.1}) [{}]",
        s.structure,
        s.context,
        s.combined(),
        result.language
    );

    if !result.problems.is_empty() {
        let _ = writeln!(out, "\nProblems:");
        for p in &result.problems {
            let _ = writeln!(out, "  [{}] {}", severity_label(p.severity), p.description);
            let _ = writeln!(out, "      impact: {}", p.impact);
            let _ = writeln!(out, "      fix:    {}", p.how_to_fix);
        }
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions:");
        for (i, sug) in result.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} ({:.0}%)", i + 1, sug.title, sug.confidence * 100.0);
            let _ = writeln!(out, "     template: {}", sug.template);
            let _ = writeln!(out, "     example:  {}", sug.example);
        }
    }

    if let Some(ext) = &result.extension_suggestion {
        let _ = writeln!(out, "\nTry {}: {}", ext.command, ext.reason);
    }

    let impact = &result.expected_impact;
    let _ = writeln!(out, "\nExpected impact:");
    let _ = writeln!(
        out,
        "  messages:        {} -> {} ({})",
        impact.messages.current, impact.messages.expected, impact.messages.improvement
    );
    let _ = writeln!(
        out,
        "  code generation: {} -> {} ({})",
        impact.code_generation.current,
        impact.code_generation.expected,
        impact.code_generation.improvement
    );
    let _ = writeln!(
        out,
        "  success rate:    {:.2} -> {:.2} ({})",
        impact.success_rate.current, impact.success_rate.expected, impact.success_rate.improvement
    );

    if !result.user_insights.is_empty() {
        let _ = writeln!(out, "\nFrom your history:");
        for insight in &result.user_insights {
            let _ = writeln!(out, "  - {} {}", insight.message, insight.recommendation);
        }
    }
    out
}

pub fn ranked_table(title: &str, prompts: &[RankedPrompt]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if prompts.is_empty() {
        let _ = writeln!(out, "  No prompts found. Run `cx import` first.");
        return out;
    }
    for (i, p) in prompts.iter().enumerate() {
        let m = &p.session.metrics;
        let _ = writeln!(
            out,
            "{:>3}. {:>6.2}  {:<12} {}",
            i + 1,
            p.composite_score,
            p.category.label(),
            truncate(p.first_prompt(), 70)
        );
        let _ = writeln!(
            out,
            "       {} msgs, {} code, {} lines | v2 {:.2} (structure {:.1}, context {:.1})",
            m.message_count,
            m.code_count,
            m.total_lines,
            p.v2.composite_score,
            p.v2.structure_score,
            p.v2.context_score
        );
    }
    out
}

pub fn template_list(templates: &[&PromptTemplate]) -> String {
    let mut out = String::new();
    if templates.is_empty() {
        let _ = writeln!(out, "No templates found.");
        return out;
    }
    for t in templates {
        let _ = writeln!(out, "{:<24} [{}] {}", t.name, t.category, t.description);
    }
    out
}

pub fn template_detail(t: &PromptTemplate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", t.name, t.category);
    let _ = writeln!(out, "{}", t.description);
    let _ = writeln!(out, "\nTemplate:\n{}", t.template);
    let _ = writeln!(out, "\nVariables: {}", t.variables.join(", "));
    let _ = writeln!(out, "\nExample:\n{}", t.example);
    let _ = writeln!(out, "\nTags: {}", t.tags.join(", "));
    let _ = writeln!(out, "Success: {}", t.success_metrics);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use claude_x_core::{NoHistory, PromptCoach, TemplateLibrary};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_import_summary_hides_zero_failures() {
        let stats = ImportStats {
            sessions: 2,
            messages: 10,
            snippets: 3,
            failed: 0,
        };
        let text = import_summary(&stats);
        assert!(text.contains("Sessions:      2"));
        assert!(!text.contains("Failed"));
    }

    #[test]
    fn test_score_text_lists_suggestions() {
        let text = score_text(&claude_x_core::tools::score_prompt("fix it"));
        assert!(text.starts_with("Structure: "));
        assert!(text.contains("- Provide more details about the task"));
    }

    #[test]
    fn test_coaching_text_sections() {
        let result = PromptCoach::new(&NoHistory).analyze("fix it", false, false);
        let text = coaching_text(&result);
        assert!(text.contains("Problems:"));
        assert!(text.contains("[HIGH]"));
        assert!(text.contains("Expected impact:"));
        assert!(!text.contains("From your history:"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(
            ranked_table("Best prompts (all)", &[]),
            "Best prompts (all)\n  No prompts found. Run `cx import` first.\n"
        );
        assert_eq!(template_list(&[]), "No templates found.\n");
    }

    #[test]
    fn test_template_detail() {
        let t = TemplateLibrary.get("code_review").unwrap();
        let text = template_detail(t);
        assert!(text.starts_with("code_review [code_review]"));
        assert!(text.contains("Variables: FILE, FOCUS, CONTEXT"));
    }
}
