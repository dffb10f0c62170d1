// crates/core/src/coach/suggestions.rs
//! Suggestion generation: the user's own successful patterns first, then
//! generic fixes for detected problems, then a fallback.

use crate::i18n::{Language, Translator};
use crate::pattern::analyze_prompt_for_pattern;
use crate::types::{Problem, ProblemKind, Suggestion, SuggestionKind};

pub const MAX_SUGGESTIONS: usize = 3;

/// At most this many history prompts are mined for patterns.
const MAX_PATTERN_SOURCES: usize = 2;

const FALLBACK_CONFIDENCE: f64 = 0.5;

pub fn generate_suggestions(
    prompt: &str,
    problems: &[Problem],
    user_best: &[String],
    lang: Language,
    translator: &dyn Translator,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for source in user_best.iter().take(MAX_PATTERN_SOURCES) {
        let analysis = analyze_prompt_for_pattern(source);
        let Some(template) = analysis.template else {
            continue;
        };
        let pattern = analysis
            .pattern_description
            .unwrap_or_else(|| "pattern".to_string());
        suggestions.push(Suggestion {
            kind: SuggestionKind::UserPattern,
            title: translator.t("suggestions.user_pattern", lang, &[("pattern", pattern)]),
            template,
            example: source.clone(),
            confidence: analysis.quality_score,
        });
    }

    for problem in problems {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        if let Some(suggestion) = suggestion_for(problem.issue, lang, translator) {
            suggestions.push(suggestion);
        }
    }

    if suggestions.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Generic,
            title: translator.t("suggestions.generic", lang, &[]),
            template: prompt.to_string(),
            example: prompt.to_string(),
            confidence: FALLBACK_CONFIDENCE,
        });
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Generic templated fix for a problem, if one exists for its kind.
fn suggestion_for(
    kind: ProblemKind,
    lang: Language,
    translator: &dyn Translator,
) -> Option<Suggestion> {
    let (key, confidence) = match kind {
        ProblemKind::NoFile => ("add_file", 0.7),
        ProblemKind::NoContext => ("add_context", 0.6),
        ProblemKind::NoError => ("add_error", 0.6),
        ProblemKind::NoTarget | ProblemKind::Conversational => return None,
    };
    Some(Suggestion {
        kind: SuggestionKind::Generic,
        title: translator.t(&format!("suggestions.{key}"), lang, &[]),
        template: translator.t(&format!("suggestions.{key}.template"), lang, &[]),
        example: translator.t(&format!("suggestions.{key}.example"), lang, &[]),
        confidence,
    })
}
