// crates/core/src/coach/problems.rs
//! Problem identification. Every check runs; all matches are reported in
//! evaluation order.

use crate::i18n::{Language, Translator};
use crate::signals;
use crate::types::{Problem, ProblemKind, PromptScores, Severity};

/// Structure or context below this is reported as a high-severity problem.
pub const LOW_SCORE_THRESHOLD: f64 = 2.0;

pub fn identify_problems(
    prompt: &str,
    scores: &PromptScores,
    lang: Language,
    translator: &dyn Translator,
) -> Vec<Problem> {
    let mut found = Vec::new();

    if scores.structure < LOW_SCORE_THRESHOLD {
        found.push((ProblemKind::NoTarget, Severity::High));
    }
    if scores.context < LOW_SCORE_THRESHOLD {
        found.push((ProblemKind::NoContext, Severity::High));
    }
    if signals::is_conversational(prompt) {
        found.push((ProblemKind::Conversational, Severity::Medium));
    }
    if !signals::has_file_path(prompt) {
        found.push((ProblemKind::NoFile, Severity::Medium));
    }
    if signals::has_error_keywords(prompt) && !signals::has_error_message(prompt) {
        found.push((ProblemKind::NoError, Severity::Medium));
    }

    found
        .into_iter()
        .map(|(kind, severity)| localize(kind, severity, lang, translator))
        .collect()
}

fn localize(
    kind: ProblemKind,
    severity: Severity,
    lang: Language,
    translator: &dyn Translator,
) -> Problem {
    let key = kind.as_str();
    Problem {
        issue: kind,
        severity,
        description: translator.t(&format!("problems.{key}"), lang, &[]),
        impact: translator.t(&format!("problems.{key}.impact"), lang, &[]),
        how_to_fix: translator.t(&format!("problems.{key}.fix"), lang, &[]),
    }
}
