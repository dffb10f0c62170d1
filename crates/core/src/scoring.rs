// crates/core/src/scoring.rs
//! Prompt quality scoring.
//!
//! Five independent metric functions map a prompt or simple session counts to
//! a sub-score in [0, 10]. Two composite schemes combine them:
//!
//! | Scheme | Components and weights |
//! |--------|------------------------|
//! | v2     | structure 0.25, context 0.25, productivity 0.20, efficiency 0.15, diversity 0.15 |
//! | legacy | efficiency 0.40, clarity 0.30, normalized productivity 0.20, quality 0.10 |
//!
//! Each scheme is an immutable named weight set passed explicitly into the
//! scorer, so both can be used side by side.
//!
//! The legacy composite normalizes productivity by the largest `total_lines`
//! in the batch being ranked. Legacy scores are therefore batch-relative:
//! ranking a different batch changes every score, even for identical
//! sessions. Historical reports depend on this, so it is kept as is.

use serde::{Deserialize, Serialize};

use crate::signals;
use crate::types::{ScoreSet, SessionMetrics};

/// Default productivity normalization ceiling, in lines of code.
pub const DEFAULT_MAX_LINES: i64 = 1000;

/// Points awarded per satisfied structure/context signal.
const SIGNAL_POINTS: f64 = 2.0;

const MAX_SCORE: f64 = 10.0;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, MAX_SCORE)
}

// ============================================================================
// Metric functions
// ============================================================================

/// Structure score (0-10): goal, target, constraint, example, and length banding.
///
/// Empty input scores exactly 0.
pub fn calculate_structure_score(prompt: &str) -> f64 {
    if prompt.is_empty() {
        return 0.0;
    }

    let checks = [
        signals::has_goal(prompt),
        signals::has_target(prompt),
        signals::has_constraint(prompt),
        signals::has_example(prompt),
    ];
    let points = checks.iter().filter(|hit| **hit).count() as f64 * SIGNAL_POINTS;

    clamp_score(points + signals::length_points(prompt))
}

/// Context score (0-10): file/path mention, tech stack, code fragment,
/// error information, and background.
///
/// Empty input scores exactly 0.
pub fn calculate_context_score(prompt: &str) -> f64 {
    if prompt.is_empty() {
        return 0.0;
    }

    let checks = [
        signals::has_path_mention(prompt),
        signals::has_tech_keyword(prompt),
        signals::has_code_fragment(prompt),
        signals::has_error_signal(prompt),
        signals::has_background(prompt),
    ];
    let points = checks.iter().filter(|hit| **hit).count() as f64 * SIGNAL_POINTS;

    clamp_score(points)
}

/// Efficiency score (0-10): shorter conversations score higher.
///
/// Boundary values belong to the lower-count bucket (`5 -> 10`, `6 -> 9`).
pub fn calculate_efficiency_score(message_count: u32) -> f64 {
    match message_count {
        0..=5 => 10.0,
        6..=10 => 9.0,
        11..=20 => 8.0,
        21..=35 => 6.0,
        36..=50 => 5.0,
        51..=75 => 4.0,
        76..=100 => 3.0,
        _ => 2.0,
    }
}

/// Diversity score (0-10) from the number of distinct code languages.
pub fn calculate_diversity_score(language_diversity: u32) -> f64 {
    match language_diversity {
        0 => 0.0,
        1 => 4.0,
        2 => 6.0,
        3 => 8.0,
        _ => 10.0,
    }
}

/// Productivity score (0-10): `total_lines / max_lines * 10`, capped at 10.
///
/// A zero or negative ceiling yields 0 regardless of `total_lines`.
pub fn calculate_productivity_score(total_lines: u32, max_lines: i64) -> f64 {
    if max_lines <= 0 {
        return 0.0;
    }
    (total_lines as f64 / max_lines as f64 * MAX_SCORE).min(MAX_SCORE)
}

// ============================================================================
// Composite v2
// ============================================================================

/// Weight set for the v2 composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct V2Weights {
    pub name: &'static str,
    pub structure: f64,
    pub context: f64,
    pub productivity: f64,
    pub efficiency: f64,
    pub diversity: f64,
}

impl V2Weights {
    pub fn sum(&self) -> f64 {
        self.structure + self.context + self.productivity + self.efficiency + self.diversity
    }
}

pub const V2_WEIGHTS: V2Weights = V2Weights {
    name: "v2",
    structure: 0.25,
    context: 0.25,
    productivity: 0.20,
    efficiency: 0.15,
    diversity: 0.15,
};

/// v2 composite with the default weight set. See [`composite_v2_with`].
pub fn calculate_composite_score_v2(
    prompt: &str,
    metrics: &SessionMetrics,
    max_lines: i64,
) -> ScoreSet {
    composite_v2_with(prompt, metrics, max_lines, &V2_WEIGHTS)
}

/// Score a prompt and one snapshot of its session metrics with `weights`.
///
/// Every field of the returned set is rounded to two decimals and lies in [0, 10].
pub fn composite_v2_with(
    prompt: &str,
    metrics: &SessionMetrics,
    max_lines: i64,
    weights: &V2Weights,
) -> ScoreSet {
    let structure = calculate_structure_score(prompt);
    let context = calculate_context_score(prompt);
    let productivity = calculate_productivity_score(metrics.total_lines, max_lines);
    let efficiency = calculate_efficiency_score(metrics.message_count);
    let diversity = calculate_diversity_score(metrics.language_diversity);

    let composite = structure * weights.structure
        + context * weights.context
        + productivity * weights.productivity
        + efficiency * weights.efficiency
        + diversity * weights.diversity;

    ScoreSet {
        structure_score: round2(structure),
        context_score: round2(context),
        productivity_score: round2(productivity),
        efficiency_score: round2(efficiency),
        diversity_score: round2(diversity),
        composite_score: round2(clamp_score(composite)),
    }
}

// ============================================================================
// Legacy composite
// ============================================================================

/// Weight set for the legacy composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyWeights {
    pub name: &'static str,
    pub efficiency: f64,
    pub clarity: f64,
    pub productivity: f64,
    pub quality: f64,
}

impl LegacyWeights {
    pub fn sum(&self) -> f64 {
        self.efficiency + self.clarity + self.productivity + self.quality
    }
}

pub const LEGACY_WEIGHTS: LegacyWeights = LegacyWeights {
    name: "legacy",
    efficiency: 0.40,
    clarity: 0.30,
    productivity: 0.20,
    quality: 0.10,
};

/// Legacy efficiency: code snippets per user prompt (0 without prompts).
pub fn calculate_legacy_efficiency(code_count: u32, user_prompt_count: u32) -> f64 {
    if user_prompt_count == 0 {
        return 0.0;
    }
    round2(code_count as f64 / user_prompt_count as f64)
}

/// Legacy clarity: `100 / message_count` (0 without messages).
pub fn calculate_legacy_clarity(message_count: u32) -> f64 {
    if message_count == 0 {
        return 0.0;
    }
    round2(100.0 / message_count as f64)
}

/// Legacy quality tier from sensitive-data absence and language diversity.
pub fn calculate_legacy_quality(sensitive_count: u32, language_diversity: u32) -> u32 {
    match (sensitive_count == 0, language_diversity) {
        (true, d) if d >= 3 => 10,
        (true, 2) => 8,
        (true, _) => 6,
        (false, d) if d >= 3 => 5,
        (false, _) => 3,
    }
}

/// Raw legacy components of one session.
///
/// Components are unbounded, so a legacy composite can exceed 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyScores {
    pub efficiency_score: f64,
    pub clarity_score: f64,
    /// Raw productivity: total generated lines (normalized per batch).
    pub productivity_score: u32,
    pub quality_score: u32,
}

impl LegacyScores {
    pub fn from_metrics(metrics: &SessionMetrics) -> Self {
        Self {
            efficiency_score: calculate_legacy_efficiency(
                metrics.code_count,
                metrics.user_prompt_count,
            ),
            clarity_score: calculate_legacy_clarity(metrics.message_count),
            productivity_score: metrics.total_lines,
            quality_score: calculate_legacy_quality(
                metrics.sensitive_count,
                metrics.language_diversity,
            ),
        }
    }
}

/// Legacy composite with the default weight set. See [`legacy_composite_with`].
pub fn calculate_legacy_composite(scores: &LegacyScores, max_lines_across_batch: u32) -> f64 {
    legacy_composite_with(scores, max_lines_across_batch, &LEGACY_WEIGHTS)
}

/// Legacy composite, rounded to two decimals.
///
/// `max_lines_across_batch` is the largest `total_lines` of the batch being
/// ranked, which makes the result batch-relative. The legacy components are
/// unbounded (clarity alone reaches 100 for a one-message session), so the
/// composite is not clamped to [0, 10].
pub fn legacy_composite_with(
    scores: &LegacyScores,
    max_lines_across_batch: u32,
    weights: &LegacyWeights,
) -> f64 {
    let normalized_productivity =
        scores.productivity_score as f64 / max_lines_across_batch.max(1) as f64 * MAX_SCORE;

    round2(
        scores.efficiency_score * weights.efficiency
            + scores.clarity_score * weights.clarity
            + normalized_productivity * weights.productivity
            + scores.quality_score as f64 * weights.quality,
    )
}

/// Which composite orders a batch of sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingScheme {
    #[default]
    Legacy,
    V2,
}

// ============================================================================
// Tests
// ============================================================================
