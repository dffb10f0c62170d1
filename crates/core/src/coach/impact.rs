// crates/core/src/coach/impact.rs
//! Projected outcome improvement if the prompt is rewritten.
//!
//! Baselines are fixed assumptions about an unimproved prompt: 9 messages per
//! task, 2 code outputs, 35% first-try success.

use crate::scoring::round2;
use crate::types::{ImpactEstimate, ImpactMetric, PromptScores};

pub const BASELINE_MESSAGES: u32 = 9;
pub const BASELINE_CODE_OUTPUTS: u32 = 2;
pub const BASELINE_SUCCESS_RATE: f64 = 0.35;

const MIN_RATIO: f64 = 0.1;
const MAX_RATIO: f64 = 0.7;
const MAX_SUCCESS_RATE: f64 = 0.95;

/// Raise a score by 3 points, floored at 7 and capped at 10.
fn target_score(current: f64) -> f64 {
    (current + 3.0).max(7.0).min(10.0)
}

/// Fraction of the reachable improvement, clamped to [0.1, 0.7].
pub fn improvement_ratio(scores: &PromptScores) -> f64 {
    let gain = target_score(scores.structure) + target_score(scores.context)
        - scores.structure
        - scores.context;
    (gain / 20.0).clamp(MIN_RATIO, MAX_RATIO)
}

pub fn calculate_expected_impact(scores: &PromptScores) -> ImpactEstimate {
    let ratio = improvement_ratio(scores);

    let expected_messages =
        ((f64::from(BASELINE_MESSAGES) * (1.0 - ratio)).round_ties_even() as u32).max(3);
    let expected_code =
        ((f64::from(BASELINE_CODE_OUTPUTS) * (1.0 + ratio * 2.0)).round_ties_even() as u32).max(1);
    let expected_success = (BASELINE_SUCCESS_RATE + ratio * 0.6).min(MAX_SUCCESS_RATE);

    ImpactEstimate {
        messages: ImpactMetric {
            current: BASELINE_MESSAGES,
            expected: expected_messages,
            improvement: percent_change(
                f64::from(BASELINE_MESSAGES),
                f64::from(expected_messages),
                true,
            ),
        },
        code_generation: ImpactMetric {
            current: BASELINE_CODE_OUTPUTS,
            expected: expected_code,
            improvement: percent_change(
                f64::from(BASELINE_CODE_OUTPUTS),
                f64::from(expected_code),
                false,
            ),
        },
        success_rate: ImpactMetric {
            current: round2(BASELINE_SUCCESS_RATE),
            expected: round2(expected_success),
            improvement: percent_change(BASELINE_SUCCESS_RATE, expected_success, false),
        },
    }
}

/// Signed whole-percent change, truncated toward zero. `"N/A"` for a zero baseline.
///
/// With `lower_is_better`, a decrease is reported as a positive improvement.
pub fn percent_change(current: f64, expected: f64, lower_is_better: bool) -> String {
    if current == 0.0 {
        return "N/A".to_string();
    }
    let mut change = (expected - current) / current;
    if lower_is_better {
        change = -change;
    }
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", (change * 100.0).trunc() as i64)
}
