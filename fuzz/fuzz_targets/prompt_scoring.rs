#![no_main]

use claude_x_core::{
    analyze_prompt_for_pattern, calculate_composite_score_v2, NoHistory, PromptCoach,
    SessionMetrics,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(prompt) = std::str::from_utf8(data) else {
        return;
    };

    let scores = calculate_composite_score_v2(prompt, &SessionMetrics::default(), 1000);
    for s in [
        scores.structure_score,
        scores.context_score,
        scores.productivity_score,
        scores.efficiency_score,
        scores.diversity_score,
        scores.composite_score,
    ] {
        assert!((0.0..=10.0).contains(&s), "score out of range: {s}");
    }

    let result = PromptCoach::new(&NoHistory).analyze(prompt, false, false);
    assert!(result.suggestions.len() <= 3);

    let pattern = analyze_prompt_for_pattern(prompt);
    assert!((0.0..=1.0).contains(&pattern.quality_score));
});
