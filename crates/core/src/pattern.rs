// crates/core/src/pattern.rs
//! Turn a concrete prompt into a reusable template.
//!
//! Concrete details are abstracted into placeholders: structured error
//! messages become `[ERROR]`, code (fenced or inline) becomes `[CODE]`, and
//! source file paths become `[FILE]`.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::scoring::round2;
use crate::signals;
use crate::types::PromptScores;

static FENCED_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").ok());

/// Result of abstracting a prompt into a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// `Some` only when at least one placeholder was introduced.
    pub template: Option<String>,
    pub pattern_description: Option<String>,
    /// Estimated quality of the source prompt in [0, 1].
    pub quality_score: f64,
}

/// Abstract a prompt into a reusable template.
pub fn analyze_prompt_for_pattern(text: &str) -> PatternAnalysis {
    let scores = PromptScores::of(text);
    let quality_score = round2((scores.combined() / 20.0).clamp(0.0, 1.0));

    if text.trim().is_empty() {
        return PatternAnalysis {
            template: None,
            pattern_description: None,
            quality_score,
        };
    }

    let mut out = text.to_string();
    let mut has_code = false;
    let mut has_error = false;
    let mut has_file = false;

    if let Some(re) = FENCED_CODE.as_ref() {
        if re.is_match(&out) {
            out = re.replace_all(&out, "[CODE]").into_owned();
            has_code = true;
        }
    }

    while let Some((start, end)) = signals::find_error_message(&out) {
        out.replace_range(start..end, "[ERROR]");
        has_error = true;
    }

    if let Some(re) = signals::file_path_regex() {
        if re.is_match(&out) {
            out = re.replace_all(&out, "[FILE]").into_owned();
            has_file = true;
        }
    }

    if let Some(re) = signals::inline_code_regex() {
        if re.is_match(&out) {
            out = re
                .replace_all(&out, |caps: &Captures| {
                    // A backticked file name stays a file reference.
                    if &caps[0] == "`[FILE]`" {
                        "[FILE]".to_string()
                    } else {
                        has_code = true;
                        "[CODE]".to_string()
                    }
                })
                .into_owned();
        }
    }

    let mut elements = Vec::new();
    if has_file {
        elements.push("file reference");
    }
    if has_error {
        elements.push("error message");
    }
    if has_code {
        elements.push("code snippet");
    }

    if elements.is_empty() {
        return PatternAnalysis {
            template: None,
            pattern_description: None,
            quality_score,
        };
    }

    PatternAnalysis {
        template: Some(out),
        pattern_description: Some(elements.join(" + ")),
        quality_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_and_error_abstracted() {
        let analysis = analyze_prompt_for_pattern(
            "src/app.py에서 로그인 에러 수정해줘\nTypeError: cannot read property 'id'",
        );
        let template = analysis.template.unwrap();
        assert!(template.contains("[FILE]"), "got {template}");
        assert!(template.contains("[ERROR]"), "got {template}");
        assert!(!template.contains("src/app.py"));
        assert_eq!(
            analysis.pattern_description.as_deref(),
            Some("file reference + error message")
        );
    }

    #[test]
    fn test_fenced_code_abstracted() {
        let analysis = analyze_prompt_for_pattern("이 코드 리팩토링해줘\n```\nfn main() {}\n```");
        assert_eq!(analysis.template.as_deref(), Some("이 코드 리팩토링해줘\n[CODE]"));
        assert_eq!(analysis.pattern_description.as_deref(), Some("code snippet"));
    }

    #[test]
    fn test_backticked_file_stays_file() {
        let analysis = analyze_prompt_for_pattern("Fix the bug in `LoginForm.tsx`");
        assert_eq!(analysis.template.as_deref(), Some("Fix the bug in [FILE]"));
        assert_eq!(analysis.pattern_description.as_deref(), Some("file reference"));
    }

    #[test]
    fn test_no_details_no_template() {
        let analysis = analyze_prompt_for_pattern("fix it");
        assert!(analysis.template.is_none());
        assert!(analysis.pattern_description.is_none());
    }

    #[test]
    fn test_empty_prompt() {
        let analysis = analyze_prompt_for_pattern("");
        assert!(analysis.template.is_none());
        assert_eq!(analysis.quality_score, 0.0);
    }

    #[test]
    fn test_quality_score_in_unit_range() {
        let analysis = analyze_prompt_for_pattern(
            "현재 React 프로젝트의 src/components/LoginForm.tsx 컴포넌트에 유효성 검사를 추가해줘. \
             기존 SignupForm처럼 `zod`를 사용하고, 외부 라이브러리 없이 구현해줘.",
        );
        assert!(analysis.quality_score > 0.5, "got {}", analysis.quality_score);
        assert!(analysis.quality_score <= 1.0);
    }
}
