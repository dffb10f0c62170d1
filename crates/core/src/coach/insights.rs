// crates/core/src/coach/insights.rs
//! Strengths and weaknesses derived from the user's own best prompts.

use crate::i18n::{Language, Translator};
use crate::signals;
use crate::types::{InsightKind, UserInsight};

pub const FILE_STRENGTH_RATIO: f64 = 0.6;
pub const ERROR_STRENGTH_RATIO: f64 = 0.4;

fn ratio(prompts: &[String], predicate: fn(&str) -> bool) -> f64 {
    if prompts.is_empty() {
        return 0.0;
    }
    let matches = prompts.iter().filter(|p| predicate(p)).count();
    matches as f64 / prompts.len() as f64
}

fn insight(
    ratio: f64,
    threshold: f64,
    stem: &str,
    lang: Language,
    translator: &dyn Translator,
) -> UserInsight {
    if ratio >= threshold {
        let value = ((ratio * 100.0) as i64).to_string();
        UserInsight {
            kind: InsightKind::Strength,
            message: translator.t(&format!("insights.{stem}_strength"), lang, &[("value", value)]),
            recommendation: translator.t("insights.keep", lang, &[]),
        }
    } else {
        UserInsight {
            kind: InsightKind::Weakness,
            message: translator.t(&format!("insights.{stem}_weakness"), lang, &[]),
            recommendation: translator.t("insights.improve", lang, &[]),
        }
    }
}

/// One file-path insight and one error-message insight; nothing for empty history.
pub fn generate_user_insights(
    user_best: &[String],
    lang: Language,
    translator: &dyn Translator,
) -> Vec<UserInsight> {
    if user_best.is_empty() {
        return Vec::new();
    }

    let file_ratio = ratio(user_best, signals::has_file_path);
    let error_ratio = ratio(user_best, signals::has_error_message);

    vec![
        insight(file_ratio, FILE_STRENGTH_RATIO, "file", lang, translator),
        insight(error_ratio, ERROR_STRENGTH_RATIO, "error", lang, translator),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn prompts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_history_no_insights() {
        assert!(generate_user_insights(&[], Language::En, &Catalog).is_empty());
    }

    #[test]
    fn test_file_strength_error_weakness() {
        let history = prompts(&[
            "src/app.py 수정해줘",
            "LoginForm.tsx 에 버튼 추가",
            "README 정리",
        ]);
        let insights = generate_user_insights(&history, Language::En, &Catalog);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].kind, InsightKind::Strength);
        assert_eq!(insights[0].message, "66% of your best prompts name a file path.");
        assert_eq!(insights[0].recommendation, "Keep doing this.");
        assert_eq!(insights[1].kind, InsightKind::Weakness);
    }

    #[test]
    fn test_error_strength_at_threshold() {
        // 2 of 5 = 0.4 exactly
        let history = prompts(&[
            "TypeError: a is undefined",
            "에러: 연결 실패",
            "fix it",
            "add tests",
            "hello",
        ]);
        let insights = generate_user_insights(&history, Language::Ko, &Catalog);
        assert_eq!(insights[0].kind, InsightKind::Weakness);
        assert_eq!(insights[1].kind, InsightKind::Strength);
        assert!(insights[1].message.contains("40%"), "got {}", insights[1].message);
    }
}
