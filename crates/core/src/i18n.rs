// crates/core/src/i18n.rs
//! Localized display strings for coaching output.
//!
//! All user-facing text is looked up by `(key, language)` in a static
//! catalog. Templates use `{variable}` placeholders that are substituted at
//! render time. Scoring code never embeds display strings; it goes through
//! the [`Translator`] seam.

use serde::{Deserialize, Serialize};

/// Output language of a coaching result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

/// Korean if the text contains any Hangul syllable or jamo, English otherwise.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_hangul) {
        Language::Ko
    } else {
        Language::En
    }
}

/// Localization seam used by the coach.
pub trait Translator {
    /// Render the message for `key` in `lang`, substituting `{name}` placeholders.
    fn t(&self, key: &str, lang: Language, vars: &[(&str, String)]) -> String;

    fn detect_language(&self, text: &str) -> Language {
        detect_language(text)
    }
}

/// A catalog entry: key plus English and Korean text.
pub struct CatalogEntry {
    pub key: &'static str,
    pub en: &'static str,
    pub ko: &'static str,
}

/// Built-in message catalog.
pub static MESSAGES: &[CatalogEntry] = &[
    // ============================
    // Problems
    // ============================
    CatalogEntry {
        key: "problems.no_target",
        en: "No clear goal or target",
        ko: "명확한 목표나 대상이 없습니다",
    },
    CatalogEntry {
        key: "problems.no_target.impact",
        en: "The assistant has to guess what to change, which adds back-and-forth.",
        ko: "AI가 무엇을 바꿔야 할지 추측해야 해서 대화가 길어집니다.",
    },
    CatalogEntry {
        key: "problems.no_target.fix",
        en: "State the action and the file, component, or function to change.",
        ko: "수행할 작업과 대상 파일, 컴포넌트, 함수를 명시하세요.",
    },
    CatalogEntry {
        key: "problems.no_context",
        en: "Missing context",
        ko: "맥락 정보가 부족합니다",
    },
    CatalogEntry {
        key: "problems.no_context.impact",
        en: "Without files, tech stack, or error details the first answer is often generic.",
        ko: "파일, 기술 스택, 에러 정보가 없으면 첫 답변이 일반적인 내용이 되기 쉽습니다.",
    },
    CatalogEntry {
        key: "problems.no_context.fix",
        en: "Mention the relevant files, the tech stack, and the current situation.",
        ko: "관련 파일, 기술 스택, 현재 상황을 함께 적어주세요.",
    },
    CatalogEntry {
        key: "problems.conversational",
        en: "Conversational or vague reference",
        ko: "대화체 또는 모호한 지시어",
    },
    CatalogEntry {
        key: "problems.conversational.impact",
        en: "References like 'that one' or 'earlier' rely on context the assistant may have lost.",
        ko: "'그거', '아까' 같은 표현은 AI가 놓쳤을 수 있는 맥락에 의존합니다.",
    },
    CatalogEntry {
        key: "problems.conversational.fix",
        en: "Name the thing you are referring to explicitly.",
        ko: "가리키는 대상을 구체적으로 적어주세요.",
    },
    CatalogEntry {
        key: "problems.no_file",
        en: "No file path",
        ko: "파일 경로가 없습니다",
    },
    CatalogEntry {
        key: "problems.no_file.impact",
        en: "The assistant has to search the codebase before it can start.",
        ko: "AI가 작업 전에 코드베이스를 먼저 탐색해야 합니다.",
    },
    CatalogEntry {
        key: "problems.no_file.fix",
        en: "Include the path of the file to work on (e.g. src/app.py).",
        ko: "작업할 파일 경로를 포함하세요 (예: src/app.py).",
    },
    CatalogEntry {
        key: "problems.no_error",
        en: "Error mentioned without the message",
        ko: "에러 메시지 없이 에러를 언급했습니다",
    },
    CatalogEntry {
        key: "problems.no_error.impact",
        en: "Debugging starts from guesses instead of the actual failure.",
        ko: "실제 실패 원인 대신 추측으로 디버깅을 시작하게 됩니다.",
    },
    CatalogEntry {
        key: "problems.no_error.fix",
        en: "Paste the exact error message or stack trace.",
        ko: "정확한 에러 메시지나 스택 트레이스를 붙여넣으세요.",
    },
    // ============================
    // Suggestions
    // ============================
    CatalogEntry {
        key: "suggestions.user_pattern",
        en: "Reuse your successful pattern: {pattern}",
        ko: "성공했던 패턴 활용: {pattern}",
    },
    CatalogEntry {
        key: "suggestions.generic",
        en: "Rewrite the prompt with a clear goal and context",
        ko: "명확한 목표와 맥락을 담아 다시 작성해보세요",
    },
    CatalogEntry {
        key: "suggestions.add_file",
        en: "Add the file path",
        ko: "파일 경로를 추가하세요",
    },
    CatalogEntry {
        key: "suggestions.add_file.template",
        en: "In [FILE], [TASK]",
        ko: "[FILE]에서 [TASK]를 처리해줘",
    },
    CatalogEntry {
        key: "suggestions.add_file.example",
        en: "In src/app.py, fix the login bug",
        ko: "src/app.py에서 로그인 버그를 수정해줘",
    },
    CatalogEntry {
        key: "suggestions.add_context",
        en: "Describe the current situation",
        ko: "현재 상황을 설명하세요",
    },
    CatalogEntry {
        key: "suggestions.add_context.template",
        en: "Current situation: [CONTEXT]\nRequest: [TASK]",
        ko: "현재 상황: [CONTEXT]\n요청: [TASK]",
    },
    CatalogEntry {
        key: "suggestions.add_context.example",
        en: "The checkout button currently does nothing. Find the cause.",
        ko: "현재 결제 버튼이 동작하지 않아. 원인을 찾아줘",
    },
    CatalogEntry {
        key: "suggestions.add_error",
        en: "Include the error message",
        ko: "에러 메시지를 포함하세요",
    },
    CatalogEntry {
        key: "suggestions.add_error.template",
        en: "Error message: [ERROR]\nExpected behavior: [EXPECTED]",
        ko: "에러 메시지: [ERROR]\n기대 동작: [EXPECTED]",
    },
    CatalogEntry {
        key: "suggestions.add_error.example",
        en: "TypeError: ... / Expected: clicking the button starts checkout",
        ko: "TypeError: ... / 기대 동작: 버튼 클릭 시 결제",
    },
    // ============================
    // User insights
    // ============================
    CatalogEntry {
        key: "insights.file_strength",
        en: "{value}% of your best prompts name a file path.",
        ko: "베스트 프롬프트의 {value}%가 파일 경로를 포함합니다.",
    },
    CatalogEntry {
        key: "insights.file_weakness",
        en: "Your best prompts rarely name a file path.",
        ko: "베스트 프롬프트에 파일 경로가 거의 없습니다.",
    },
    CatalogEntry {
        key: "insights.error_strength",
        en: "{value}% of your best prompts include the error message.",
        ko: "베스트 프롬프트의 {value}%가 에러 메시지를 포함합니다.",
    },
    CatalogEntry {
        key: "insights.error_weakness",
        en: "Your best prompts rarely include error messages.",
        ko: "베스트 프롬프트에 에러 메시지가 거의 없습니다.",
    },
    CatalogEntry {
        key: "insights.keep",
        en: "Keep doing this.",
        ko: "지금처럼 유지하세요.",
    },
    CatalogEntry {
        key: "insights.improve",
        en: "Adding this tends to shorten conversations.",
        ko: "이 정보를 추가하면 대화가 짧아지는 경향이 있습니다.",
    },
];

/// Look up a catalog entry by key.
pub fn get_entry(key: &str) -> Option<&'static CatalogEntry> {
    MESSAGES.iter().find(|e| e.key == key)
}

/// Substitute `{name}` placeholders. Unknown placeholders are left as is.
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (name, value) in vars {
        let placeholder = format!("{{{name}}}");
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result
}

/// The built-in catalog translator. Unknown keys render as the key itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Translator for Catalog {
    fn t(&self, key: &str, lang: Language, vars: &[(&str, String)]) -> String {
        match get_entry(key) {
            Some(entry) => {
                let text = match lang {
                    Language::En => entry.en,
                    Language::Ko => entry.ko,
                };
                render(text, vars)
            }
            None => key.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("버그를 수정해줘"), Language::Ko);
        assert_eq!(detect_language("LoginForm.tsx 컴포넌트"), Language::Ko);
        assert_eq!(detect_language("ㅇㅇ"), Language::Ko);
        assert_eq!(detect_language("fix the bug"), Language::En);
        assert_eq!(detect_language(""), Language::En);
    }

    #[test]
    fn test_translate_by_language() {
        let catalog = Catalog;
        assert_eq!(catalog.t("problems.no_file", Language::En, &[]), "No file path");
        assert_eq!(catalog.t("problems.no_file", Language::Ko, &[]), "파일 경로가 없습니다");
    }

    #[test]
    fn test_translate_with_vars() {
        let text = Catalog.t("insights.file_strength", Language::En, &[("value", "80".into())]);
        assert_eq!(text, "80% of your best prompts name a file path.");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(Catalog.t("no.such.key", Language::Ko, &[]), "no.such.key");
    }

    #[test]
    fn test_render_leaves_missing_placeholder() {
        assert_eq!(render("Hello, {name}!", &[]), "Hello, {name}!");
        assert_eq!(render("Hello, {name}!", &[("name", "world".into())]), "Hello, world!");
    }

    #[test]
    fn test_catalog_keys_unique_and_complete() {
        let mut keys: Vec<_> = MESSAGES.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len(), "duplicate catalog keys");

        for kind in ["no_target", "no_context", "conversational", "no_file", "no_error"] {
            for suffix in ["", ".impact", ".fix"] {
                let key = format!("problems.{kind}{suffix}");
                assert!(get_entry(&key).is_some(), "missing {key}");
            }
        }
        for e in MESSAGES {
            assert!(!e.en.is_empty() && !e.ko.is_empty(), "empty text for {}", e.key);
        }
    }
}
