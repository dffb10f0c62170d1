// crates/core/src/lib.rs
pub mod analytics;
pub mod category;
pub mod coach;
pub mod config;
pub mod error;
pub mod extensions;
pub mod i18n;
pub mod library;
pub mod paths;
pub mod pattern;
pub mod scanner;
pub mod scoring;
pub mod signals;
pub mod templates;
pub mod tools;
pub mod types;

pub use analytics::{PromptAnalytics, RankedPrompt, SessionFilter, Store};
pub use category::{BranchType, PromptCategory};
pub use coach::{NoHistory, PromptCoach, PromptHistory};
pub use config::CoachConfig;
pub use error::*;
pub use extensions::{ExtensionDetector, ExtensionSuggestion, FsExtensionDetector, NoExtensions};
pub use i18n::{Catalog, Language, Translator};
pub use pattern::{analyze_prompt_for_pattern, PatternAnalysis};
pub use scanner::{PatternScanner, Scanner};
pub use scoring::*;
pub use templates::{PromptTemplate, TemplateLibrary};
pub use types::*;
