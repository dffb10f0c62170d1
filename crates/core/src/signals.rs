// crates/core/src/signals.rs
//! Named textual signals used by the prompt scorers and the coach.
//!
//! Every signal is a pure `fn(&str) -> bool` backed by a static keyword or
//! regex table. Korean and English keywords live side by side in each table,
//! so swapping or extending a list never touches the scoring arithmetic.

use std::sync::LazyLock;

use regex_lite::Regex;

// ============================================================================
// Pattern tables
// ============================================================================

/// Goal / action verbs.
const GOAL_PATTERNS: &[&str] = &[
    r"해줘|하고\s*싶|만들어|구현해|추가해|수정해|삭제해|변경해|개선해",
    r"please|want to|create|implement|add|fix|remove|update|improve",
    r"알려줘|설명해|찾아|분석해|검토해",
    r"explain|find|analyze|review|help",
];

/// A concrete target: file name, component name, code unit, or source path.
const TARGET_PATTERNS: &[&str] = &[
    r"[\w가-힣ㄱ-ㅎㅏ-ㅣ]+\.(tsx?|jsx?|py|go|rs|java|vue|svelte|css|scss)",
    r"[A-Z][a-zA-Z]+(?:Component|Page|Form|Modal|Hook|Service|Controller|Store)",
    r"(?:함수|function|method|class|컴포넌트|component|모듈|module)",
    r"src/|components/|pages/|api/|utils/|lib/",
];

/// Negations, exclusions, and bounds.
const CONSTRAINT_PATTERNS: &[&str] = &[
    r"하지\s*말고|없이|대신|만\s|만으로|제외",
    r"without|instead|only|don't|except|but not|avoid",
    r"최소|최대|이상|이하|미만|초과",
    r"minimum|maximum|at least|at most|less than|more than",
];

/// Comparisons and references to existing work.
const EXAMPLE_PATTERNS: &[&str] = &[
    r"예를\s*들어|예시|처럼|같이|참고|비슷하게",
    r"like|example|similar|reference|such as|e\.g\.",
    r"기존|현재|이전|원래|기반으로",
    r"existing|current|previous|original|based on",
];

// regex-lite's `\w` is ASCII only; Hangul is listed explicitly in name classes.
const PATH_MENTION_PATTERN: &str =
    r"[/\\][\w가-힣ㄱ-ㅎㅏ-ㅣ.-]+|[\w가-힣ㄱ-ㅎㅏ-ㅣ.-]+\.[a-z]{2,4}\b";

/// Closed list of technology-stack keywords, matched as lowercase substrings.
pub const TECH_KEYWORDS: &[&str] = &[
    "react", "vue", "angular", "svelte", "next", "nuxt",
    "typescript", "javascript", "python", "node", "go", "rust",
    "api", "rest", "graphql", "grpc", "websocket",
    "database", "sql", "mongodb", "redis", "postgres",
    "css", "tailwind", "scss", "styled",
    "docker", "kubernetes", "aws", "gcp", "azure",
    "git", "github", "gitlab",
];

const INLINE_CODE_PATTERN: &str = r"`[^`]+`";

/// Exceptions, failure words, and HTTP status mentions.
const ERROR_SIGNAL_PATTERNS: &[&str] = &[
    r"error|exception|traceback|stack\s*trace",
    r"에러|오류|실패|안\s*됨|작동.*않|문제",
    r"warning|failed|crash|bug|issue",
    r"\d{3}\s*(error|status)",
];

/// Temporal and causal background keywords.
const BACKGROUND_PATTERNS: &[&str] = &[
    r"현재|지금|기존|이전|원래|상황",
    r"currently|now|existing|previous|original|situation",
    r"배경|이유|목적|왜냐하면",
    r"background|reason|purpose|because",
];

const FILE_PATH_PATTERN: &str =
    r"[\w가-힣ㄱ-ㅎㅏ-ㅣ./-]+\.(tsx?|jsx?|py|go|rs|java|vue|svelte|css|scss)";

const ERROR_KEYWORD_PATTERN: &str = r"error|exception|traceback|stack\s*trace|에러|오류|버그|실패|bug";

const ERROR_MESSAGE_PATTERN: &str =
    r"(TypeError|ReferenceError|SyntaxError|Exception|Traceback|stack\s*trace|에러|오류):";

/// Acknowledgement tokens and vague references to earlier turns.
const CONVERSATIONAL_PATTERNS: &[&str] = &[
    r"^(응|그래|알겠|좋아|ok|okay|ㅇㅇ|ㄱㄱ)",
    r"그거|이거|저거|아까|방금",
];

// ============================================================================
// Compiled tables
// ============================================================================

fn compile(patterns: &[&str], case_insensitive: bool) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| {
            if case_insensitive {
                Regex::new(&format!("(?i){p}")).ok()
            } else {
                Regex::new(p).ok()
            }
        })
        .collect()
}

static GOAL: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(GOAL_PATTERNS, true));
static TARGET: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(TARGET_PATTERNS, true));
static CONSTRAINT: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(CONSTRAINT_PATTERNS, true));
static EXAMPLE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(EXAMPLE_PATTERNS, true));
static PATH_MENTION: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[PATH_MENTION_PATTERN], false));
static INLINE_CODE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[INLINE_CODE_PATTERN], false));
static ERROR_SIGNAL: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(ERROR_SIGNAL_PATTERNS, true));
static BACKGROUND: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(BACKGROUND_PATTERNS, true));
static FILE_PATH: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[FILE_PATH_PATTERN], false));
static ERROR_KEYWORD: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[ERROR_KEYWORD_PATTERN], true));
static ERROR_MESSAGE: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[ERROR_MESSAGE_PATTERN], false));
static CONVERSATIONAL: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(CONVERSATIONAL_PATTERNS, true));

fn any_match(table: &[Regex], text: &str) -> bool {
    table.iter().any(|re| re.is_match(text))
}

// ============================================================================
// Structure signals
// ============================================================================

/// A goal or action verb is present ("fix", "추가해", ...).
pub fn has_goal(text: &str) -> bool {
    any_match(&GOAL, text)
}

/// A specific target is named: file, component, code unit, or path segment.
pub fn has_target(text: &str) -> bool {
    any_match(&TARGET, text)
}

/// A constraint is expressed ("without", "at least", "제외", ...).
pub fn has_constraint(text: &str) -> bool {
    any_match(&CONSTRAINT, text)
}

/// An example or reference is given ("like", "based on", "처럼", ...).
pub fn has_example(text: &str) -> bool {
    any_match(&EXAMPLE, text)
}

/// Length banding: 2 points for 20..=500 characters, 1 point for 10..=1000.
pub fn length_points(text: &str) -> f64 {
    let length = text.chars().count();
    if (20..=500).contains(&length) {
        2.0
    } else if (10..=1000).contains(&length) {
        1.0
    } else {
        0.0
    }
}

// ============================================================================
// Context signals
// ============================================================================

/// A path separator or dotted extension appears anywhere.
pub fn has_path_mention(text: &str) -> bool {
    any_match(&PATH_MENTION, text)
}

/// One of the closed-list technology keywords appears (case-insensitive).
pub fn has_tech_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    TECH_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// A fenced code block or an inline code span is present.
pub fn has_code_fragment(text: &str) -> bool {
    text.contains("```") || any_match(&INLINE_CODE, text)
}

/// An exception name, failure keyword, or HTTP status mention is present.
pub fn has_error_signal(text: &str) -> bool {
    any_match(&ERROR_SIGNAL, text)
}

/// Background or situation keywords are present ("currently", "because", ...).
pub fn has_background(text: &str) -> bool {
    any_match(&BACKGROUND, text)
}

// ============================================================================
// Coaching signals
// ============================================================================

/// A file name with a known source extension is referenced.
pub fn has_file_path(text: &str) -> bool {
    !text.is_empty() && any_match(&FILE_PATH, text)
}

/// The prompt talks about an error or bug.
pub fn has_error_keywords(text: &str) -> bool {
    !text.is_empty() && any_match(&ERROR_KEYWORD, text)
}

/// The prompt carries a structured error message such as `TypeError: ...`.
pub fn has_error_message(text: &str) -> bool {
    !text.is_empty() && any_match(&ERROR_MESSAGE, text)
}

/// Filler acknowledgements or vague references ("ok", "그거", "아까", ...).
pub fn is_conversational(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    any_match(&CONVERSATIONAL, text.trim())
}

/// Locate the first structured error message span (`TypeError: ...` up to end of line).
pub fn find_error_message(text: &str) -> Option<(usize, usize)> {
    let m = ERROR_MESSAGE.first()?.find(text)?;
    let end = text[m.end()..]
        .find('\n')
        .map(|offset| m.end() + offset)
        .unwrap_or(text.len());
    Some((m.start(), end))
}

/// Regex for file paths with a known source extension.
pub(crate) fn file_path_regex() -> Option<&'static Regex> {
    FILE_PATH.first()
}

/// Regex for inline code spans.
pub(crate) fn inline_code_regex() -> Option<&'static Regex> {
    INLINE_CODE.first()
}

// ============================================================================
// Tests
// ============================================================================
