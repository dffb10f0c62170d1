// crates/db/src/import.rs
//! Claude Code JSONL session import.
//!
//! Session logs live under `~/.claude/projects/<encoded project>/<id>.jsonl`.
//! Each line is one JSON entry; only `user` and `assistant` entries carry
//! conversation text. Fenced code blocks in assistant text become snippets.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::DateTime;
use claude_x_core::Scanner;
use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{MessageRole, SnippetRecord, SqliteStore};

/// Errors that can occur while reading session logs.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Session file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Permission denied reading file: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Option<String>,
    pub snippets: Vec<SnippetRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedSession {
    pub session_id: String,
    pub cwd: Option<String>,
    pub git_branch: Option<String>,
    pub created_at: Option<String>,
    pub first_prompt: String,
    pub messages: Vec<ImportedMessage>,
}

impl ImportedSession {
    /// Project name from the last segment of the session's working directory.
    pub fn project_name(&self) -> Option<&str> {
        self.cwd.as_deref().and_then(last_segment)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub sessions: u32,
    pub messages: u32,
    pub snippets: u32,
    pub failed: u32,
}

static FENCED_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)[^\n]*\n(.*?)```").ok());

fn last_segment(path: &str) -> Option<&str> {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
}

/// Decode a Claude project directory name: `-Users-me-work-front` -> `/Users/me/work/front`.
pub fn decode_project_dir(encoded: &str) -> String {
    encoded.replace('-', "/")
}

/// Extract fenced code blocks, flagging each with the scanner's verdict.
pub fn extract_code_blocks(text: &str, scanner: &dyn Scanner) -> Vec<SnippetRecord> {
    let Some(re) = FENCED_CODE.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| {
            let code = caps.get(2)?.as_str().trim_end_matches('\n');
            if code.trim().is_empty() {
                return None;
            }
            let language = caps
                .get(1)
                .map(|m| m.as_str().to_lowercase())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "text".to_string());
            Some(SnippetRecord {
                language,
                line_count: u32::try_from(code.lines().count()).unwrap_or(u32::MAX),
                has_sensitive: scanner.has_sensitive(code),
                code: code.to_string(),
            })
        })
        .collect()
}

/// Text of a `message.content` value: a plain string or the `text` blocks
/// of a block array. Tool results and other block types are ignored.
fn text_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

/// The entry's `timestamp` if it is RFC 3339; anything else is dropped.
fn timestamp_field(value: &Value) -> Option<String> {
    let raw = value.get("timestamp").and_then(Value::as_str)?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(_) => Some(raw.to_string()),
        Err(e) => {
            debug!("Ignoring unparseable timestamp {:?}: {}", raw, e);
            None
        }
    }
}

/// Parse one Claude Code session file.
///
/// Blank lines, malformed JSON, meta entries and entries without text are
/// skipped. The session id falls back to the file stem.
pub fn parse_session_file(path: &Path, scanner: &dyn Scanner) -> Result<ImportedSession, ImportError> {
    let file = File::open(path).map_err(|e| ImportError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut session = ImportedSession::default();
    let mut session_id: Option<String> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| ImportError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                debug!("Skipping malformed JSON at line {} in {:?}: {}", line_number, path, e);
                continue;
            }
        };

        if session_id.is_none() {
            session_id = str_field(&value, "sessionId");
        }
        if session.cwd.is_none() {
            session.cwd = str_field(&value, "cwd");
        }
        if session.git_branch.is_none() {
            session.git_branch = str_field(&value, "gitBranch").filter(|b| !b.is_empty());
        }
        let timestamp = timestamp_field(&value);
        if session.created_at.is_none() {
            session.created_at = timestamp.clone();
        }

        let role = match value.get("type").and_then(Value::as_str) {
            Some("user") => MessageRole::User,
            Some("assistant") => MessageRole::Assistant,
            _ => continue,
        };
        if value.get("isMeta").and_then(Value::as_bool) == Some(true) {
            debug!("Skipping meta message at line {}", line_number);
            continue;
        }

        let content = value
            .get("message")
            .and_then(|m| m.get("content"))
            .map(text_content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            continue;
        }

        let snippets = match role {
            MessageRole::Assistant => extract_code_blocks(&content, scanner),
            MessageRole::User => Vec::new(),
        };
        if role == MessageRole::User && session.first_prompt.is_empty() {
            session.first_prompt = content.clone();
        }
        session.messages.push(ImportedMessage {
            role,
            content,
            timestamp,
            snippets,
        });
    }

    session.session_id = session_id
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();
    Ok(session)
}

/// Import every `<dir>/<encoded project>/*.jsonl` file into `store`.
///
/// `project_filter` keeps projects whose name contains it (case-insensitive).
/// Unreadable files and failed inserts are counted in `failed` and logged.
pub fn import_projects_dir(
    store: &SqliteStore,
    dir: &Path,
    project_filter: Option<&str>,
    scanner: &dyn Scanner,
) -> Result<ImportStats, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let filter = project_filter.map(str::to_lowercase);
    let mut stats = ImportStats::default();

    let files = WalkDir::new(dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Failed to read directory entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "jsonl"));

    for entry in files {
        let path = entry.path();
        let session = match parse_session_file(path, scanner) {
            Ok(s) => s,
            Err(e) => {
                warn!("Skipping session file {}: {}", path.display(), e);
                stats.failed += 1;
                continue;
            }
        };
        if session.messages.is_empty() {
            debug!("Skipping empty session file {}", path.display());
            continue;
        }

        let encoded = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let decoded = decode_project_dir(&encoded);
        let project_path = session.cwd.clone().unwrap_or(decoded);
        let project_name = session
            .project_name()
            .or_else(|| last_segment(&project_path))
            .unwrap_or(encoded.as_str())
            .to_string();

        if let Some(filter) = &filter {
            if !project_name.to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }

        let inserted = store
            .upsert_project(&project_name, Some(&project_path))
            .and_then(|project_id| store.insert_imported_session(project_id, &session));
        match inserted {
            Ok((messages, snippets)) => {
                stats.sessions += 1;
                stats.messages += messages;
                stats.snippets += snippets;
            }
            Err(e) => {
                warn!(session_id = %session.session_id, "Failed to store session: {}", e);
                stats.failed += 1;
            }
        }
    }

    info!(
        sessions = stats.sessions,
        messages = stats.messages,
        snippets = stats.snippets,
        failed = stats.failed,
        "Import complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claude_x_core::PatternScanner;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_lines(path: &Path, lines: &[&str]) {
        let mut f = File::create(path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
    }

    #[test]
    fn test_extract_code_blocks() {
        let text = "Here:\n```rust\nfn main() {}\nlet x = 1;\n```\nand\n```\nplain\n```";
        let blocks = extract_code_blocks(text, &PatternScanner);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "rust");
        assert_eq!(blocks[0].line_count, 2);
        assert_eq!(blocks[1].language, "text");
        assert!(!blocks[0].has_sensitive);
    }

    #[test]
    fn test_extract_flags_sensitive() {
        let text = "```python\napi_key = \"abcd1234efgh\"\n```";
        let blocks = extract_code_blocks(text, &PatternScanner);
        assert!(blocks[0].has_sensitive);
    }

    #[test]
    fn test_parse_session_skips_noise() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("abc.jsonl");
        write_lines(
            &path,
            &[
                r#"{"type":"summary","summary":"x"}"#,
                "",
                "not json",
                r#"{"type":"user","isMeta":true,"message":{"content":"meta"},"sessionId":"s-1","cwd":"/work/front","gitBranch":"feature/login","timestamp":"2026-01-05T10:00:00Z"}"#,
                r#"{"type":"user","message":{"role":"user","content":"Fix the login bug"},"timestamp":"2026-01-05T10:00:01Z"}"#,
                r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Done:\n```ts\nconst a = 1;\n```"},{"type":"tool_use","name":"Edit"}]}}"#,
                r#"{"type":"user","message":{"content":[{"type":"tool_result","content":"ok"}]}}"#,
            ],
        );

        let session = parse_session_file(&path, &PatternScanner).unwrap();
        assert_eq!(session.session_id, "s-1");
        assert_eq!(session.project_name(), Some("front"));
        assert_eq!(session.git_branch.as_deref(), Some("feature/login"));
        assert_eq!(session.created_at.as_deref(), Some("2026-01-05T10:00:00Z"));
        assert_eq!(session.first_prompt, "Fix the login bug");
        assert_eq!(session.messages.len(), 2, "meta and tool-result entries skipped");
        assert_eq!(session.messages[1].snippets.len(), 1);
        assert_eq!(session.messages[1].snippets[0].language, "ts");
    }

    #[test]
    fn test_parse_session_id_falls_back_to_stem() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fallback-id.jsonl");
        write_lines(&path, &[r#"{"type":"user","message":{"content":"hello"}}"#]);
        let session = parse_session_file(&path, &PatternScanner).unwrap();
        assert_eq!(session.session_id, "fallback-id");
    }

    #[test]
    fn test_parse_drops_invalid_timestamps() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ts.jsonl");
        write_lines(
            &path,
            &[
                r#"{"type":"user","message":{"content":"first"},"timestamp":"yesterday"}"#,
                r#"{"type":"assistant","message":{"content":"ok"},"timestamp":"2026-01-05T10:00:05+09:00"}"#,
            ],
        );
        let session = parse_session_file(&path, &PatternScanner).unwrap();
        assert_eq!(session.messages[0].timestamp, None);
        assert_eq!(
            session.created_at.as_deref(),
            Some("2026-01-05T10:00:05+09:00"),
            "first valid timestamp becomes the session start"
        );
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_session_file(Path::new("/nonexistent/x.jsonl"), &PatternScanner).unwrap_err();
        assert!(matches!(err, ImportError::NotFound { .. }));
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(decode_project_dir("-Users-me-front"), "/Users/me/front");
        assert_eq!(last_segment("/Users/me/front/"), Some("front"));
        assert_eq!(last_segment(""), None);
    }
}
