//! Shared fixtures for store integration tests.
#![allow(dead_code)]

use claude_x_db::{MessageRole, SessionRecord, SnippetRecord, SqliteStore};

/// One message with the snippets it produced.
pub struct Msg {
    pub role: MessageRole,
    pub content: &'static str,
    pub snippets: Vec<SnippetRecord>,
}

pub fn user(content: &'static str) -> Msg {
    Msg {
        role: MessageRole::User,
        content,
        snippets: Vec::new(),
    }
}

pub fn assistant(snippets: Vec<SnippetRecord>) -> Msg {
    Msg {
        role: MessageRole::Assistant,
        content: "Here you go.",
        snippets,
    }
}

pub fn snippet(language: &str, lines: u32) -> SnippetRecord {
    SnippetRecord {
        language: language.to_string(),
        code: vec!["x"; lines as usize].join("\n"),
        line_count: lines,
        has_sensitive: false,
    }
}

pub fn sensitive(language: &str, lines: u32) -> SnippetRecord {
    SnippetRecord {
        has_sensitive: true,
        ..snippet(language, lines)
    }
}

/// Insert a session with its messages and snippets.
pub fn seed_session(
    store: &SqliteStore,
    project: &str,
    session_id: &str,
    first_prompt: &str,
    branch: Option<&str>,
    created_at: Option<&str>,
    messages: Vec<Msg>,
) {
    let project_id = store.upsert_project(project, None).unwrap();
    store
        .insert_session(
            project_id,
            &SessionRecord {
                session_id: session_id.to_string(),
                first_prompt: first_prompt.to_string(),
                git_branch: branch.map(str::to_string),
                created_at: created_at.map(str::to_string),
                message_count: messages.len() as u32,
            },
        )
        .unwrap();
    for msg in messages {
        let message_id = store
            .insert_message(session_id, msg.role, msg.content, created_at)
            .unwrap();
        for s in &msg.snippets {
            store.insert_code_snippet(session_id, message_id, s).unwrap();
        }
    }
}

/// Timestamp `days_ago` days before now, RFC 3339 in UTC.
pub fn days_ago(days: i64) -> String {
    (chrono::Utc::now() - chrono::Duration::days(days))
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
