/// Inline SQL schema for the claude-x session store.
///
/// Every statement is idempotent so the schema can be applied on each open.

pub const MIGRATIONS: &[&str] = &[
    // projects
    r#"
CREATE TABLE IF NOT EXISTS projects (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    path TEXT
);
"#,
    // sessions
    r#"
CREATE TABLE IF NOT EXISTS sessions (
    session_id    TEXT PRIMARY KEY,
    project_id    INTEGER NOT NULL REFERENCES projects(id),
    first_prompt  TEXT NOT NULL DEFAULT '',
    git_branch    TEXT,
    created_at    TEXT,
    message_count INTEGER NOT NULL DEFAULT 0
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_sessions_project ON sessions(project_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at);"#,
    // messages
    r#"
CREATE TABLE IF NOT EXISTS messages (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL REFERENCES sessions(session_id) ON DELETE CASCADE,
    type       TEXT NOT NULL,
    content    TEXT NOT NULL DEFAULT '',
    timestamp  TEXT
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_messages_session ON messages(session_id);"#,
    // code_snippets
    r#"
CREATE TABLE IF NOT EXISTS code_snippets (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    message_id    INTEGER NOT NULL REFERENCES messages(id) ON DELETE CASCADE,
    session_id    TEXT NOT NULL REFERENCES sessions(session_id) ON DELETE CASCADE,
    language      TEXT NOT NULL DEFAULT 'text',
    code          TEXT NOT NULL,
    line_count    INTEGER NOT NULL DEFAULT 0,
    has_sensitive INTEGER NOT NULL DEFAULT 0
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_snippets_message ON code_snippets(message_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_snippets_session ON code_snippets(session_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_snippets_language ON code_snippets(language);"#,
];
