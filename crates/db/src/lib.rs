// crates/db/src/lib.rs
//! SQLite session store for claude-x.
//!
//! [`SqliteStore`] owns the schema and the write path used by the importer,
//! and implements the core [`Store`](claude_x_core::Store) trait for the
//! aggregate reports.

pub mod import;
mod migrations;
mod queries;

use std::path::{Path, PathBuf};

use claude_x_core::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use import::{
    import_projects_dir, parse_session_file, ImportError, ImportStats, ImportedMessage,
    ImportedSession,
};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to determine data directory")]
    NoDataDir,

    #[error("Failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::backend(err.to_string())
    }
}

// ============================================================================
// Write-side records
// ============================================================================

/// Author of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_id: String,
    pub first_prompt: String,
    pub git_branch: Option<String>,
    /// RFC 3339 timestamp of the first entry.
    pub created_at: Option<String>,
    pub message_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRecord {
    pub language: String,
    pub code: String,
    pub line_count: u32,
    pub has_sensitive: bool,
}

// ============================================================================
// Store
// ============================================================================

/// Single-connection SQLite store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        let store = Self::with_connection(conn, path.to_path_buf())?;
        info!("Database opened at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, PathBuf::new())
    }

    /// Open the database at the default location under the data dir.
    pub fn open_default() -> DbResult<Self> {
        let path = claude_x_core::paths::db_path().ok_or(DbError::NoDataDir)?;
        Self::open(&path)
    }

    fn with_connection(conn: Connection, db_path: PathBuf) -> DbResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        for migration in migrations::MIGRATIONS {
            conn.execute_batch(migration)?;
        }
        Ok(Self { conn, db_path })
    }

    /// Path of the database file; empty for in-memory stores.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert the project if it is new and return its id.
    pub fn upsert_project(&self, name: &str, path: Option<&str>) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO projects (name, path) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET path = COALESCE(excluded.path, projects.path)",
            params![name, path],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM projects WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Insert a session, replacing any existing session with the same id
    /// together with its messages and snippets.
    pub fn insert_session(&self, project_id: i64, session: &SessionRecord) -> DbResult<()> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT session_id FROM sessions WHERE session_id = ?1",
                params![session.session_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            debug!(session_id = %session.session_id, "Replacing existing session");
            self.conn.execute(
                "DELETE FROM code_snippets WHERE session_id = ?1",
                params![session.session_id],
            )?;
            self.conn.execute(
                "DELETE FROM messages WHERE session_id = ?1",
                params![session.session_id],
            )?;
            self.conn.execute(
                "DELETE FROM sessions WHERE session_id = ?1",
                params![session.session_id],
            )?;
        }

        self.conn.execute(
            "INSERT INTO sessions (session_id, project_id, first_prompt, git_branch, created_at, message_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.session_id,
                project_id,
                session.first_prompt,
                session.git_branch,
                session.created_at,
                session.message_count,
            ],
        )?;
        Ok(())
    }

    /// Insert a message and return its row id.
    pub fn insert_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
        timestamp: Option<&str>,
    ) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO messages (session_id, type, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![session_id, role.as_str(), content, timestamp],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a code snippet attached to `message_id` and return its row id.
    pub fn insert_code_snippet(
        &self,
        session_id: &str,
        message_id: i64,
        snippet: &SnippetRecord,
    ) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO code_snippets (message_id, session_id, language, code, line_count, has_sensitive)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message_id,
                session_id,
                snippet.language,
                snippet.code,
                snippet.line_count,
                snippet.has_sensitive,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Store a parsed session with all its messages and snippets in one
    /// transaction. Returns `(messages, snippets)` inserted.
    pub fn insert_imported_session(
        &self,
        project_id: i64,
        session: &ImportedSession,
    ) -> DbResult<(u32, u32)> {
        let tx = self.conn.unchecked_transaction()?;

        let record = SessionRecord {
            session_id: session.session_id.clone(),
            first_prompt: session.first_prompt.clone(),
            git_branch: session.git_branch.clone(),
            created_at: session.created_at.clone(),
            message_count: u32::try_from(session.messages.len()).unwrap_or(u32::MAX),
        };
        self.insert_session(project_id, &record)?;

        let mut messages = 0u32;
        let mut snippets = 0u32;
        for message in &session.messages {
            let message_id = self.insert_message(
                &session.session_id,
                message.role,
                &message.content,
                message.timestamp.as_deref(),
            )?;
            messages += 1;
            for snippet in &message.snippets {
                self.insert_code_snippet(&session.session_id, message_id, snippet)?;
                snippets += 1;
            }
        }

        tx.commit()?;
        Ok((messages, snippets))
    }
}
