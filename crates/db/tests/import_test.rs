//! Integration tests for importing Claude Code project directories.

use std::fs;
use std::path::Path;

use claude_x_core::{PatternScanner, SessionFilter, Store};
use claude_x_db::{import_projects_dir, ImportError, SqliteStore};
use tempfile::TempDir;

fn write_session(dir: &Path, project_dir: &str, id: &str, cwd: &str, prompt: &str) {
    let project = dir.join(project_dir);
    fs::create_dir_all(&project).unwrap();
    let lines = [
        format!(
            r#"{{"type":"user","sessionId":"{id}","cwd":"{cwd}","gitBranch":"main","timestamp":"2026-01-05T10:00:00Z","message":{{"role":"user","content":"{prompt}"}}}}"#
        ),
        r#"{"type":"assistant","timestamp":"2026-01-05T10:00:05Z","message":{"content":[{"type":"text","text":"```rust\nfn a() {}\nfn b() {}\n```"}]}}"#.to_string(),
        "{broken".to_string(),
    ];
    fs::write(project.join(format!("{id}.jsonl")), lines.join("\n")).unwrap();
}

fn projects_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_session(tmp.path(), "-work-front", "f1", "/work/front", "Fix the login bug");
    write_session(tmp.path(), "-work-front", "f2", "/work/front", "Add a logout button");
    write_session(tmp.path(), "-work-back", "b1", "/work/back", "Review the API");
    // ignored: wrong extension and wrong depth
    fs::write(tmp.path().join("-work-front/notes.txt"), "x").unwrap();
    fs::write(tmp.path().join("top.jsonl"), "{}").unwrap();
    tmp
}

#[test]
fn test_import_all_projects() {
    let tmp = projects_fixture();
    let store = SqliteStore::open_in_memory().unwrap();

    let stats = import_projects_dir(&store, tmp.path(), None, &PatternScanner).unwrap();
    assert_eq!(stats.sessions, 3);
    assert_eq!(stats.messages, 6);
    assert_eq!(stats.snippets, 3);
    assert_eq!(stats.failed, 0);

    assert_eq!(store.session_count(&SessionFilter::project("front")).unwrap(), 2);
    assert_eq!(store.session_count(&SessionFilter::project("back")).unwrap(), 1);

    let summaries = store.session_summaries(&SessionFilter::project("front")).unwrap();
    let f1 = summaries.iter().find(|s| s.session_id == "f1").unwrap();
    assert_eq!(f1.first_prompt, "Fix the login bug");
    assert_eq!(f1.git_branch.as_deref(), Some("main"));
    assert_eq!(f1.created_at.as_deref(), Some("2026-01-05T10:00:00Z"));
    assert_eq!(f1.metrics.total_lines, 2);
}

#[test]
fn test_import_with_project_filter() {
    let tmp = projects_fixture();
    let store = SqliteStore::open_in_memory().unwrap();

    let stats = import_projects_dir(&store, tmp.path(), Some("BACK"), &PatternScanner).unwrap();
    assert_eq!(stats.sessions, 1);
    assert_eq!(store.session_count(&SessionFilter::all()).unwrap(), 1);
}

#[test]
fn test_reimport_replaces_sessions() {
    let tmp = projects_fixture();
    let store = SqliteStore::open_in_memory().unwrap();

    import_projects_dir(&store, tmp.path(), None, &PatternScanner).unwrap();
    import_projects_dir(&store, tmp.path(), None, &PatternScanner).unwrap();

    assert_eq!(store.session_count(&SessionFilter::all()).unwrap(), 3);
    let report = store.sensitive_report(&SessionFilter::all()).unwrap();
    assert_eq!(report.statistics.total_snippets, 3, "snippets not duplicated");
}

#[test]
fn test_import_missing_dir() {
    let store = SqliteStore::open_in_memory().unwrap();
    let err = import_projects_dir(&store, Path::new("/nonexistent/projects"), None, &PatternScanner)
        .unwrap_err();
    assert!(matches!(err, ImportError::NotFound { .. }));
}
