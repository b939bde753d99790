//! Repository record normalization

use serde::Serialize;
use serde_json::Value;

/// Language recorded when the payload has no `language` key at all
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Default branch recorded when the payload has none
pub const DEFAULT_BRANCH: &str = "main";

/// Normalized view of one repository plus its access-control summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub full_name: String,
    /// `None` when the API reports an explicit `null`
    pub description: Option<String>,
    /// Size in KB
    pub size: u64,
    /// `None` when the API reports an explicit `null`
    pub language: Option<String>,
    pub default_branch: String,
    pub private: bool,
    pub fork: bool,
    pub archived: bool,
    pub disabled: bool,
    pub html_url: String,
    pub clone_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub pushed_at: String,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub teams: Vec<Value>,
    pub collaborators: Vec<Value>,
    pub team_count: usize,
    pub collaborator_count: usize,
}

/// Build a repository record from a raw listing payload.
///
/// Missing keys fall back to defaults; wrongly typed values are treated as
/// missing. Never fails.
pub fn format_repository_info(
    raw: &Value,
    teams: Vec<Value>,
    collaborators: Vec<Value>,
) -> RepositoryRecord {
    RepositoryRecord {
        name: text(raw, "name", ""),
        full_name: text(raw, "full_name", ""),
        description: nullable_text(raw, "description", ""),
        size: count(raw, "size"),
        language: nullable_text(raw, "language", UNKNOWN_LANGUAGE),
        default_branch: text(raw, "default_branch", DEFAULT_BRANCH),
        private: flag(raw, "private"),
        fork: flag(raw, "fork"),
        archived: flag(raw, "archived"),
        disabled: flag(raw, "disabled"),
        html_url: text(raw, "html_url", ""),
        clone_url: text(raw, "clone_url", ""),
        created_at: text(raw, "created_at", ""),
        updated_at: text(raw, "updated_at", ""),
        pushed_at: text(raw, "pushed_at", ""),
        stargazers_count: count(raw, "stargazers_count"),
        watchers_count: count(raw, "watchers_count"),
        forks_count: count(raw, "forks_count"),
        open_issues_count: count(raw, "open_issues_count"),
        team_count: teams.len(),
        collaborator_count: collaborators.len(),
        teams,
        collaborators,
    }
}

fn text(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Absent key → `Some(default)`; explicit `null` → `None`.
fn nullable_text(raw: &Value, key: &str, default: &str) -> Option<String> {
    match raw.get(key) {
        None => Some(default.to_string()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => None,
    }
}

fn count(raw: &Value, key: &str) -> u64 {
    raw.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn flag(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}
