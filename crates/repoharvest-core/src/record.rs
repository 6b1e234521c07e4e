// SPDX-License-Identifier: Apache-2.0

//! Projection of raw repository objects into flat CSV records.
//!
//! The GitHub REST API returns repository objects as JSON with a large,
//! partially optional field set. [`RepoRecord`] maps the recognized fields
//! into a flat struct: every field is either present-with-value or
//! explicitly absent, so downstream code never probes for attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HarvestError;

/// A single public repository, projected into the store's column set.
///
/// Field order matches [`RepoRecord::COLUMNS`] and therefore the CSV column
/// order; serde derives rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Numeric repository id, monotonically assigned by GitHub.
    ///
    /// Unique across all repositories and used as the resume cursor.
    pub id: u64,
    /// Repository name.
    pub name: Option<String>,
    /// `owner/name` form.
    pub full_name: Option<String>,
    /// Owner login.
    pub owner: Option<String>,
    /// Whether the repository is private.
    pub private: Option<bool>,
    /// Visibility string as reported by the API.
    pub visibility: Option<String>,
    /// Whether the repository is a fork.
    pub fork: Option<bool>,
    /// Short description.
    pub description: Option<String>,
    /// Primary programming language.
    pub language: Option<String>,
    /// Default branch name.
    pub default_branch: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Web URL.
    pub html_url: Option<String>,
    /// API URL.
    pub url: Option<String>,
    /// HTTPS clone URL.
    pub clone_url: Option<String>,
    /// SSH clone URL.
    pub ssh_url: Option<String>,
    /// Git protocol URL.
    pub git_url: Option<String>,
    /// Whether the repository is archived.
    pub archived: Option<bool>,
    /// Size in kilobytes.
    pub size: Option<u64>,
    /// Star count.
    pub stargazers_count: Option<u64>,
    /// Watcher count.
    pub watchers_count: Option<u64>,
    /// Fork count.
    pub forks_count: Option<u64>,
    /// Open issue count.
    pub open_issues_count: Option<u64>,
    /// Creation timestamp (ISO 8601, as returned by the API).
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
    /// Last push timestamp (ISO 8601).
    pub pushed_at: Option<String>,
}

/// Extracts a string field, treating JSON `null` as absent.
fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)?.as_str().map(ToString::to_string)
}

/// Extracts a boolean field, treating JSON `null` as absent.
fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key)?.as_bool()
}

/// Extracts an unsigned integer field, treating JSON `null` as absent.
fn u64_field(raw: &Value, key: &str) -> Option<u64> {
    raw.get(key)?.as_u64()
}

impl RepoRecord {
    /// CSV column names, in on-disk order.
    pub const COLUMNS: [&'static str; 25] = [
        "id",
        "name",
        "full_name",
        "owner",
        "private",
        "visibility",
        "fork",
        "description",
        "language",
        "default_branch",
        "homepage",
        "html_url",
        "url",
        "clone_url",
        "ssh_url",
        "git_url",
        "archived",
        "size",
        "stargazers_count",
        "watchers_count",
        "forks_count",
        "open_issues_count",
        "created_at",
        "updated_at",
        "pushed_at",
    ];

    /// Projects a raw repository object into a flat record.
    ///
    /// Every recognized field is mapped explicitly; unrecognized fields are
    /// ignored. The `id` is required and must be an integer (a JSON number,
    /// or a string of digits).
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::MalformedId`] when the `id` field is missing
    /// or does not parse as an integer. Callers skip such records.
    pub fn project(raw: &Value) -> Result<Self, HarvestError> {
        let id_value = raw.get("id").cloned().unwrap_or(Value::Null);
        let id = match &id_value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
        .ok_or_else(|| HarvestError::MalformedId {
            raw: id_value.to_string(),
        })?;

        Ok(Self {
            id,
            name: string_field(raw, "name"),
            full_name: string_field(raw, "full_name"),
            owner: raw
                .get("owner")
                .and_then(|o| o.get("login"))
                .and_then(Value::as_str)
                .map(ToString::to_string),
            private: bool_field(raw, "private"),
            visibility: string_field(raw, "visibility"),
            fork: bool_field(raw, "fork"),
            description: string_field(raw, "description"),
            language: string_field(raw, "language"),
            default_branch: string_field(raw, "default_branch"),
            homepage: string_field(raw, "homepage"),
            html_url: string_field(raw, "html_url"),
            url: string_field(raw, "url"),
            clone_url: string_field(raw, "clone_url"),
            ssh_url: string_field(raw, "ssh_url"),
            git_url: string_field(raw, "git_url"),
            archived: bool_field(raw, "archived"),
            size: u64_field(raw, "size"),
            stargazers_count: u64_field(raw, "stargazers_count"),
            watchers_count: u64_field(raw, "watchers_count"),
            forks_count: u64_field(raw, "forks_count"),
            open_issues_count: u64_field(raw, "open_issues_count"),
            created_at: string_field(raw, "created_at"),
            updated_at: string_field(raw, "updated_at"),
            pushed_at: string_field(raw, "pushed_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_repo() -> Value {
        json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": { "login": "octocat", "id": 1 },
            "private": false,
            "visibility": "public",
            "fork": false,
            "description": "My first repository",
            "language": "C",
            "default_branch": "master",
            "homepage": null,
            "html_url": "https://github.com/octocat/Hello-World",
            "url": "https://api.github.com/repos/octocat/Hello-World",
            "clone_url": "https://github.com/octocat/Hello-World.git",
            "ssh_url": "git@github.com:octocat/Hello-World.git",
            "git_url": "git://github.com/octocat/Hello-World.git",
            "archived": false,
            "size": 108,
            "stargazers_count": 80,
            "watchers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z",
            "pushed_at": "2011-01-26T19:06:43Z"
        })
    }

    #[test]
    fn test_project_full_object() {
        let record = RepoRecord::project(&sample_repo()).unwrap();
        assert_eq!(record.id, 1_296_269);
        assert_eq!(record.name.as_deref(), Some("Hello-World"));
        assert_eq!(record.owner.as_deref(), Some("octocat"));
        assert_eq!(record.language.as_deref(), Some("C"));
        assert_eq!(record.private, Some(false));
        assert_eq!(record.fork, Some(false));
        assert_eq!(record.stargazers_count, Some(80));
        assert_eq!(record.homepage, None);
        assert_eq!(record.created_at.as_deref(), Some("2011-01-26T19:01:12Z"));
    }

    #[test]
    fn test_project_string_id() {
        let record = RepoRecord::project(&json!({"id": "42", "name": "x"})).unwrap();
        assert_eq!(record.id, 42);
    }

    #[test]
    fn test_project_missing_optional_fields_are_absent() {
        let record = RepoRecord::project(&json!({"id": 7})).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, None);
        assert_eq!(record.owner, None);
        assert_eq!(record.language, None);
        assert_eq!(record.private, None);
    }

    #[test]
    fn test_project_non_integer_id_rejected() {
        let err = RepoRecord::project(&json!({"id": "not-a-number"})).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedId { .. }));
    }

    #[test]
    fn test_project_missing_id_rejected() {
        let err = RepoRecord::project(&json!({"name": "orphan"})).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedId { .. }));
    }

    #[test]
    fn test_project_float_id_rejected() {
        let err = RepoRecord::project(&json!({"id": 1.5})).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedId { .. }));
    }

    #[test]
    fn test_columns_match_serde_field_count() {
        let record = RepoRecord::project(&sample_repo()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), RepoRecord::COLUMNS.len());
        for column in RepoRecord::COLUMNS {
            assert!(map.contains_key(column), "missing column {column}");
        }
    }
}
