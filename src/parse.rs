//! Decoding and normalization of commit history documents.
//!
//! The input is a JSON array of loosely typed commit records. Everything
//! untyped stays in this module: [`normalize`] turns a [`RawCommit`] into a
//! [`Commit`] and never fails, coercing malformed fields to zero or empty.

use crate::error::{ChurnlogError, Result};
use crate::model::{ChangeSet, Commit, FileChange, Person};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Commit messages starting with this prefix mark a merge.
pub const MERGE_PREFIX: &str = "Merge";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCommit {
    pub author: Value,
    pub committer: Value,
    pub commit: Value,
    pub parents: Value,
    pub tree: Value,
    pub message: Value,
    pub changes: Value,
}

/// Decodes a history document. Only a malformed container is an error.
pub fn decode_commits(bytes: &[u8]) -> serde_json::Result<Vec<RawCommit>> {
    serde_json::from_slice(bytes)
}

/// Reads the whole input; `-` means stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let read_err = |source: std::io::Error| ChurnlogError::Read {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        std::fs::read(path).map_err(read_err)
    }
}

/// Reads and decodes every record of `path`, in input order.
pub fn read_records(path: &Path) -> Result<Vec<RawCommit>> {
    let bytes = read_input(path)?;
    decode_commits(&bytes).map_err(|source| ChurnlogError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn normalize(raw: RawCommit) -> Commit {
    let message = as_string(&raw.message);
    let is_merge = is_merge_message(&message);
    let changes = match raw.changes {
        Value::Array(entries) => entries.iter().map(file_change).collect(),
        _ => Vec::new(),
    };

    Commit {
        hash: as_string(&raw.commit),
        parent_hashes: as_strings(&raw.parents),
        tree: as_string(&raw.tree),
        author: person(&raw.author),
        committer: person(&raw.committer),
        change_set: ChangeSet::new(changes, is_merge),
        message,
    }
}

pub fn is_merge_message(message: &str) -> bool {
    message.starts_with(MERGE_PREFIX)
}

/// Sorts ascending by author timestamp; equal timestamps keep input order.
pub fn sort_by_author_time(commits: &mut [Commit]) {
    commits.sort_by_key(|c| c.author.timestamp);
}

// A missing key or a non-object person coerces to empty fields.
fn person(raw: &Value) -> Person {
    let field = |key: &str| raw.get(key).unwrap_or(&Value::Null);
    Person {
        name: as_string(field("name")),
        email: as_string(field("email")),
        timezone: as_string(field("timezone")),
        timestamp: timestamp(field("date")),
    }
}

fn timestamp(date: &Value) -> DateTime<Utc> {
    let secs = date
        .as_i64()
        .or_else(|| date.as_f64().map(|f| f as i64))
        .unwrap_or(0);
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

// [lines_added, lines_removed, filename]; a non-array entry has no positions.
fn file_change(entry: &Value) -> FileChange {
    let slot = |i: usize| entry.as_array().and_then(|a| a.get(i));
    FileChange {
        lines_added: slot(0).map(line_count).unwrap_or(0),
        lines_removed: slot(1).map(line_count).unwrap_or(0),
        filename: slot(2).map(as_string).unwrap_or_default(),
    }
}

fn line_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
        .unwrap_or(0)
}

fn as_string(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn as_strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn normalize_json(json: &str) -> Commit {
        let raw: RawCommit = serde_json::from_str(json).unwrap();
        normalize(raw)
    }

    #[test]
    fn normalizes_a_complete_record() {
        let commit = normalize_json(
            r#"{
                "author": {"date": 1700000000, "email": "jane@x", "name": "Jane Doe", "timezone": "+0100"},
                "committer": {"date": 1700000100, "email": "bot@x", "name": "Bot", "timezone": "+0000"},
                "commit": "abc123",
                "parents": ["p1", "p2"],
                "tree": "t1",
                "message": "Add parser",
                "changes": [[10, 2, "a.go"], [1, 1, "b/c.rs"]]
            }"#,
        );

        assert_eq!(commit.hash, "abc123");
        assert_eq!(commit.parent_hashes, vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(commit.tree, "t1");
        assert_eq!(commit.author.name, "Jane Doe");
        assert_eq!(commit.author.timezone, "+0100");
        assert_eq!(
            commit.author.timestamp,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
        assert_eq!(
            commit.committer.timestamp,
            Utc.timestamp_opt(1_700_000_100, 0).unwrap()
        );
        assert_eq!(commit.change_set.num_files_changed, 2);
        assert_eq!(commit.change_set.lines_added, 11);
        assert_eq!(commit.change_set.lines_removed, 3);
        assert!(!commit.change_set.is_merge);
    }

    #[test]
    fn malformed_line_count_coerces_to_zero() {
        let commit = normalize_json(r#"{"changes": [[5, "bad", "x.go"]]}"#);
        assert_eq!(
            commit.change_set.changes,
            vec![FileChange {
                filename: "x.go".into(),
                lines_added: 5,
                lines_removed: 0,
            }]
        );
    }

    #[test]
    fn missing_and_mistyped_positions_coerce() {
        let commit = normalize_json(r#"{"changes": [[], [3], [-4, 2.9, 7], "nonsense"]}"#);
        let changes = &commit.change_set.changes;

        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0], FileChange::default());
        assert_eq!(changes[1].lines_added, 3);
        assert_eq!(changes[1].filename, "");
        assert_eq!(changes[2].lines_added, 0);
        assert_eq!(changes[2].lines_removed, 2);
        assert_eq!(changes[2].filename, "");
        assert_eq!(changes[3], FileChange::default());
        assert_eq!(commit.change_set.lines_added, 3);
        assert_eq!(commit.change_set.lines_removed, 2);
    }

    #[test]
    fn absent_fields_become_defaults() {
        let commit = normalize_json("{}");
        assert_eq!(commit.hash, "");
        assert!(commit.parent_hashes.is_empty());
        assert_eq!(commit.author.timestamp, Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(normalize_json(r#"{"author": null}"#).author.name, "");
        assert_eq!(commit.change_set, ChangeSet::default());
    }

    #[test]
    fn non_object_person_becomes_empty() {
        let raw = decode_commits(br#"[{"author": "Jane Doe", "committer": 7, "commit": "c1"}]"#)
            .unwrap();
        let commit = normalize(raw.into_iter().next().unwrap());

        assert_eq!(commit.hash, "c1");
        assert_eq!(commit.author.name, "");
        assert_eq!(commit.author.email, "");
        assert_eq!(commit.author.timestamp, Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(commit.committer.name, "");
    }

    #[test]
    fn date_coercion_covers_float_string_and_out_of_range() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let author_time = |json: &str| normalize_json(json).author.timestamp;

        assert_eq!(
            author_time(r#"{"author": {"date": 1.7e9}}"#),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
        assert_eq!(author_time(r#"{"author": {"date": "x"}}"#), epoch);
        assert_eq!(author_time(r#"{"author": {"date": 9e18}}"#), epoch);
        assert_eq!(author_time(r#"{"author": {"date": -1e300}}"#), epoch);
    }

    #[test]
    fn line_totals_saturate_instead_of_overflowing() {
        let commit =
            normalize_json(r#"{"changes": [[18446744073709551615, 0, "a.go"], [1, 0, "b.go"]]}"#);
        assert_eq!(commit.change_set.changes[0].lines_added, u64::MAX);
        assert_eq!(commit.change_set.lines_added, u64::MAX);
        assert_eq!(commit.change_set.num_files_changed, 2);
    }

    #[test]
    fn merge_is_detected_by_message_prefix() {
        let commit = normalize_json(r#"{"message": "Merge branch 'foo'", "parents": ["a"]}"#);
        assert!(commit.change_set.is_merge);

        assert!(is_merge_message("Merge pull request #12 from x/y"));
        assert!(!is_merge_message("merge branch 'foo'"));
        assert!(!is_merge_message("Fix Merge logic"));
    }

    #[test]
    fn sort_orders_by_author_timestamp() {
        let mut commits = vec![
            normalize_json(r#"{"commit": "b", "author": {"date": 200}}"#),
            normalize_json(r#"{"commit": "a", "author": {"date": 100}}"#),
            normalize_json(r#"{"commit": "c", "author": {"date": 200}}"#),
        ];
        sort_by_author_time(&mut commits);
        let order: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn truncated_document_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"commit": "abc""#).unwrap();

        let err = read_records(file.path()).unwrap_err();
        assert!(matches!(err, ChurnlogError::Decode { .. }));
    }

    #[test]
    fn non_object_record_is_a_decode_error() {
        assert!(decode_commits(b"[1, 2]").is_err());
        assert!(decode_commits(br#"{"commit": "a"}"#).is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ChurnlogError::Read { .. }));
    }

    #[test]
    fn empty_document_yields_no_commits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        assert!(read_records(file.path()).unwrap().is_empty());
    }
}
