//! Keyed summaries folded over a commit sequence.
//!
//! Both folds are pure: they take any iterator of commits and return a fresh
//! map, so callers compose them over the full history or over a time slice.

use crate::model::{Commit, CommitterSummary, FileSummary};
use std::collections::HashMap;

/// Lowercased first whitespace-delimited token of an author name.
///
/// "Jane Doe" and "jane other@x" both map to `jane`; distinct people sharing a
/// first name collide into one key.
pub fn committer_key(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Text after the last `.` of the path, or empty when there is none.
pub fn extension_of(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default()
}

pub fn summarize_committers<'a, I>(commits: I) -> HashMap<String, CommitterSummary>
where
    I: IntoIterator<Item = &'a Commit>,
{
    commits.into_iter().fold(HashMap::new(), |mut acc, commit| {
        acc.entry(committer_key(&commit.author.name))
            .or_insert_with(CommitterSummary::default)
            .add_commit(&commit.change_set);
        acc
    })
}

/// Per-file summaries. Every change entry counts as one commit for its file
/// and credits the whole commit's line totals, so a commit listing the same
/// path twice counts twice.
pub fn summarize_files<'a, I>(commits: I) -> HashMap<String, FileSummary>
where
    I: IntoIterator<Item = &'a Commit>,
{
    commits.into_iter().fold(HashMap::new(), |mut acc, commit| {
        let committer = committer_key(&commit.author.name);
        for change in &commit.change_set.changes {
            acc.entry(change.filename.clone())
                .or_insert_with(|| {
                    FileSummary::new(
                        change.filename.clone(),
                        extension_of(&change.filename).to_string(),
                    )
                })
                .add_change(&commit.change_set, &committer);
        }
        acc
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{ChangeSet, FileChange, Person};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    pub(crate) fn make_commit(author: &str, timestamp: i64, files: Vec<(&str, u64, u64)>) -> Commit {
        let person = Person {
            name: author.to_string(),
            email: format!("{}@example.com", committer_key(author)),
            timezone: "+0000".into(),
            timestamp: Utc.timestamp_opt(timestamp, 0).unwrap(),
        };
        let changes = files
            .into_iter()
            .map(|(filename, added, removed)| FileChange {
                filename: filename.to_string(),
                lines_added: added,
                lines_removed: removed,
            })
            .collect();
        Commit {
            hash: format!("hash_{timestamp}"),
            message: "test commit".into(),
            parent_hashes: vec![],
            tree: "tree".into(),
            author: person.clone(),
            committer: person,
            change_set: ChangeSet::new(changes, false),
        }
    }

    #[test]
    fn committer_key_uses_first_token() {
        assert_eq!(committer_key("Jane Doe"), "jane");
        assert_eq!(committer_key("jane other@x"), "jane");
        assert_eq!(committer_key("  Bob\tSmith"), "bob");
        assert_eq!(committer_key(""), "");
    }

    #[test]
    fn extension_is_text_after_last_dot() {
        assert_eq!(extension_of("src/main.rs"), "rs");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".gitignore"), "gitignore");
    }

    #[test]
    fn same_first_name_aggregates_into_one_committer() {
        let commits = vec![
            make_commit("Jane Doe", 100, vec![("a.go", 10, 2)]),
            make_commit("jane other@x", 200, vec![("a.go", 1, 1)]),
        ];
        let summary = summarize_committers(&commits);

        assert_eq!(summary.len(), 1);
        assert_eq!(
            summary["jane"],
            CommitterSummary {
                commit_count: 2,
                lines_added_total: 11,
                lines_removed_total: 3,
                files_changed_total: 2,
            }
        );
    }

    #[test]
    fn committer_commit_counts_sum_to_input_length() {
        let commits = vec![
            make_commit("Alice A", 1, vec![("a.rs", 1, 0)]),
            make_commit("Bob B", 2, vec![]),
            make_commit("alice", 3, vec![("b.rs", 2, 2), ("c.rs", 1, 1)]),
            make_commit("Carol", 4, vec![("a.rs", 5, 5)]),
        ];
        let summary = summarize_committers(&commits);
        let total: u64 = summary.values().map(|s| s.commit_count).sum();
        assert_eq!(total, commits.len() as u64);
        assert_eq!(summary["alice"].files_changed_total, 3);
    }

    #[test]
    fn file_summary_credits_commit_totals() {
        let commits = vec![make_commit("Jane Doe", 100, vec![("a.go", 10, 2), ("b.go", 1, 1)])];
        let files = summarize_files(&commits);

        assert_eq!(files.len(), 2);
        let a = &files["a.go"];
        assert_eq!(a.extension, "go");
        assert_eq!(a.commit_count, 1);
        assert_eq!(a.lines_added_total, 11);
        assert_eq!(a.lines_removed_total, 3);
    }

    #[test]
    fn repeated_path_in_one_commit_counts_twice() {
        let commits = vec![make_commit("Jane", 100, vec![("a.go", 1, 0), ("a.go", 2, 0)])];
        let files = summarize_files(&commits);
        assert_eq!(files["a.go"].commit_count, 2);
        assert_eq!(files["a.go"].lines_added_total, 6);
        assert_eq!(files["a.go"].committers["jane"], 2);
    }

    #[test]
    fn distinct_committers_never_exceed_commit_count() {
        let commits = vec![
            make_commit("Alice", 1, vec![("a.rs", 1, 0), ("b.rs", 1, 0)]),
            make_commit("Bob", 2, vec![("a.rs", 1, 0)]),
            make_commit("Alice", 3, vec![("a.rs", 1, 0)]),
        ];
        let files = summarize_files(&commits);
        for summary in files.values() {
            assert!(summary.distinct_committers() as u64 <= summary.commit_count);
        }
        assert_eq!(files["a.rs"].distinct_committers(), 2);
        assert_eq!(files["a.rs"].committers["alice"], 2);
    }

    #[test]
    fn empty_input_gives_empty_summaries() {
        let commits: Vec<Commit> = Vec::new();
        assert!(summarize_committers(&commits).is_empty());
        assert!(summarize_files(&commits).is_empty());
    }

    #[test]
    fn summaries_are_reproducible() {
        let commits = vec![
            make_commit("Alice", 1, vec![("a.rs", 3, 1)]),
            make_commit("Bob", 2, vec![("a.rs", 1, 4), ("b.rs", 2, 2)]),
        ];
        assert_eq!(summarize_committers(&commits), summarize_committers(&commits));
        assert_eq!(summarize_files(&commits), summarize_files(&commits));
    }
}
