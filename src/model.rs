use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: String,
    pub timezone: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    pub lines_added: u64,
    pub lines_removed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub is_merge: bool,
    pub num_files_changed: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub changes: Vec<FileChange>,
}

impl ChangeSet {
    /// Builds a change set whose totals are derived from `changes`.
    pub fn new(changes: Vec<FileChange>, is_merge: bool) -> Self {
        let lines_added = changes.iter().map(|c| c.lines_added).fold(0, u64::saturating_add);
        let lines_removed = changes.iter().map(|c| c.lines_removed).fold(0, u64::saturating_add);
        Self {
            is_merge,
            num_files_changed: changes.len() as u64,
            lines_added,
            lines_removed,
            changes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(rename = "commit")]
    pub hash: String,
    pub message: String,
    #[serde(rename = "parents")]
    pub parent_hashes: Vec<String>,
    pub tree: String,
    pub author: Person,
    pub committer: Person,
    pub change_set: ChangeSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitterSummary {
    pub commit_count: u64,
    pub lines_added_total: u64,
    pub lines_removed_total: u64,
    pub files_changed_total: u64,
}

impl CommitterSummary {
    pub fn add_commit(&mut self, change_set: &ChangeSet) {
        self.commit_count += 1;
        self.lines_added_total = self.lines_added_total.saturating_add(change_set.lines_added);
        self.lines_removed_total = self.lines_removed_total.saturating_add(change_set.lines_removed);
        self.files_changed_total = self.files_changed_total.saturating_add(change_set.num_files_changed);
    }

    pub fn churn(&self) -> u64 {
        self.lines_added_total.saturating_add(self.lines_removed_total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub filename: String,
    pub extension: String,
    pub commit_count: u64,
    pub lines_added_total: u64,
    pub lines_removed_total: u64,
    pub committers: HashMap<String, u64>,
}

impl FileSummary {
    pub fn new(filename: String, extension: String) -> Self {
        Self {
            filename,
            extension,
            commit_count: 0,
            lines_added_total: 0,
            lines_removed_total: 0,
            committers: HashMap::new(),
        }
    }

    /// Records one change entry, crediting the owning commit's totals.
    pub fn add_change(&mut self, change_set: &ChangeSet, committer: &str) {
        self.commit_count += 1;
        self.lines_added_total = self.lines_added_total.saturating_add(change_set.lines_added);
        self.lines_removed_total = self.lines_removed_total.saturating_add(change_set.lines_removed);
        *self.committers.entry(committer.to_string()).or_insert(0) += 1;
    }

    pub fn distinct_committers(&self) -> usize {
        self.committers.len()
    }

    pub fn churn(&self) -> u64 {
        self.lines_added_total.saturating_add(self.lines_removed_total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub top_files: Vec<FileSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitterRow {
    pub committer_key: String,
    pub commit_count: u64,
    pub lines_added_total: u64,
    pub lines_removed_total: u64,
    pub files_changed_total: u64,
    pub churn: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    pub filename: String,
    pub extension: String,
    pub commit_count: u64,
    pub lines_added_total: u64,
    pub lines_removed_total: u64,
    pub distinct_committer_count: u64,
    pub churn: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCommits {
    pub commit_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRow {
    pub start: String,
    pub end: String,
    pub top_files: BTreeMap<String, FileCommits>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittersOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<CommitterRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub path_prefix: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<FileRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub windows: u32,
    pub limit: usize,
    pub intervals: Vec<IntervalRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<Commit>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
