use crate::model::{
    CommitterRow, CommitterSummary, FileCommits, FileRow, FileSummary, Interval, IntervalRow,
};
use crate::util::date_key;
use std::collections::HashMap;

/// Rows ordered by commit count descending, then committer key.
pub fn committer_rows(summaries: HashMap<String, CommitterSummary>) -> Vec<CommitterRow> {
    let mut rows: Vec<CommitterRow> = summaries
        .into_iter()
        .map(|(committer_key, s)| CommitterRow {
            churn: s.churn(),
            committer_key,
            commit_count: s.commit_count,
            lines_added_total: s.lines_added_total,
            lines_removed_total: s.lines_removed_total,
            files_changed_total: s.files_changed_total,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.committer_key.cmp(&b.committer_key))
    });
    rows
}

/// Rows ordered by commit count descending, then filename.
pub fn file_rows(summaries: HashMap<String, FileSummary>) -> Vec<FileRow> {
    let mut rows: Vec<FileRow> = summaries.into_values().map(file_row).collect();
    rows.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    rows
}

pub fn interval_rows(intervals: &[Interval]) -> Vec<IntervalRow> {
    intervals
        .iter()
        .map(|interval| IntervalRow {
            start: date_key(&interval.start),
            end: date_key(&interval.end),
            top_files: interval
                .top_files
                .iter()
                .map(|f| {
                    (
                        f.filename.clone(),
                        FileCommits {
                            commit_count: f.commit_count,
                        },
                    )
                })
                .collect(),
        })
        .collect()
}

fn file_row(s: FileSummary) -> FileRow {
    FileRow {
        churn: s.churn(),
        distinct_committer_count: s.distinct_committers() as u64,
        filename: s.filename,
        extension: s.extension,
        commit_count: s.commit_count,
        lines_added_total: s.lines_added_total,
        lines_removed_total: s.lines_removed_total,
    }
}
