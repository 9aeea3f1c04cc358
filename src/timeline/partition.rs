//! Splits the commit timeline into equal-duration windows.
//!
//! For `window_count` slices between the oldest and newest author timestamp,
//! only the first `window_count - 1` windows are produced, so commits in the
//! final slice are not reported. A commit belongs to a window only when its
//! timestamp is strictly inside it; one landing exactly on a boundary is in
//! no window.

use super::rank::top_files;
use crate::aggregate::summarize_files;
use crate::model::{Commit, Interval};
use chrono::{DateTime, TimeDelta, Utc};
use indicatif::ProgressBar;

pub const NUM_TIME_SLICES: u32 = 100;

/// `commits` must be sorted ascending by author timestamp.
pub fn partition(commits: &[Commit], window_count: u32, limit: usize) -> Vec<Interval> {
    partition_with_progress(commits, window_count, limit, &ProgressBar::hidden())
}

pub fn partition_with_progress(
    commits: &[Commit],
    window_count: u32,
    limit: usize,
    pb: &ProgressBar,
) -> Vec<Interval> {
    let (Some(first), Some(last)) = (commits.first(), commits.last()) else {
        return Vec::new();
    };
    if window_count == 0 {
        return Vec::new();
    }

    let oldest = first.author.timestamp;
    let newest = last.author.timestamp;
    let duration = window_duration(oldest, newest, window_count);

    let windows = window_count - 1;
    pb.set_length(u64::from(windows));

    let mut intervals = Vec::with_capacity(windows as usize);
    for i in 0..windows {
        let start = oldest + offset(duration, i);
        let end = oldest + offset(duration, i + 1);
        let subset = commits_between(commits, start, end);
        tracing::debug!(
            "found {} commits from {} to {}",
            subset.len(),
            start,
            end
        );

        intervals.push(Interval {
            start,
            end,
            top_files: top_files(summarize_files(subset), limit),
        });
        pb.inc(1);
    }

    intervals
}

/// Commits strictly after `lower` and strictly before `upper`.
pub fn commits_between(
    commits: &[Commit],
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
) -> Vec<&Commit> {
    commits
        .iter()
        .filter(|c| c.author.timestamp > lower && c.author.timestamp < upper)
        .collect()
}

fn window_duration(oldest: DateTime<Utc>, newest: DateTime<Utc>, window_count: u32) -> TimeDelta {
    let span = newest.signed_duration_since(oldest);
    let nanos = span.num_nanoseconds().unwrap_or(i64::MAX) / i64::from(window_count);
    TimeDelta::nanoseconds(nanos)
}

fn offset(duration: TimeDelta, windows: u32) -> TimeDelta {
    TimeDelta::nanoseconds(
        duration
            .num_nanoseconds()
            .unwrap_or(0)
            .saturating_mul(i64::from(windows)),
    )
}
