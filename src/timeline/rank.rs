use crate::model::FileSummary;
use std::collections::HashMap;

/// Below this many candidates the limit is ignored and all files are kept.
pub const RANK_THRESHOLD: usize = 10;

/// Orders files by commit count descending, then filename ascending, and
/// keeps the first `limit` once there are at least [`RANK_THRESHOLD`].
pub fn top_files(files: HashMap<String, FileSummary>, limit: usize) -> Vec<FileSummary> {
    let mut ranked: Vec<FileSummary> = files.into_values().collect();
    ranked.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    if ranked.len() >= RANK_THRESHOLD {
        ranked.truncate(limit);
    }
    ranked
}
