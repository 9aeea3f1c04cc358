use crate::cli::CommonArgs;
use crate::model::{Commit, DateRange};
use crate::parse::{normalize, read_records, sort_by_author_time};
use crate::util::resolve_range;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

/// Loads the history named by `common`, applies its filters, and returns the
/// commits sorted by author timestamp.
pub fn fetch_commits(common: &CommonArgs) -> anyhow::Result<Vec<Commit>> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref(), Utc::now())
        .context("Failed to resolve date range")?;

    let raw = read_records(&common.input).context("Failed to load commit history")?;
    tracing::info!("decoded {} commit records from {}", raw.len(), common.input.display());

    let pb = progress_bar(raw.len() as u64, common.progress);
    let commits: Vec<Commit> = raw
        .into_iter()
        .map(|r| {
            pb.inc(1);
            normalize(r)
        })
        .collect();
    pb.finish_and_clear();

    let mut kept = filter_commits(commits, &range, common.skip_merges);
    sort_by_author_time(&mut kept);
    tracing::info!("kept {} commits after filtering", kept.len());
    Ok(kept)
}

pub fn filter_commits(commits: Vec<Commit>, range: &DateRange, skip_merges: bool) -> Vec<Commit> {
    commits
        .into_iter()
        .filter(|c| range.contains(&c.author.timestamp))
        .filter(|c| !(skip_merges && c.change_set.is_merge))
        .collect()
}

pub fn progress_bar(len: u64, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Normalizing commits...");
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::make_commit;
    use chrono::TimeZone;

    #[test]
    fn filters_by_range_and_merges() {
        let mut merge = make_commit("alice", 300, vec![("a.rs", 1, 0)]);
        merge.change_set.is_merge = true;
        let commits = vec![
            make_commit("alice", 100, vec![]),
            make_commit("bob", 200, vec![]),
            merge,
        ];
        let range = DateRange::new().with_since(Utc.timestamp_opt(150, 0).unwrap());

        let kept = filter_commits(commits.clone(), &range, false);
        assert_eq!(kept.len(), 2);

        let kept = filter_commits(commits, &range, true);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].hash, "hash_200");
    }
}
