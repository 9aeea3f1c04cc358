use crate::aggregate::committer_key;
use crate::cli::CommonArgs;
use crate::fetch::fetch_commits;
use crate::model::{Commit, ExportOutput};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashSet;
use std::io::Write;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let commits = fetch_commits(&common).context("Failed to load commits")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        output_json(&mut out, &commits, &common)?;
    } else if ndjson {
        output_ndjson(&mut out, &commits)?;
    } else {
        output_summary(&mut out, &commits)?;
    }

    Ok(())
}

fn output_json(out: &mut impl Write, commits: &[Commit], common: &CommonArgs) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: crate::model::SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: commits.to_vec(),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn output_ndjson(out: &mut impl Write, commits: &[Commit]) -> anyhow::Result<()> {
    for commit in commits {
        writeln!(out, "{}", serde_json::to_string(commit)?)?;
    }
    Ok(())
}

fn output_summary(out: &mut impl Write, commits: &[Commit]) -> anyhow::Result<()> {
    use console::style;

    writeln!(out, "{}", style("Export Summary").bold())?;
    writeln!(out, "{}", "─".repeat(50))?;

    let total_commits = commits.len();
    let merges = commits.iter().filter(|c| c.change_set.is_merge).count();
    let total_files: u64 = commits
        .iter()
        .map(|c| c.change_set.num_files_changed)
        .fold(0, u64::saturating_add);
    let total_added: u64 = commits
        .iter()
        .map(|c| c.change_set.lines_added)
        .fold(0, u64::saturating_add);
    let total_removed: u64 = commits
        .iter()
        .map(|c| c.change_set.lines_removed)
        .fold(0, u64::saturating_add);
    let committers: HashSet<_> = commits
        .iter()
        .map(|c| committer_key(&c.author.name))
        .collect();

    writeln!(out, "Total commits: {}", style(total_commits).cyan())?;
    writeln!(out, "Merge commits: {}", style(merges).cyan())?;
    writeln!(out, "Total files changed: {}", style(total_files).cyan())?;
    writeln!(out, "Total lines added: {}", style(total_added).green())?;
    writeln!(out, "Total lines removed: {}", style(total_removed).red())?;
    writeln!(out, "Distinct committers: {}", style(committers.len()).yellow())?;

    if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
        writeln!(
            out,
            "Date range: {} to {}",
            style(first.author.timestamp.format("%Y-%m-%d")).dim(),
            style(last.author.timestamp.format("%Y-%m-%d")).dim()
        )?;
    }

    writeln!(out, "\nUse --json or --ndjson flags to export the normalized commits.")?;
    Ok(())
}
