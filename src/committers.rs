use crate::aggregate::summarize_committers;
use crate::cli::CommonArgs;
use crate::fetch::fetch_commits;
use crate::model::{CommitterRow, CommittersOutput};
use crate::report::committer_rows;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::io::Write;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, csv: bool) -> anyhow::Result<()> {
    let commits = fetch_commits(&common).context("Failed to load commits")?;
    let rows = committer_rows(summarize_committers(&commits));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        output_json(&mut out, &rows, &common)?;
    } else if ndjson {
        output_ndjson(&mut out, &rows)?;
    } else if csv {
        output_csv(&mut out, &rows)?;
    } else {
        output_table(&mut out, &rows)?;
    }

    Ok(())
}

fn output_json(out: &mut impl Write, rows: &[CommitterRow], common: &CommonArgs) -> anyhow::Result<()> {
    let output = CommittersOutput {
        version: crate::model::SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: rows.to_vec(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn output_ndjson(out: &mut impl Write, rows: &[CommitterRow]) -> anyhow::Result<()> {
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    Ok(())
}

fn output_csv(out: &mut impl Write, rows: &[CommitterRow]) -> anyhow::Result<()> {
    writeln!(out, "committer-name;#commits;#additions;#removals;#files")?;
    for r in rows {
        writeln!(
            out,
            "{};{};{};{};{}",
            r.committer_key, r.commit_count, r.lines_added_total, r.lines_removed_total, r.files_changed_total
        )?;
    }
    Ok(())
}

fn output_table(out: &mut impl Write, rows: &[CommitterRow]) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<30} {:>8} {:>10} {:>10} {:>8} {:>10}",
        style("Committer").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Removed").bold(),
        style("Files").bold(),
        style("Churn").bold()
    )?;
    writeln!(out, "{}", "─".repeat(82))?;
    for r in rows {
        writeln!(
            out,
            "{:<30} {:>8} {:>10} {:>10} {:>8} {:>10}",
            r.committer_key,
            style(r.commit_count).cyan(),
            style(r.lines_added_total).green(),
            style(r.lines_removed_total).red(),
            r.files_changed_total,
            r.churn
        )?;
    }
    Ok(())
}
