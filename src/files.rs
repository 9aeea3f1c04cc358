use crate::aggregate::summarize_files;
use crate::cli::CommonArgs;
use crate::fetch::fetch_commits;
use crate::model::{FileRow, FilesOutput};
use crate::report::file_rows;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::io::Write;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, csv: bool, path: Option<String>) -> anyhow::Result<()> {
    let commits = fetch_commits(&common).context("Failed to load commits")?;
    let rows = rows_matching(file_rows(summarize_files(&commits)), path.as_deref());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        output_json(&mut out, &rows, &common, path.as_deref())?;
    } else if ndjson {
        output_ndjson(&mut out, &rows)?;
    } else if csv {
        output_csv(&mut out, &rows)?;
    } else {
        output_table(&mut out, &rows)?;
    }

    Ok(())
}

fn rows_matching(rows: Vec<FileRow>, path_prefix: Option<&str>) -> Vec<FileRow> {
    match path_prefix {
        Some(prefix) => rows.into_iter().filter(|r| r.filename.starts_with(prefix)).collect(),
        None => rows,
    }
}

fn output_json(
    out: &mut impl Write,
    rows: &[FileRow],
    common: &CommonArgs,
    path_prefix: Option<&str>,
) -> anyhow::Result<()> {
    let output = FilesOutput {
        version: crate::model::SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        path_prefix: path_prefix.unwrap_or("").to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: rows.to_vec(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn output_ndjson(out: &mut impl Write, rows: &[FileRow]) -> anyhow::Result<()> {
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    Ok(())
}

fn output_csv(out: &mut impl Write, rows: &[FileRow]) -> anyhow::Result<()> {
    writeln!(out, "filename;#extension;#commits;#additions;#removals;#committers")?;
    for r in rows {
        writeln!(
            out,
            "{};{};{};{};{};{}",
            r.filename,
            r.extension,
            r.commit_count,
            r.lines_added_total,
            r.lines_removed_total,
            r.distinct_committer_count
        )?;
    }
    Ok(())
}

fn output_table(out: &mut impl Write, rows: &[FileRow]) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<50} {:>6} {:>8} {:>8} {:>8} {:>10}",
        style("Path").bold(),
        style("Ext").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Removed").bold(),
        style("Committers").bold()
    )?;
    writeln!(out, "{}", "─".repeat(95))?;
    for r in rows.iter().take(50) {
        writeln!(
            out,
            "{:<50} {:>6} {:>8} {:>8} {:>8} {:>10}",
            r.filename,
            r.extension,
            r.commit_count,
            r.lines_added_total,
            r.lines_removed_total,
            r.distinct_committer_count
        )?;
    }
    if rows.len() > 50 {
        writeln!(out, "\n... and {} more entries", rows.len() - 50)?;
    }
    Ok(())
}
