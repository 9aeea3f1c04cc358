use crate::cli::CommonArgs;
use crate::model::{Interval, TimelineOutput, SCHEMA_VERSION};
use crate::report::interval_rows;
use crate::util::date_key;
use anyhow::Result;
use chrono::Utc;
use console::style;
use std::io::Write;

pub fn output_json(
    out: &mut impl Write,
    intervals: &[Interval],
    common: &CommonArgs,
    windows: u32,
    limit: usize,
) -> Result<()> {
    let output = TimelineOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        windows,
        limit,
        intervals: interval_rows(intervals),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn output_ndjson(out: &mut impl Write, intervals: &[Interval]) -> Result<()> {
    for row in interval_rows(intervals) {
        writeln!(out, "{}", serde_json::to_string(&row)?)?;
    }
    Ok(())
}

pub fn output_table(out: &mut impl Write, intervals: &[Interval]) -> Result<()> {
    if intervals.iter().all(|i| i.top_files.is_empty()) {
        writeln!(out, "No data to display")?;
        return Ok(());
    }

    let max_commits = intervals
        .iter()
        .flat_map(|i| i.top_files.first())
        .map(|f| f.commit_count)
        .max()
        .unwrap_or(1);

    writeln!(out, "{}", style("Top Files Over Time").bold())?;
    writeln!(out, "{}", "─".repeat(50))?;

    for interval in intervals.iter().filter(|i| !i.top_files.is_empty()) {
        writeln!(
            out,
            "{} .. {}",
            style(date_key(&interval.start)).bold(),
            style(date_key(&interval.end)).dim()
        )?;
        for file in &interval.top_files {
            let intensity = ((file.commit_count as f64 / max_commits as f64) * 5.0) as u32;
            let bar = match intensity {
                0 => "▁",
                1 => "▃",
                2 => "▅",
                3 => "▇",
                _ => "█",
            };
            writeln!(
                out,
                "  {} {:>4} {}",
                style(bar).green(),
                file.commit_count,
                file.filename
            )?;
        }
    }

    Ok(())
}
