use super::{output_json, output_ndjson, output_table, partition_with_progress};
use crate::cli::CommonArgs;
use crate::fetch::{fetch_commits, progress_bar};
use anyhow::Context;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, windows: u32, limit: usize) -> anyhow::Result<()> {
    let commits = fetch_commits(&common).context("Failed to load commits")?;

    let pb = progress_bar(0, common.progress);
    pb.set_message("Partitioning timeline...");
    let intervals = partition_with_progress(&commits, windows, limit, &pb);
    pb.finish_and_clear();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        output_json(&mut out, &intervals, &common, windows, limit)?;
    } else if ndjson {
        output_ndjson(&mut out, &intervals)?;
    } else {
        output_table(&mut out, &intervals)?;
    }

    Ok(())
}
