pub mod exec;
pub mod output;
pub mod partition;
pub mod rank;

pub use exec::exec;
pub use output::{output_json, output_ndjson, output_table};
pub use partition::{commits_between, partition, partition_with_progress, NUM_TIME_SLICES};
pub use rank::{top_files, RANK_THRESHOLD};
