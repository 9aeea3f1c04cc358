use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::template::DEFAULT_TEMPLATE;
use crate::timeline::NUM_TIME_SLICES;

#[derive(Parser)]
#[command(name = "churnlog")]
#[command(about = "Commit history analysis for committers, file churn, and top files over time")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(
        long,
        help = "JSON commit history (as produced by git2json), or - for stdin",
        default_value = "git_history.json"
    )]
    pub input: PathBuf,

    #[arg(long, help = "Drop merge commits", default_value_t = false)]
    pub skip_merges: bool,

    #[arg(long, help = "Start from this date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub since: Option<String>,

    #[arg(long, help = "End at this date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub until: Option<String>,

    #[arg(long, help = "Show progress while processing", default_value_t = false)]
    pub progress: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    Committers {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Output as ';'-separated CSV")]
        csv: bool,
    },
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Output as ';'-separated CSV")]
        csv: bool,

        #[arg(help = "Path prefix to analyze")]
        path: Option<String>,
    },
    Timeline {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Number of time slices", default_value_t = NUM_TIME_SLICES)]
        windows: u32,

        #[arg(long, help = "Top files kept per window", default_value_t = 20)]
        limit: usize,
    },
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Log {
        #[arg(long, help = "Line template, e.g. '{author.name} {hash}\\n'", default_value = DEFAULT_TEMPLATE)]
        template: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Committers { json, ndjson, csv } => {
                crate::committers::exec(self.common, json, ndjson, csv)
            }
            Commands::Files { json, ndjson, csv, path } => {
                crate::files::exec(self.common, json, ndjson, csv, path)
            }
            Commands::Timeline { json, ndjson, windows, limit } => {
                crate::timeline::exec(self.common, json, ndjson, windows, limit)
            }
            Commands::Export { json, ndjson } => crate::export::exec(self.common, json, ndjson),
            Commands::Log { template } => crate::log::exec(self.common, &template),
        }
    }
}
