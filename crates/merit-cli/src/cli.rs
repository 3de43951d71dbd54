use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "merit", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (defaults to the config file, then "info")
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Read configuration from this file instead of ~/.merit/config/merit.toml
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the production plan for one payload
    Dispatch {
        /// Request payload (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        payload: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write the plan to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Numeric tolerance in MW
        #[arg(long)]
        tolerance: Option<f64>,
        /// Maximum transition search depth
        #[arg(long)]
        max_depth: Option<usize>,
        /// Wall-clock budget in milliseconds (0 disables the limit)
        #[arg(long)]
        time_budget_ms: Option<u64>,
    },
    /// Check a payload against the request schema without dispatching
    Validate {
        /// Request payload (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        payload: PathBuf,
    },
    /// Plan many payloads in parallel
    Batch {
        /// Request payloads (JSON)
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        payloads: Vec<PathBuf>,
        /// Output directory for plans and the batch manifest
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        out: PathBuf,
        /// Worker threads (0 = one per CPU)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON array of `{name, load}` records
    Json,
    /// Aligned text table
    Table,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
