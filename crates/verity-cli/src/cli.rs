//! CLI command definitions and argument parsing.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use verity_domain::ListFilter;

/// Verity CLI - Vote on whether news reports are fake.
#[derive(Debug, Parser)]
#[command(name = "verity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding session data
    #[arg(long, global = true, env = "VERITY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the seed JSON files
    #[arg(long, global = true, env = "VERITY_SEEDS")]
    pub seeds: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List news items
    List(ListArgs),

    /// Show one news item with its comments
    Show(ShowArgs),

    /// Vote on a news item
    Vote(VoteArgs),

    /// Inspect recorded storage errors
    Errors(ErrorsArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Show only items with this status
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page
    #[arg(short = 's', long)]
    pub page_size: Option<usize>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// News item ID
    pub id: String,

    /// Comments page (1-indexed)
    #[arg(short, long)]
    pub page: Option<usize>,
}

/// Arguments for the vote command.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("verdict").required(true).args(["fake", "genuine"])))]
pub struct VoteArgs {
    /// News item ID
    pub id: String,

    /// Vote that the item is fake
    #[arg(long)]
    pub fake: bool,

    /// Vote that the item is genuine
    #[arg(long)]
    pub genuine: bool,

    /// Comment to attach to the vote
    #[arg(short = 'm', long)]
    pub comment: Option<String>,

    /// Image link for the comment
    #[arg(short, long, requires = "comment")]
    pub image_url: Option<String>,
}

/// Arguments for the errors command.
#[derive(Debug, Parser)]
pub struct ErrorsArgs {
    /// Show at most this many recent entries
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Empty the error log
    #[arg(long)]
    pub clear: bool,
}

/// Filter argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FilterArg {
    /// Every news item
    All,
    /// Items currently judged fake
    Fake,
    /// Items currently judged genuine
    #[value(alias = "non-fake")]
    Nonfake,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<FilterArg> for ListFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => ListFilter::All,
            FilterArg::Fake => ListFilter::Fake,
            FilterArg::Nonfake => ListFilter::NonFake,
        }
    }
}
