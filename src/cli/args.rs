//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    init::InitArgs,
    list::ListArgs,
    lookup::LookupCommands,
    record::{AddArgs, DeleteArgs, ShowArgs, UpdateArgs},
    status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "phonedir")]
#[command(author, version, about = "Phone directory manager")]
#[command(long_about = "Keep a phone directory of people and their addresses in a local SQLite database, with surnames, names and patronymics stored once and shared between records.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file (default: discovered .phonedir/directory.db)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new phone directory workspace
    Init(InitArgs),

    /// List directory records, optionally searched and filtered
    List(ListArgs),

    /// Add a directory record
    Add(AddArgs),

    /// Replace every field of a directory record
    Update(UpdateArgs),

    /// Delete a directory record
    Delete(DeleteArgs),

    /// Show one directory record
    Show(ShowArgs),

    /// Manage the surnames lookup table
    #[command(subcommand)]
    Surnames(LookupCommands),

    /// Manage the names lookup table
    #[command(subcommand)]
    Names(LookupCommands),

    /// Manage the patronymics lookup table
    #[command(subcommand)]
    Patronymics(LookupCommands),

    /// Show database location and row counts
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for lists, yaml for show)
    #[default]
    Auto,
    /// Aligned tab-separated columns
    Tsv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just uids, one per line
    Id,
}
