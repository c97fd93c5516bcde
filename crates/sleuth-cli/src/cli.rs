//! Command-line definitions for the `slth` binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub catalog: Option<PathBuf>,
}

/// Top-level CLI parser for the `slth` binary.
#[derive(Debug, Parser)]
#[command(name = "slth", version, about = "Sleuth - log investigation and root-cause analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Service catalog path (overrides configuration)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            catalog: self.catalog.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one investigation against a JSONL event snapshot
    Investigate(InvestigateArgs),

    /// Inspect the service dependency catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct InvestigateArgs {
    /// The question to investigate
    pub question: String,

    /// JSONL file of log events to investigate over
    #[arg(long)]
    pub events: PathBuf,

    /// Optional JSONL file of historical incidents
    #[arg(long)]
    pub memory: Option<PathBuf>,

    /// Relative lookback window, e.g. 30m, 24h, 7d
    #[arg(long)]
    pub window: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// List all cataloged services
    List,

    /// Show one service with its derived relationships
    Show {
        /// Service name (fuzzy-resolved)
        service: String,
    },

    /// Walk the dependency chain from a service
    Chain {
        /// Service name (fuzzy-resolved)
        service: String,

        /// Traversal direction
        #[arg(long, value_enum, default_value = "upstream")]
        direction: Direction,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Direction {
    Upstream,
    Downstream,
}
