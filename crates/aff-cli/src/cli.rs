//! CLI argument definitions for the deep-link converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aff-links",
    version,
    about = "Convert retired American FactFinder deep links to data.census.gov links",
    long_about = "Convert retired American FactFinder deep links to data.census.gov links.\n\n\
                  URLs are read from the command line, or one per line from stdin.\n\
                  Converted URLs go to stdout; diagnostics go to stderr.\n\n\
                  Exit codes: 0 all converted, 1 at least one link is malformed or\n\
                  its data is unavailable, 2 at least one link has no rule yet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert legacy links.
    Convert(ConvertArgs),

    /// List every legacy program code and how much of it converts.
    Programs,

    /// Build a lookup document from upstream facet and state files.
    BuildData(BuildDataArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Legacy URLs to convert (reads stdin when none are given).
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Lookup document to use instead of the built-in one.
    #[arg(long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Treat low-confidence conversions as failures.
    ///
    /// Links rebuilt from legacy compound table names are printed with a
    /// warning by default. In strict mode nothing is printed for them and
    /// the exit code reports a soft failure.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format for converted links.
    #[arg(long = "output", value_enum, default_value = "url")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct BuildDataArgs {
    /// JSON facet tree holding population group codes.
    #[arg(long = "facets", value_name = "FILE")]
    pub facets: PathBuf,

    /// Pipe-delimited state reference table (STATE|STATE_NAME columns).
    #[arg(long = "states", value_name = "FILE")]
    pub states: PathBuf,

    /// Where to write the document (default: stdout).
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// CLI output format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// One converted URL per line.
    Url,
    /// One JSON record per input line.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
