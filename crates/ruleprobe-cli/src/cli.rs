//! CLI argument definitions for the ruleprobe tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ruleprobe",
    version,
    about = "Preview the invalid values used to probe validation rules",
    long_about = "Preview the candidate values that rule-based validation probing\n\
                  substitutes into a property, per source kind and declared type."
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
    /// Generate candidate values for a source kind and declared type.
    Values(ValuesArgs),

    /// List source kinds and the types each one supports.
    Kinds,

    /// Show validator options resolved from the environment.
    Options,
}

#[derive(Parser)]
pub struct ValuesArgs {
    /// Source kind, for example above-max, blank or size-below.
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Declared property type, for example i32, text, date or list.
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub type_name: String,

    /// Element type of a container; give two for map keys and values.
    #[arg(long = "element", short = 'e', value_name = "TYPE")]
    pub elements: Vec<String>,

    /// Treat the property as optional.
    #[arg(long = "optional")]
    pub optional: bool,

    /// Integer bound for above-max, below-min and size kinds.
    #[arg(long = "bound", short = 'b', allow_negative_numbers = true)]
    pub bound: Option<i64>,

    /// Seed for random samples (default: RULEPROBE_SEED, else entropy).
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Maximum number of values to print.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
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
