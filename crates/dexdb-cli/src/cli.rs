//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use dexdb_cli::pipeline::{
    DEFAULT_CSV_DIR, DEFAULT_DATASET_DIR, DEFAULT_REPO_URL, DEFAULT_STORE_PATH,
};
use dexdb_report::{DEFAULT_GENERATION, DEFAULT_LANGUAGE_ID, MAX_GENERATION};

#[derive(Parser)]
#[command(
    name = "dexdb",
    version,
    about = "Build a SQLite database from the PokeAPI CSV dataset",
    long_about = "Build a SQLite database from the PokeAPI CSV dataset.\n\n\
                  Column types, nullability and primary keys are inferred from the data.\n\
                  Read-side commands open the database read-only."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the SQLite database.
    #[arg(
        long = "store",
        value_name = "PATH",
        default_value = DEFAULT_STORE_PATH,
        global = true
    )]
    pub store: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Import every CSV file of the dataset into a new database.
    Build(BuildArgs),

    /// List tables with row counts and the recorded run metadata.
    Tables,

    /// Print JSON exports on stdout.
    #[command(subcommand)]
    Export(ExportCommand),

    /// Print the type-matchup chart for a generation.
    TypeChart(TypeChartArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Replace the database if it already exists.
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Fail instead of cloning the dataset when it is missing.
    #[arg(long = "no-clone")]
    pub no_clone: bool,

    /// Keep `[text]{kind:ref}` markup in text columns as-is.
    #[arg(long = "no-scrub")]
    pub no_scrub: bool,

    /// Local checkout of the dataset repository.
    #[arg(long = "dataset-dir", value_name = "DIR", default_value = DEFAULT_DATASET_DIR)]
    pub dataset_dir: PathBuf,

    /// CSV directory, relative to the dataset checkout.
    #[arg(long = "csv-dir", value_name = "REL", default_value = DEFAULT_CSV_DIR)]
    pub csv_dir: PathBuf,

    /// Repository cloned when the dataset checkout is missing.
    #[arg(long = "repo-url", value_name = "URL", default_value = DEFAULT_REPO_URL)]
    pub repo_url: String,
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Items keyed by identifier.
    Items,
    /// Standard moves keyed by identifier, with effects and secondary data.
    Moves,
    /// Standard species keyed by identifier.
    Pokedex,
    /// Standard types keyed by identifier, with their matchups.
    Types,
    /// Every row of one table.
    Table {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Args)]
pub struct TypeChartArgs {
    /// Generation whose matchups are shown.
    #[arg(
        value_name = "GENERATION",
        default_value_t = DEFAULT_GENERATION,
        value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_GENERATION))
    )]
    pub generation: u8,

    /// Draw with ASCII characters instead of box-drawing characters.
    #[arg(long = "ascii")]
    pub ascii: bool,

    /// Language used for type names.
    #[arg(long = "language-id", value_name = "ID", default_value_t = DEFAULT_LANGUAGE_ID)]
    pub language_id: i64,
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
