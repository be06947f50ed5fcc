//! CLI argument parsing.
//!
//! Running with no subcommand is the same as `generate` with the default file
//! names, so a bare invocation reads `verses.csv` and writes `verses.json` in
//! the working directory.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Delimited verse list read by `generate`.
pub const DEFAULT_INPUT: &str = "verses.csv";
/// Grouped JSON written by `generate` and read by `plan`.
pub const DEFAULT_OUTPUT: &str = "verses.json";

#[derive(Parser, Debug)]
#[command(
    name = "verse-tally",
    version,
    about = "Group scripture verses by book and chapter and score them",
    after_help = "Commands:\n  generate   Read verses.csv and write verses.json (default)\n  plan       Split a verse range into daily readings\n\nExamples:\n  verse-tally\n  verse-tally generate --input kjv.csv --output kjv.json --compact\n  verse-tally plan --start-date 2025-01-01 --from \"Genesis 1:1\" --to \"Malachi 4:6\""
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emit debug logs (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Plan(PlanArgs),
}

impl RootArgs {
    pub fn command_or_default(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
    }
}

/// Generate command inputs.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Group verse records and write the JSON tree")]
pub struct GenerateArgs {
    /// Delimited verse list (book, chapter, verse, text; no header)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output path for the JSON tree
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        GenerateArgs {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            compact: false,
        }
    }
}

/// Plan command inputs.
#[derive(Parser, Debug, Clone)]
#[command(about = "Split a verse range into daily readings of similar length")]
pub struct PlanArgs {
    /// JSON tree produced by `generate`
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub verses: PathBuf,

    /// First reading day, YYYY-MM-DD (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<chrono::NaiveDate>,

    /// Last reading day, YYYY-MM-DD (defaults to 31 December of the start year)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<chrono::NaiveDate>,

    /// First verse, e.g. "Genesis 1:1" (defaults to the first verse)
    #[arg(long, value_name = "REF")]
    pub from: Option<crate::plan::VerseRef>,

    /// Last verse, e.g. "Revelation 22:21" (defaults to the last verse)
    #[arg(long, value_name = "REF")]
    pub to: Option<crate::plan::VerseRef>,

    /// Write the plan here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Emit JSON instead of tab-separated lines
    #[arg(long)]
    pub json: bool,
}
