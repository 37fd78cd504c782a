//! CLI definitions for emojidb.
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// emojidb - gemoji alias database builder
#[derive(Parser, Debug)]
#[command(name = "emojidb")]
#[command(version)]
#[command(about = "Convert gemoji JSON into a queryable SQLite alias database")]
#[command(long_about = r#"
emojidb - a one-shot converter from gemoji JSON to SQLite.

Takes the gemoji project's emoji.json (records of one emoji plus its
markdown aliases) and produces a single-file SQLite database with one
table, gemoji(alias, emoji), keyed by alias. The same database then
answers alias lookups and :alias: replacement in text.

Quick start:
  1. Fetch the data: curl -LO https://raw.githubusercontent.com/github/gemoji/master/db/emoji.json
  2. Build: emojidb build emoji.json
  3. Query: emojidb lookup smile
"#)]
pub struct Cli {
    /// Path to the alias database file
    #[arg(long, env = "EMOJIDB_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Output format (falls back to the configured default)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Be verbose (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Be quiet (suppress non-error output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the alias database from a gemoji JSON file
    Build(BuildArgs),

    /// Look up the emoji for a single alias
    Lookup(LookupArgs),

    /// Replace :alias: occurrences in text with emoji
    Replace(ReplaceArgs),

    /// Show statistics for an existing alias database
    Stats,

    /// Show or manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the gemoji JSON source file
    pub source: Option<PathBuf>,

    /// Spot-check the built database against the source afterwards
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Alias to resolve, without the surrounding colons
    pub alias: String,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Text to scan; reads stdin when omitted
    pub text: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show the effective configuration
    #[arg(long)]
    pub show: bool,

    /// Write a default config file to the user config path
    #[arg(long)]
    pub init: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-pretty" | "json_pretty" => Ok(Self::JsonPretty),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}
