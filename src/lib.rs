//! emojidb - gemoji alias database builder
//!
//! This library converts the gemoji project's JSON emoji catalog into a
//! single-file `SQLite` database mapping markdown aliases to emoji, and
//! answers lookups and `:alias:` replacement against that database.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Layered configuration (defaults, file, environment, CLI)
//! - [`convert`] - The JSON-to-database conversion pipeline
//! - [`error`] - Custom error types with rich context
//! - [`logging`] - Tracing-based logging setup
//! - [`model`] - Data models for gemoji records and reports
//! - [`parser`] - Source document parsing and record extraction
//! - [`replace`] - `:alias:` replacement over text
//! - [`storage`] - `SQLite` storage layer

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod replace;
pub mod storage;

pub use cli::*;
pub use config::Config;
pub use convert::{convert, verify};
pub use error::{
    EmojidbError, Result, ResultExt, find_closest_match, format_did_you_mean, format_error,
    format_unknown_alias_error,
};
pub use model::*;
pub use parser::parse_gemoji_file;
pub use replace::{AliasResolver, replace_aliases};
pub use storage::Storage;

/// Default source filename, resolved against the working directory.
pub const DEFAULT_JSON_NAME: &str = "gemoji.json";

/// Default database filename, resolved against the working directory.
pub const DEFAULT_DB_NAME: &str = "gemoji.db";

/// Fixed label printed above the longest alias after a build.
pub const LONGEST_ALIAS_LABEL: &str = "Longest alias";

const BYTES_PER_KB: u64 = 1024;
const BYTES_PER_MB: u64 = 1024 * 1024;
const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Get the default source path
#[must_use]
pub fn default_source_path() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_JSON_NAME)
}

/// Get the default database path
#[must_use]
pub fn default_db_path() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_DB_NAME)
}

/// Format an integer with thousands separators.
#[must_use]
pub fn format_number(value: i64) -> String {
    let abs = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(abs.len() + abs.len() / 3);

    for (idx, ch) in abs.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut formatted: String = out.chars().rev().collect();
    if value < 0 {
        formatted.insert(0, '-');
    }
    formatted
}

/// Format a usize with thousands separators.
#[must_use]
pub fn format_number_usize(value: usize) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

/// Format bytes into a human-friendly string.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes < BYTES_PER_KB {
        format!("{bytes} B")
    } else if bytes < BYTES_PER_MB {
        format_bytes_with_unit(bytes, BYTES_PER_KB, "KB")
    } else if bytes < BYTES_PER_GB {
        format_bytes_with_unit(bytes, BYTES_PER_MB, "MB")
    } else {
        format_bytes_with_unit(bytes, BYTES_PER_GB, "GB")
    }
}

fn format_bytes_with_unit(bytes: u64, unit: u64, suffix: &str) -> String {
    let whole = bytes / unit;
    let tenths = (bytes % unit) * 10 / unit;
    format!("{whole}.{tenths} {suffix}")
}
