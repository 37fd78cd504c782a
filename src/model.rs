//! Data models for gemoji records and the produced alias database.
//!
//! These structures represent the normalized form of gemoji data after
//! parsing from the JSON export format.

use serde::{Deserialize, Serialize};

/// One entry from the source gemoji document.
///
/// Both fields are optional: the source format treats a missing or null
/// `emoji`/`aliases` as "no value", and such records expand to zero rows
/// rather than failing the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemojiRecord {
    pub emoji: Option<String>,
    pub aliases: Option<Vec<String>>,
}

impl GemojiRecord {
    /// Aliases that survive falsy filtering: non-empty strings, in source order.
    pub fn retained_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|alias| !alias.is_empty())
    }

    /// Whether this record produces any row at all.
    #[must_use]
    pub fn is_convertible(&self) -> bool {
        self.emoji.is_some() && self.retained_aliases().next().is_some()
    }

    /// Longest alias within this record, measured in characters.
    ///
    /// Earlier aliases win ties. Returns `None` when the alias list is absent
    /// or holds nothing but empty strings; such records are excluded from the
    /// corpus-wide longest-alias scan entirely.
    #[must_use]
    pub fn longest_alias(&self) -> Option<&str> {
        let mut longest: Option<(&str, usize)> = None;
        for alias in self.retained_aliases() {
            let len = alias.chars().count();
            if longest.is_none_or(|(_, best)| len > best) {
                longest = Some((alias, len));
            }
        }
        longest.map(|(alias, _)| alias)
    }
}

/// One persisted row of the `gemoji` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRow {
    pub alias: String,
    pub emoji: String,
}

/// Outcome of a full conversion run.
///
/// `aliases_inserted` and `longest_alias` together form the contract result;
/// the record counters exist for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Records present in the source document.
    pub records_total: usize,
    /// Records that produced at least one row.
    pub records_converted: usize,
    /// Records skipped for a missing emoji or a missing/empty alias list.
    pub records_skipped: usize,
    /// Total rows written to the `gemoji` table.
    pub aliases_inserted: usize,
    /// Longest alias across the whole source, `None` for an empty corpus.
    pub longest_alias: Option<String>,
}

/// Aggregate statistics over an existing alias database.
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    /// Row count of the `gemoji` table.
    pub aliases: i64,
    /// Distinct emoji values among those rows.
    pub emojis: i64,
    /// Longest stored alias (character count, earliest insert wins ties).
    pub longest_alias: Option<String>,
    /// Size of the database file on disk.
    pub db_size_bytes: u64,
}
