//! Conversion pipeline from gemoji JSON to the alias database.
//!
//! One-shot batch semantics: the destination is recreated from scratch on
//! every run, all rows land in a single transaction, and a failed run leaves
//! no destination file behind.

use crate::error::{EmojidbError, Result};
use crate::model::{AliasRow, ConvertReport, GemojiRecord};
use crate::parser;
use crate::storage::Storage;
use std::path::Path;
use tracing::{debug, info, warn};

/// Number of leading rows the verification pass re-resolves.
const VERIFY_SAMPLE: usize = 8;

/// Run the full conversion.
///
/// Recreates the store at `dest`, parses `source`, inserts one row per
/// retained alias, commits, and reports counts plus the longest alias across
/// the whole source. Anything fatal after the store file exists removes the
/// partial file before the error propagates, so a re-run always starts clean
/// and a failed run never leaves a silently truncated store.
///
/// # Errors
///
/// Returns an error if the source is missing or malformed, the destination
/// cannot be (re)created, or two records claim the same alias.
pub fn convert(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<ConvertReport> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    info!(
        "Converting {} into {}",
        source.display(),
        dest.display()
    );

    let mut storage = Storage::create(dest)?;

    match populate(&mut storage, source) {
        Ok(report) => {
            info!(
                "Converted {} of {} records into {} alias rows",
                report.records_converted, report.records_total, report.aliases_inserted
            );
            Ok(report)
        }
        Err(e) => {
            drop(storage);
            remove_partial(dest);
            Err(e)
        }
    }
}

fn populate(storage: &mut Storage, source: &Path) -> Result<ConvertReport> {
    let records = parser::parse_gemoji_file(source)?;
    let (rows, records_converted) = expand_rows(&records);

    let aliases_inserted = storage.insert_rows(&rows)?;

    // The longest alias is computed over the parsed records, not the stored
    // rows: a record without an emoji contributes no row but still competes.
    let longest_alias = parser::longest_alias(&records).map(String::from);

    Ok(ConvertReport {
        records_total: records.len(),
        records_converted,
        records_skipped: records.len() - records_converted,
        aliases_inserted,
        longest_alias,
    })
}

/// Expand records into insertable rows, in source order.
///
/// Returns the rows and the number of records that produced at least one.
fn expand_rows(records: &[GemojiRecord]) -> (Vec<AliasRow>, usize) {
    let mut rows = Vec::new();
    let mut converted = 0;

    for record in records {
        let Some(emoji) = record.emoji.as_deref() else {
            debug!("Skipping record without emoji");
            continue;
        };

        let before = rows.len();
        for alias in record.retained_aliases() {
            rows.push(AliasRow {
                alias: alias.to_string(),
                emoji: emoji.to_string(),
            });
        }

        if rows.len() > before {
            converted += 1;
        } else {
            debug!("Skipping record without usable aliases");
        }
    }

    (rows, converted)
}

/// Spot-check a freshly built store against its source.
///
/// Re-parses the source, re-opens the store read-only, and checks that the
/// row count matches the report and that a deterministic sample of rows (the
/// first [`VERIFY_SAMPLE`] plus the one holding the longest alias) resolves
/// to the expected emoji.
///
/// # Errors
///
/// Returns [`EmojidbError::VerifyCount`] on a row-count mismatch and
/// [`EmojidbError::VerifyMismatch`] naming the first alias that resolved
/// wrongly.
pub fn verify(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    report: &ConvertReport,
) -> Result<()> {
    let records = parser::parse_gemoji_file(source.as_ref())?;
    let (rows, _) = expand_rows(&records);

    let storage = Storage::open(dest.as_ref())?;

    let found = storage.count_rows()?;
    let expected = i64::try_from(report.aliases_inserted).unwrap_or(i64::MAX);
    if found != expected {
        return Err(EmojidbError::VerifyCount {
            expected: report.aliases_inserted,
            found,
        });
    }

    let longest_probe = report.longest_alias.as_deref().and_then(|longest| {
        rows.iter()
            .find(|row| row.alias == longest)
            .filter(|_| rows.len() > VERIFY_SAMPLE)
    });
    let probes = rows.iter().take(VERIFY_SAMPLE).chain(longest_probe);

    for row in probes {
        let resolved = storage.get_emoji(&row.alias)?;
        if resolved.as_deref() != Some(row.emoji.as_str()) {
            return Err(EmojidbError::VerifyMismatch {
                alias: row.alias.clone(),
                expected: row.emoji.clone(),
                found: resolved,
            });
        }
    }

    debug!("Verified {} rows at {}", found, dest.as_ref().display());
    Ok(())
}

fn remove_partial(dest: &Path) {
    match std::fs::remove_file(dest) {
        Ok(()) => debug!("Removed partial database at {}", dest.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove partial database {}: {}",
            dest.display(),
            e
        ),
    }
}
