//! Gemoji source document parser.
//!
//! Handles the gemoji JSON export format: a single UTF-8 file holding one
//! array of records, each `{"emoji": "😀", "aliases": ["grinning"]}`.
//!
//! The document shape is strict (anything but an array of objects is a fatal
//! parse error), while per-record fields are tolerant: an absent, null, or
//! wrong-typed `emoji`/`aliases` means "no value" and makes the record a
//! skip, never an error.

use crate::error::{EmojidbError, Result};
use crate::model::GemojiRecord;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Read and parse the gemoji document at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, not UTF-8, or does
/// not parse as a JSON array of objects.
pub fn parse_gemoji_file(path: impl AsRef<Path>) -> Result<Vec<GemojiRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EmojidbError::source_not_found(path));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        // read_to_string signals undecodable bytes as InvalidData; that is a
        // malformed source, not a filesystem failure.
        if e.kind() == std::io::ErrorKind::InvalidData {
            EmojidbError::parse(path, "source is not valid UTF-8")
        } else {
            EmojidbError::path_error("read", path, e)
        }
    })?;

    let records = parse_document(&content).map_err(|reason| EmojidbError::parse(path, reason))?;
    info!("Parsed {} gemoji records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse the document body into records.
fn parse_document(content: &str) -> std::result::Result<Vec<GemojiRecord>, String> {
    let doc: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let Value::Array(items) = doc else {
        return Err("expected a top-level JSON array of objects".to_string());
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(format!("element {index} is not an object"));
        }
        records.push(extract_record(item));
    }

    Ok(records)
}

/// Tolerant field extraction for one record.
///
/// Non-string entries inside `aliases` (nulls, numbers) are dropped here;
/// empty strings survive and are filtered at insert time. An empty-string
/// `emoji` is treated as absent, matching the skip policy for records that
/// carry no usable glyph.
fn extract_record(item: &Value) -> GemojiRecord {
    let emoji = item["emoji"]
        .as_str()
        .filter(|glyph| !glyph.is_empty())
        .map(String::from);

    let aliases = item["aliases"].as_array().map(|entries| {
        entries
            .iter()
            .filter_map(|entry| entry.as_str().map(String::from))
            .collect()
    });

    if emoji.is_none() || aliases.is_none() {
        debug!("Record with missing fields will be skipped: {item}");
    }

    GemojiRecord { emoji, aliases }
}

/// Longest alias across all records, measured in characters.
///
/// Per the per-record helper, earlier aliases win ties, and the first record
/// to reach the maximum wins across records. Records with an absent or
/// effectively empty alias list are excluded from the scan regardless of
/// whether they carry an emoji.
#[must_use]
pub fn longest_alias(records: &[GemojiRecord]) -> Option<&str> {
    let mut longest: Option<(&str, usize)> = None;
    for alias in records.iter().filter_map(GemojiRecord::longest_alias) {
        let len = alias.chars().count();
        if longest.is_none_or(|(_, best)| len > best) {
            longest = Some((alias, len));
        }
    }
    longest.map(|(alias, _)| alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_document() {
        let records = parse_document(
            r#"[
                {"emoji": "😀", "aliases": ["grinning"]},
                {"emoji": "😃", "aliases": ["smiley", "happy"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].emoji.as_deref(), Some("😀"));
        assert_eq!(
            records[1].aliases.as_deref(),
            Some(&["smiley".to_string(), "happy".to_string()][..])
        );
    }

    #[test]
    fn rejects_non_array_root() {
        let err = parse_document(r#"{"emoji": "😀"}"#).unwrap_err();
        assert!(err.contains("array"));
    }

    #[test]
    fn rejects_non_object_element_with_index() {
        let err = parse_document(r#"[{"emoji": "😀", "aliases": ["a"]}, 42]"#).unwrap_err();
        assert!(err.contains("element 1"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_document("not json at all").is_err());
        assert!(parse_document(r#"[{"emoji": "#).is_err());
    }

    #[test]
    fn non_utf8_source_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gemoji.json");
        std::fs::write(&path, [0xFF, 0xFE, b'[', b']']).unwrap();

        let err = parse_gemoji_file(&path).unwrap_err();
        match err {
            EmojidbError::Parse { reason, .. } => assert!(reason.contains("UTF-8")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_become_no_value() {
        let records = parse_document(
            r#"[
                {"aliases": ["orphan"]},
                {"emoji": "😀"},
                {"emoji": null, "aliases": null},
                {"emoji": 7, "aliases": "nope"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 4);
        assert!(records[0].emoji.is_none());
        assert!(records[1].aliases.is_none());
        assert!(records[2].emoji.is_none() && records[2].aliases.is_none());
        assert!(records[3].emoji.is_none() && records[3].aliases.is_none());
    }

    #[test]
    fn null_alias_entries_are_dropped_empty_strings_kept() {
        let records =
            parse_document(r#"[{"emoji": "😀", "aliases": ["", "grin", null]}]"#).unwrap();

        assert_eq!(
            records[0].aliases.as_deref(),
            Some(&[String::new(), "grin".to_string()][..])
        );
        // Only the non-empty alias survives falsy filtering.
        let retained: Vec<_> = records[0].retained_aliases().collect();
        assert_eq!(retained, vec!["grin"]);
    }

    #[test]
    fn empty_string_emoji_treated_as_absent() {
        let records = parse_document(r#"[{"emoji": "", "aliases": ["grin"]}]"#).unwrap();
        assert!(records[0].emoji.is_none());
        assert!(!records[0].is_convertible());
    }

    #[test]
    fn longest_alias_across_records() {
        let records = parse_document(
            r#"[
                {"emoji": "😀", "aliases": ["grin", "grinning"]},
                {"emoji": "😂", "aliases": ["joy"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(longest_alias(&records), Some("grinning"));
    }

    #[test]
    fn longest_alias_excludes_unusable_records_and_keeps_emojiless_ones() {
        let records = parse_document(
            r#"[
                {"emoji": "😀", "aliases": []},
                {"aliases": ["extralongalias"]},
                {"emoji": "😂", "aliases": ["joy"]}
            ]"#,
        )
        .unwrap();

        // The emoji-less record still participates in the statistic.
        assert_eq!(longest_alias(&records), Some("extralongalias"));
    }

    #[test]
    fn longest_alias_empty_corpus() {
        assert_eq!(longest_alias(&[]), None);
        let records = parse_document(r#"[{"emoji": "😀"}]"#).unwrap();
        assert_eq!(longest_alias(&records), None);
    }

    #[test]
    fn longest_alias_first_record_wins_tie() {
        let records = parse_document(
            r#"[
                {"emoji": "😀", "aliases": ["abcd"]},
                {"emoji": "😂", "aliases": ["wxyz"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(longest_alias(&records), Some("abcd"));
    }
}
