//! Custom error types for emojidb.
//!
//! Provides structured error handling with detailed context for better
//! diagnostics and user experience.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for emojidb operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling better error messages and programmatic error handling.
#[derive(Error, Debug)]
pub enum EmojidbError {
    // =========================================================================
    // Source Errors
    // =========================================================================
    /// Source JSON file not found at the specified path.
    #[error("Source file not found at '{path}'")]
    SourceNotFound { path: PathBuf },

    /// Source exists but does not parse as the expected gemoji shape.
    #[error("Failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    // =========================================================================
    // Database Errors
    // =========================================================================
    /// Database file not found (not yet built).
    #[error(
        "No alias database found. Run 'emojidb build <json>' first.\nExpected database at: {path}"
    )]
    DatabaseNotFound { path: PathBuf },

    /// Two source records claimed the same alias; the alias column is the
    /// primary key, so the second insert is rejected and the run aborts.
    #[error("Duplicate alias '{alias}' violates the primary key of the gemoji table")]
    DuplicateAlias { alias: String },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // =========================================================================
    // Verification Errors
    // =========================================================================
    /// A spot-checked alias resolved to the wrong emoji (or to nothing).
    #[error(
        "Verification failed: alias '{alias}' resolved to {}, expected '{expected}'",
        .found.as_deref().map_or_else(|| "no row".to_string(), |f| format!("'{f}'"))
    )]
    VerifyMismatch {
        alias: String,
        expected: String,
        found: Option<String>,
    },

    /// The built table holds a different number of rows than were inserted.
    #[error("Verification failed: table holds {found} rows, expected {expected}")]
    VerifyCount { expected: usize, found: i64 },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// Alias not present in the database.
    #[error("No emoji found for alias '{alias}'")]
    AliasNotFound { alias: String },

    // =========================================================================
    // IO Errors
    // =========================================================================
    /// File read/write error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path-specific IO error with context.
    #[error("Failed to {operation} '{path}': {source}")]
    PathError {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// JSON serialization error (report/stats output).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Ad-hoc error raised at the CLI layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for emojidb operations.
pub type Result<T> = std::result::Result<T, EmojidbError>;

impl EmojidbError {
    /// Create a source not found error.
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a database not found error.
    pub fn database_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DatabaseNotFound { path: path.into() }
    }

    /// Create a duplicate alias error.
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
        }
    }

    /// Create an alias not found error.
    pub fn alias_not_found(alias: impl Into<String>) -> Self {
        Self::AliasNotFound {
            alias: alias.into(),
        }
    }

    /// Create a path error with context.
    pub fn path_error(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::PathError {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Wrap an error with additional context.
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error is recoverable (user can fix it).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::DatabaseNotFound { .. }
                | Self::AliasNotFound { .. }
        )
    }

    /// Get a suggestion for how to fix this error, if applicable.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SourceNotFound { .. } => {
                Some("Check the path, or pass the source explicitly: emojidb build <json>.")
            }
            Self::DatabaseNotFound { .. } => {
                Some("Run 'emojidb build <json>' to create the database.")
            }
            Self::DuplicateAlias { .. } => {
                Some("Fix the source data; an alias may appear only once across all records.")
            }
            Self::VerifyMismatch { .. } | Self::VerifyCount { .. } => {
                Some("The store is inconsistent with the source. Re-run 'emojidb build'.")
            }
            _ => None,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with additional context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with additional context.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EmojidbError::with_context(context, e))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EmojidbError::with_context(f(), e))
    }
}

// =============================================================================
// CLI Error Formatting Utilities
// =============================================================================

use colored::Colorize;

/// Format a structured CLI error with explanation and suggestions.
///
/// # Arguments
/// * `title` - Brief error title (e.g., "Unknown alias")
/// * `explanation` - What went wrong and why
/// * `suggestions` - List of actionable suggestions
///
/// # Returns
/// A formatted error string ready for display.
#[must_use]
pub fn format_error(title: &str, explanation: &str, suggestions: &[&str]) -> String {
    use std::fmt::Write;

    let mut output = format!("{} {}", "✗".red().bold(), title.bold());

    if !explanation.is_empty() {
        let _ = write!(output, "\n\n   {explanation}");
    }

    if !suggestions.is_empty() {
        output.push_str("\n\n   ");
        if suggestions.len() == 1 {
            let _ = write!(output, "{} {}", "Hint:".cyan(), suggestions[0]);
        } else {
            let _ = write!(output, "{}:", "Try".cyan());
            for suggestion in suggestions {
                let _ = write!(output, "\n     {} {}", "•".dimmed(), suggestion);
            }
        }
    }

    output
}

/// Calculate the Levenshtein edit distance between two strings.
///
/// This is used for "did you mean?" suggestions when users make typos.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rolling rows instead of the full matrix.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Find the best match from a list of candidates for a given input.
///
/// Returns `Some(match)` if a sufficiently close match is found,
/// `None` otherwise. Exact matches are not returned (they are not typos).
///
/// # Arguments
/// * `input` - The user's input (possibly a typo)
/// * `candidates` - List of valid options
/// * `max_distance` - Maximum edit distance to consider (default: 2)
#[must_use]
pub fn find_closest_match<'a>(
    input: &str,
    candidates: &[&'a str],
    max_distance: Option<usize>,
) -> Option<&'a str> {
    let max_dist = max_distance.unwrap_or(2);
    let input_lower = input.to_lowercase();

    candidates
        .iter()
        .map(|&candidate| {
            let distance = levenshtein_distance(&input_lower, &candidate.to_lowercase());
            (candidate, distance)
        })
        .filter(|(_, distance)| *distance <= max_dist && *distance > 0)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Format a "did you mean?" suggestion.
#[must_use]
pub fn format_did_you_mean(suggestion: &str) -> String {
    format!("Did you mean '{}'?", suggestion.green())
}

/// Format the error for a lookup miss, with "did you mean?" support drawn
/// from the aliases actually stored in the database.
#[must_use]
pub fn format_unknown_alias_error(alias: &str, known: &[String]) -> String {
    let title = format!("Unknown alias: '{alias}'");

    let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
    let mut suggestions = Vec::new();

    if let Some(closest) = find_closest_match(alias, &candidates, None) {
        suggestions.push(format_did_you_mean(closest));
    }
    suggestions.push("Use 'emojidb stats' to inspect the database contents.".to_string());

    let suggestion_refs: Vec<&str> = suggestions.iter().map(String::as_str).collect();
    format_error(&title, "", &suggestion_refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmojidbError::source_not_found("/path/to/gemoji.json");
        assert!(err.to_string().contains("/path/to/gemoji.json"));
    }

    #[test]
    fn test_duplicate_alias_display() {
        let err = EmojidbError::duplicate_alias("smile");
        assert!(err.to_string().contains("'smile'"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_verify_mismatch_display() {
        let err = EmojidbError::VerifyMismatch {
            alias: "grin".into(),
            expected: "😀".into(),
            found: None,
        };
        assert!(err.to_string().contains("no row"));

        let err = EmojidbError::VerifyMismatch {
            alias: "grin".into(),
            expected: "😀".into(),
            found: Some("😃".into()),
        };
        assert!(err.to_string().contains("😃"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = EmojidbError::database_not_found("/path/to/gemoji.db");
        assert!(err.suggestion().is_some());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EmojidbError = io_err.into();
        assert!(matches!(err, EmojidbError::Io(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        // This test verifies the From impl exists
        fn accepts_err(_: EmojidbError) {}
        let sqlite_err = rusqlite::Error::InvalidQuery;
        accepts_err(sqlite_err.into());
    }

    #[test]
    fn test_result_ext_context() {
        let failed: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));

        let err = failed.context("Failed to read text from stdin").unwrap_err();

        assert!(matches!(err, EmojidbError::WithContext { .. }));
        let display = err.to_string();
        assert!(display.contains("Failed to read text from stdin"));
        assert!(display.contains("pipe closed"));
    }

    #[test]
    fn test_result_ext_with_context_lazy() {
        let failed: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));

        let err = failed
            .with_context(|| format!("Failed to write config file to {}", "/tmp/config.toml"))
            .unwrap_err();

        let display = err.to_string();
        assert!(display.contains("Failed to write config file to /tmp/config.toml"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn test_other_displays_transparently() {
        let err: EmojidbError = anyhow::anyhow!("config file already exists").into();
        assert_eq!(err.to_string(), "config file already exists");
    }

    // =========================================================================
    // Levenshtein Distance Tests
    // =========================================================================

    #[test]
    fn levenshtein_identical_strings() {
        assert_eq!(levenshtein_distance("smile", "smile"), 0);
    }

    #[test]
    fn levenshtein_one_char_difference() {
        assert_eq!(levenshtein_distance("smile", "smule"), 1);
        assert_eq!(levenshtein_distance("grin", "gran"), 1);
    }

    #[test]
    fn levenshtein_insertions_deletions() {
        assert_eq!(levenshtein_distance("grin", "grins"), 1);
        assert_eq!(levenshtein_distance("grins", "grin"), 1);
    }

    #[test]
    fn levenshtein_empty_strings() {
        assert_eq!(levenshtein_distance("", "smile"), 5);
        assert_eq!(levenshtein_distance("smile", ""), 5);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn find_closest_match_typo() {
        let candidates = ["smile", "smiley", "grin", "joy"];
        assert_eq!(find_closest_match("smle", &candidates, None), Some("smile"));
        assert_eq!(find_closest_match("joy", &candidates, None), None); // exact match not returned
        assert_eq!(find_closest_match("xyzxyz", &candidates, None), None);
    }

    #[test]
    fn format_error_single_suggestion() {
        let output = format_error("Test Error", "Something went wrong", &["Try this"]);
        assert!(output.contains("Test Error"));
        assert!(output.contains("Something went wrong"));
        assert!(output.contains("Try this"));
    }

    #[test]
    fn format_unknown_alias_suggests_near_match() {
        let known = vec!["smile".to_string(), "grin".to_string()];
        let output = format_unknown_alias_error("smyle", &known);
        assert!(output.contains("Unknown alias"));
        assert!(output.contains("smyle"));
        assert!(output.contains("smile")); // did you mean
    }
}
