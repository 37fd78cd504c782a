//! `:alias:` replacement over arbitrary text.
//!
//! Scans text for colon-delimited alias candidates and substitutes the
//! mapped emoji, leaving anything that does not resolve untouched. Lookup
//! goes through [`AliasResolver`] so the scanner can be tested without a
//! database and reused against any alias source.

use crate::error::Result;
use crate::storage::Storage;
use memchr::memchr;

/// Longest alias shipped in the upstream gemoji set. Pre-sizing the
/// candidate buffer to this length means it never grows on real data.
const LONGEST_KNOWN_ALIAS: &str = "south_georgia_south_sandwich_islands";

/// Maps an alias (without colons) to its emoji, if any.
pub trait AliasResolver {
    /// Resolve `alias` to an emoji, or `None` when the alias is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying lookup fails.
    fn resolve(&self, alias: &str) -> Result<Option<String>>;
}

impl AliasResolver for Storage {
    fn resolve(&self, alias: &str) -> Result<Option<String>> {
        self.get_emoji(alias)
    }
}

/// Any infallible alias map works as a resolver; handy for tests.
impl<F> AliasResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, alias: &str) -> Result<Option<String>> {
        Ok(self(alias))
    }
}

/// Replace every resolvable `:alias:` occurrence in `text`.
///
/// Scanner rules, in order:
///   - `::` emits one literal colon and stays armed for an alias start;
///   - a space inside a candidate aborts it, emitting the literal text;
///   - a closing colon that resolves emits the emoji; one that does not
///     emits the literal candidate and becomes the opener of the next;
///   - a candidate still open at end of input is flushed literally.
///
/// # Errors
///
/// Returns an error if the resolver fails mid-scan.
pub fn replace_aliases(resolver: &impl AliasResolver, text: &str) -> Result<String> {
    // No colon means no candidate anywhere.
    if memchr(b':', text.as_bytes()).is_none() {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut alias = String::with_capacity(LONGEST_KNOWN_ALIAS.len());
    let mut armed = false;

    for ch in text.chars() {
        if armed || !alias.is_empty() {
            if armed && ch == ':' {
                out.push(':');
                continue;
            }
            armed = false;
            match ch {
                ' ' => {
                    // Aliases never contain spaces, so this was ordinary text.
                    out.push(':');
                    out.push_str(&alias);
                    out.push(' ');
                    alias.clear();
                }
                ':' => {
                    match resolver.resolve(&alias)? {
                        Some(emoji) => out.push_str(&emoji),
                        None => {
                            out.push(':');
                            out.push_str(&alias);
                            // The closing colon may open the next candidate.
                            armed = true;
                        }
                    }
                    alias.clear();
                }
                _ => alias.push(ch),
            }
        } else if ch == ':' {
            armed = true;
        } else {
            out.push(ch);
        }
    }

    if armed {
        out.push(':');
    } else if !alias.is_empty() {
        out.push(':');
        out.push_str(&alias);
    }

    Ok(out)
}
