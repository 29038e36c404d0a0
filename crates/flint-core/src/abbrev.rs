//! First-letter abbreviations: `GitHub Desktop` -> `GD`, `微信` -> `WX`.

use crate::matching::{MatchPrimitives, contains_cjk};
use tracing::debug;

/// Derive the first-letter abbreviation of a label.
///
/// CJK labels use the initials of their pinyin syllables; if transliteration
/// fails the abbreviation is empty. Other labels use the initial of every
/// word split on whitespace, `-` and `_`.
#[must_use]
pub fn abbreviate<P: MatchPrimitives + ?Sized>(primitives: &P, label: &str) -> String {
    if contains_cjk(label) {
        return match primitives.transliterate(label) {
            Ok(transliteration) => initials(transliteration.syllables.iter().map(String::as_str)),
            Err(e) => {
                debug!("No abbreviation for '{}': {}", label, e);
                String::new()
            }
        };
    }

    initials(label.split(|c: char| c.is_whitespace() || c == '-' || c == '_'))
}

/// Whether `query` occurs in the abbreviation of `label`, ignoring case
#[must_use]
pub fn abbreviation_matches<P: MatchPrimitives + ?Sized>(
    primitives: &P,
    label: &str,
    query: &str,
) -> bool {
    if query.trim().is_empty() {
        return false;
    }

    abbreviate(primitives, label)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

fn initials<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
