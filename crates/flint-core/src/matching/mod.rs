//! Text matching primitives.
//!
//! Everything above this module talks to matching through [`MatchPrimitives`],
//! so the pinyin table and the substring matcher can be swapped without
//! touching the scoring rules.

mod pinyin_matcher;

pub use pinyin_matcher::PinyinMatcher;

use crate::Result;
use flint_types::MatchSpan;

/// CJK text split into romanizable units
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transliteration {
    /// Source units, one per syllable (a CJK character or an ASCII word)
    pub units: Vec<String>,

    /// Romanized syllables without tone marks
    pub syllables: Vec<String>,
}

/// Fuzzy substring matching and transliteration
pub trait MatchPrimitives {
    /// Span of `text` matched by `query`, in character positions.
    /// Must return the same span for the same inputs.
    fn match_span(&mut self, text: &str, query: &str) -> Option<MatchSpan>;

    /// Split CJK text into pinyin syllables.
    ///
    /// # Errors
    ///
    /// Returns an error when `text` has no CJK characters or contains a
    /// character without a known reading.
    fn transliterate(&self, text: &str) -> Result<Transliteration>;
}

/// Whether `c` is a CJK ideograph
#[must_use]
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}' // Extension A
        | '\u{4E00}'..='\u{9FFF}' // Unified Ideographs
        | '\u{F900}'..='\u{FAFF}' // Compatibility Ideographs
    )
}

#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Whether `c` attaches to the character before it (accents, variation
/// selectors and joiners in emoji sequences)
#[must_use]
pub fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{200D}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{FE20}'..='\u{FE2F}'
        | '\u{1F3FB}'..='\u{1F3FF}' // skin tones
    )
}

/// Lower-case a query and drop its whitespace and combining marks
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .chars()
        .filter(|&c| !c.is_whitespace() && !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}
