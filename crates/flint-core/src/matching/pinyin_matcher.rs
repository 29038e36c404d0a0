use super::{
    MatchPrimitives, Transliteration, contains_cjk, is_cjk, is_combining_mark, normalize_query,
};
use crate::{Error, Result};
use ::pinyin::{ToPinyin, ToPinyinMulti};
use flint_types::MatchSpan;
use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use std::collections::HashSet;

/// Default match primitives: nucleo substring matching with a pinyin-aware
/// fallback for CJK labels.
///
/// The fallback lets `weixin`, `wx` or `weix` reach `微信`, and skips spaces
/// inside the label so `visualstudio` reaches `Visual Studio`.
pub struct PinyinMatcher {
    matcher: Matcher,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl PinyinMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Contiguous, case-insensitive occurrence of `query` in `text`
    fn substring_span(&mut self, text: &str, query: &str) -> Option<MatchSpan> {
        let atom = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Substring,
            false,
        );

        // One slot per char: `Utf32Str::new` would fold grapheme clusters and
        // return cluster indices instead of char positions
        self.indices.clear();
        let haystack = if text.is_ascii() {
            Utf32Str::Ascii(text.as_bytes())
        } else {
            self.buf.clear();
            self.buf.extend(text.chars());
            Utf32Str::Unicode(&self.buf)
        };
        atom.indices(haystack, &mut self.matcher, &mut self.indices)?;

        let start = *self.indices.iter().min()?;
        let end = *self.indices.iter().max()?;
        Some(MatchSpan::new(start as usize, end as usize))
    }
}

impl Default for PinyinMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchPrimitives for PinyinMatcher {
    fn match_span(&mut self, text: &str, query: &str) -> Option<MatchSpan> {
        let query = normalize_query(query);
        if query.is_empty() || text.is_empty() {
            return None;
        }

        let span = self.substring_span(text, &query).or_else(|| {
            let query: Vec<char> = query.chars().collect();
            PinyinScan::new(text, &query).run()
        })?;
        Some(extend_over_marks(text, span))
    }

    fn transliterate(&self, text: &str) -> Result<Transliteration> {
        if !contains_cjk(text) {
            return Err(Error::Transliteration(format!(
                "no CJK characters in '{text}'"
            )));
        }

        let mut out = Transliteration::default();
        let mut word = String::new();

        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                word.push(c.to_ascii_lowercase());
                continue;
            }

            flush_word(&mut out, &mut word);

            if is_cjk(c) {
                let reading = c
                    .to_pinyin()
                    .ok_or_else(|| Error::Transliteration(format!("no reading for '{c}'")))?;
                out.units.push(c.to_string());
                out.syllables.push(reading.plain().to_string());
            }
        }
        flush_word(&mut out, &mut word);

        Ok(out)
    }
}

/// Grow `span` over the combining marks attached to its last character
fn extend_over_marks(text: &str, span: MatchSpan) -> MatchSpan {
    let trailing = text
        .chars()
        .skip(span.end + 1)
        .take_while(|&c| is_combining_mark(c))
        .count();
    MatchSpan::new(span.start, span.end + trailing)
}

fn flush_word(out: &mut Transliteration, word: &mut String) {
    if word.is_empty() {
        return;
    }
    out.units.push(word.clone());
    out.syllables.push(std::mem::take(word));
}

/// All toneless readings of a CJK character, in table order
fn readings(c: char) -> Vec<&'static str> {
    if !is_cjk(c) {
        return Vec::new();
    }

    let Some(multi) = c.to_pinyin_multi() else {
        return Vec::new();
    };

    let mut out: Vec<&'static str> = Vec::with_capacity(multi.count());
    for idx in 0..multi.count() {
        let plain = multi.get(idx).plain();
        if !out.contains(&plain) {
            out.push(plain);
        }
    }
    out
}

/// Length of the syllable initial usable as an abbreviation (`zh`, `ch`, `sh` or one letter)
fn initial_len(syllable: &str) -> usize {
    if syllable.len() > 2
        && (syllable.starts_with("zh") || syllable.starts_with("ch") || syllable.starts_with("sh"))
    {
        2
    } else {
        1
    }
}

fn starts_with(rest: &[char], syllable: &str, n: usize) -> bool {
    rest.len() >= n && syllable.chars().take(n).eq(rest[..n].iter().copied())
}

/// Chars a match may pass over without consuming query text
fn skippable(c: char) -> bool {
    c.is_whitespace() || is_combining_mark(c)
}

/// Backtracking scan over one label. Failed `(position, query offset)` states
/// are remembered, so every state is explored at most once per label.
struct PinyinScan<'q> {
    text: Vec<char>,
    readings: Vec<Vec<&'static str>>,
    query: &'q [char],
    dead: HashSet<(usize, usize)>,
}

impl<'q> PinyinScan<'q> {
    fn new(text: &str, query: &'q [char]) -> Self {
        let text: Vec<char> = text
            .chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect();
        let readings = text.iter().map(|&c| readings(c)).collect();
        Self {
            text,
            readings,
            query,
            dead: HashSet::new(),
        }
    }

    fn run(&mut self) -> Option<MatchSpan> {
        for start in 0..self.text.len() {
            if skippable(self.text[start]) {
                continue;
            }
            if let Some(end) = self.consume(start, 0) {
                return Some(MatchSpan::new(start, end));
            }
        }
        None
    }

    /// Consume `query[qi..]` from text position `pos`; returns the last consumed position
    fn consume(&mut self, pos: usize, qi: usize) -> Option<usize> {
        if pos >= self.text.len() || self.dead.contains(&(pos, qi)) {
            return None;
        }

        let found = self.try_consume(pos, qi);
        if found.is_none() {
            self.dead.insert((pos, qi));
        }
        found
    }

    fn try_consume(&mut self, pos: usize, qi: usize) -> Option<usize> {
        let c = self.text[pos];
        let rest_len = self.query.len() - qi;

        // Only reachable inside a match: starts never land on skippable chars
        if skippable(c) {
            return self.consume(pos + 1, qi);
        }

        if c == self.query[qi] {
            if rest_len == 1 {
                return Some(pos);
            }
            if let Some(end) = self.consume(pos + 1, qi + 1) {
                return Some(end);
            }
        }

        for syllable in self.readings[pos].clone() {
            let full = syllable.len();
            let initial = initial_len(syllable);
            let takes = [Some(full), (initial < full).then_some(initial)];

            for take in takes.into_iter().flatten() {
                if !starts_with(&self.query[qi..], syllable, take) {
                    continue;
                }
                if take == rest_len {
                    return Some(pos);
                }
                if let Some(end) = self.consume(pos + 1, qi + take) {
                    return Some(end);
                }
            }

            // The tail of the query may stop partway through the last syllable
            if rest_len < full && starts_with(&self.query[qi..], syllable, rest_len) {
                return Some(pos);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, query: &str) -> Option<(usize, usize)> {
        PinyinMatcher::new()
            .match_span(text, query)
            .map(|s| (s.start, s.end))
    }

    #[test]
    fn test_latin_substring() {
        assert_eq!(span("Firefox", "fox"), Some((4, 6)));
        assert_eq!(span("Firefox", "fire"), Some((0, 3)));
        assert_eq!(span("Firefox", "firefox"), Some((0, 6)));
    }

    #[test]
    fn test_latin_case_insensitive() {
        assert_eq!(span("GitHub Desktop", "github"), Some((0, 5)));
        assert_eq!(span("github desktop", "GitHub"), Some((0, 5)));
    }

    #[test]
    fn test_query_whitespace_is_ignored() {
        assert_eq!(span("Visual Studio Code", "visual studio"), Some((0, 12)));
        assert_eq!(span("Visual Studio Code", "studiocode"), Some((7, 17)));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(span("Firefox", "xyz"), None);
        assert_eq!(span("GitHub Desktop", "gd"), None);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(span("Firefox", ""), None);
        assert_eq!(span("Firefox", "   "), None);
        assert_eq!(span("", "a"), None);
    }

    #[test]
    fn test_spans_count_chars_not_clusters() {
        // `e` + U+0301 is one cluster but two chars
        assert_eq!(span("Cafe\u{301}s", "Cafe\u{301}s"), Some((0, 5)));
        assert_eq!(span("Cafe\u{301}s", "cafes"), Some((0, 5)));
        assert_eq!(span("Cafe\u{301}s Bar", "bar"), Some((7, 9)));
        assert_eq!(span("Cafe\u{301}", "cafe"), Some((0, 4)));
    }

    #[test]
    fn test_emoji_variation_selector() {
        let label = "\u{2B50}\u{FE0F} Stars";
        assert_eq!(span(label, "stars"), Some((3, 7)));
        assert_eq!(span(label, label), Some((0, 7)));
        assert_eq!(span(label, "\u{2B50}"), Some((0, 1)));
    }

    #[test]
    fn test_cjk_literal() {
        assert_eq!(span("微信", "信"), Some((1, 1)));
        assert_eq!(span("微信", "微信"), Some((0, 1)));
    }

    #[test]
    fn test_pinyin_full_syllables() {
        assert_eq!(span("微信", "weixin"), Some((0, 1)));
        assert_eq!(span("微信", "WeiXin"), Some((0, 1)));
    }

    #[test]
    fn test_pinyin_initials() {
        assert_eq!(span("微信", "wx"), Some((0, 1)));
        assert_eq!(span("中国", "zhg"), Some((0, 1)));
        assert_eq!(span("中国", "zg"), Some((0, 1)));
    }

    #[test]
    fn test_pinyin_partial_last_syllable() {
        assert_eq!(span("微信", "weix"), Some((0, 1)));
        assert_eq!(span("微信", "we"), Some((0, 0)));
    }

    #[test]
    fn test_pinyin_match_not_at_start() {
        assert_eq!(span("腾讯微信", "wx"), Some((2, 3)));
    }

    #[test]
    fn test_mixed_latin_and_cjk() {
        assert_eq!(span("QQ音乐", "qqyy"), Some((0, 3)));
        assert_eq!(span("QQ音乐", "yinyue"), Some((2, 3)));
    }

    #[test]
    fn test_pinyin_no_match() {
        assert_eq!(span("微信", "qq"), None);
        assert_eq!(span("微信", "xw"), None);
    }

    #[test]
    fn test_match_is_deterministic() {
        let mut matcher = PinyinMatcher::new();
        let first = matcher.match_span("网易云音乐", "yyy");
        for _ in 0..10 {
            assert_eq!(matcher.match_span("网易云音乐", "yyy"), first);
        }
        assert!(first.is_some());
    }

    #[test]
    fn test_transliterate_cjk() {
        let matcher = PinyinMatcher::new();
        let result = matcher.transliterate("微信").unwrap();
        assert_eq!(result.units, vec!["微", "信"]);
        assert_eq!(result.syllables, vec!["wei", "xin"]);
    }

    #[test]
    fn test_transliterate_mixed() {
        let matcher = PinyinMatcher::new();
        let result = matcher.transliterate("QQ音乐").unwrap();
        assert_eq!(result.syllables.len(), 3);
        assert_eq!(result.syllables[0], "qq");
        assert_eq!(result.syllables[1], "yin");
        assert_eq!(result.units[0], "qq");
    }

    #[test]
    fn test_transliterate_skips_punctuation() {
        let matcher = PinyinMatcher::new();
        let result = matcher.transliterate("微信-Web版").unwrap();
        assert_eq!(result.syllables, vec!["wei", "xin", "web", "ban"]);
    }

    #[test]
    fn test_transliterate_rejects_latin() {
        let matcher = PinyinMatcher::new();
        let err = matcher.transliterate("Firefox").unwrap_err();
        assert!(matches!(err, Error::Transliteration(_)));
    }

    #[test]
    fn test_initial_len() {
        assert_eq!(initial_len("zhong"), 2);
        assert_eq!(initial_len("shi"), 2);
        assert_eq!(initial_len("xin"), 1);
        assert_eq!(initial_len("a"), 1);
    }

    #[test]
    fn test_readings_non_cjk_empty() {
        assert!(readings('a').is_empty());
        assert!(!readings('中').is_empty());
    }
}
