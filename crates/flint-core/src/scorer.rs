//! Candidate classification and the best-match policy.

use crate::abbrev::abbreviation_matches;
use crate::matching::MatchPrimitives;
use flint_types::MatchSpan;

/// Labels up to this many characters count as a best match on a prefix hit alone
pub const BEST_MATCH_PREFIX_MAX_LEN: usize = 5;

/// How a query relates to one candidate label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub span: Option<MatchSpan>,

    /// Label length in characters
    pub label_len: usize,

    /// Query found in the label's abbreviation
    pub abbreviation: bool,
}

impl Score {
    /// Match `query` against `label` by span and by abbreviation
    pub fn evaluate<P: MatchPrimitives + ?Sized>(
        primitives: &mut P,
        label: &str,
        query: &str,
    ) -> Self {
        Self {
            span: primitives.match_span(label, query),
            label_len: label.chars().count(),
            abbreviation: abbreviation_matches(&*primitives, label, query),
        }
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.span.is_some() || self.abbreviation
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.span.is_some_and(|span| span.covers(self.label_len))
    }

    #[must_use]
    pub fn is_prefix(&self) -> bool {
        self.span.is_some_and(|span| span.is_prefix())
    }

    #[must_use]
    pub fn is_best_match(&self) -> bool {
        self.is_exact()
            || (self.is_prefix() && self.label_len <= BEST_MATCH_PREFIX_MAX_LEN)
            || self.abbreviation
    }
}

/// Ranking hint for command results: a span hit counts one up, a display
/// label distinct from the raw command counts one down.
#[must_use]
pub fn rank_hint(span_matched: bool, labelled: bool) -> i32 {
    i32::from(span_matched) - i32::from(labelled)
}
