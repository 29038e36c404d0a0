use crate::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Flags accepted after the closing slash; only `i`, `m` and `s` change matching
const KNOWN_FLAGS: &str = "dgimsuy";

/// Compile a command pattern written as `/body/flags`.
///
/// A string that is not slash-delimited is used as the body with no flags.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] when the body is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let (body, flags) = split_pattern(pattern);

    RegexBuilder::new(body)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn split_pattern(pattern: &str) -> (&str, &str) {
    let Some(rest) = pattern.strip_prefix('/') else {
        return (pattern, "");
    };
    let Some(close) = rest.rfind('/') else {
        return (pattern, "");
    };

    let flags = &rest[close + 1..];
    if flags.chars().all(|c| KNOWN_FLAGS.contains(c)) {
        (&rest[..close], flags)
    } else {
        (pattern, "")
    }
}
