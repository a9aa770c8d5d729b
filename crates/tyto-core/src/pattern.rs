//! Offset pattern generation
//!
//! A query of `L` characters yields `L` patterns. The pattern for offset `i`
//! keeps the first `i` characters as a literal prefix, skips `window`
//! characters, and keeps the remainder as a literal suffix. Between the two it
//! allows up to `window` arbitrary characters, so a swapped, dropped or
//! inserted pair of characters near `i` still matches.

use regex::{Regex, RegexBuilder};

use crate::config::Anchoring;

/// Fuzzy-match pattern parts for one character offset of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPattern {
    pub offset: usize,
    pub prefix: String,
    pub suffix: String,
    pub window: usize,
}

impl OffsetPattern {
    /// Regex source with both literals escaped
    pub fn regex_source(&self, anchoring: Anchoring) -> String {
        let anchor = match anchoring {
            Anchoring::Anywhere => "",
            Anchoring::TermStart => "^",
        };
        format!(
            "{}{}.{{0,{}}}{}",
            anchor,
            regex::escape(&self.prefix),
            self.window,
            regex::escape(&self.suffix)
        )
    }

    /// Compile into a case-insensitive matcher
    pub fn compile(&self, anchoring: Anchoring, size_limit: usize) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.regex_source(anchoring))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .size_limit(size_limit)
            .build()
    }
}

/// One pattern per character offset of `query`
pub fn offset_patterns(query: &str, window: usize) -> Vec<OffsetPattern> {
    let chars: Vec<char> = query.chars().collect();
    let len = chars.len();

    (0..len)
        .map(|offset| {
            let suffix_start = offset + window;
            let suffix = if suffix_start <= len {
                chars[suffix_start..].iter().collect()
            } else {
                String::new()
            };
            OffsetPattern {
                offset,
                prefix: chars[..offset].iter().collect(),
                suffix,
                window,
            }
        })
        .collect()
}
