//! Final partition of collected matches into hits and suggestions
//!
//! This step is the only source of output ordering: members are sorted by
//! character length with dictionary order breaking ties, then split on
//! whether they literally contain the query.

use crate::config::DisplayCase;
use crate::dictionary::Dictionary;

/// Split `members` (dictionary positions) into `(hits, suggestions)`.
///
/// A hit is a term whose lowercase form contains the lowercase query; every
/// other member is a suggestion. Both lists are sorted ascending by length.
///
/// Hit detection uses full lowercasing (`str::to_lowercase`) while offset
/// patterns match with simple case folding. The two disagree on a few
/// characters such as Greek final sigma and dotted capital I, so a term like
/// `ΟΔΥΣΣΕΑΣ` found by `οδυσσεασ` is reported as a suggestion, not a hit.
pub fn finalize(
    dictionary: &Dictionary,
    mut members: Vec<usize>,
    query: &str,
    display: DisplayCase,
) -> (Vec<String>, Vec<String>) {
    let query_lower = query.to_lowercase();

    members.sort_by_key(|&index| (dictionary.terms()[index].chars().count(), index));

    let (hits, suggestions): (Vec<usize>, Vec<usize>) = members
        .into_iter()
        .partition(|&index| dictionary.folded(index).contains(&query_lower));

    let render = |index: usize| apply_display(&dictionary.terms()[index], display);
    (
        hits.into_iter().map(render).collect(),
        suggestions.into_iter().map(render).collect(),
    )
}

/// Apply the configured display transform to a term
pub fn apply_display(term: &str, display: DisplayCase) -> String {
    match display {
        DisplayCase::Preserve => term.to_string(),
        DisplayCase::Capitalized => capitalize_words(term),
    }
}

fn capitalize_words(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut word_start = true;
    for c in term.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
