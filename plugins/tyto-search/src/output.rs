//! Result rendering

use serde::Serialize;
use tyto_core::{SearchResult, SearchStatus};

#[derive(Debug, Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    #[serde(flatten)]
    result: &'a SearchResult,
}

/// One JSON object per query
pub fn render_json(query: &str, result: &SearchResult) -> serde_json::Result<String> {
    serde_json::to_string(&QueryReport { query, result })
}

/// Human-readable block per query
pub fn render_text(query: &str, result: &SearchResult) -> String {
    let mut out = format!("{}\n", query);
    out.push_str(&format!("  hits: {}\n", join_or_none(&result.hits)));
    out.push_str(&format!("  suggestions: {}\n", join_or_none(&result.suggestions)));
    match result.status {
        SearchStatus::Complete => {}
        SearchStatus::TimedOut => out.push_str("  (partial: deadline elapsed)\n"),
        SearchStatus::Cancelled => out.push_str("  (partial: cancelled)\n"),
    }
    out
}

fn join_or_none(terms: &[String]) -> String {
    if terms.is_empty() {
        "(none)".to_string()
    } else {
        terms.join(", ")
    }
}
