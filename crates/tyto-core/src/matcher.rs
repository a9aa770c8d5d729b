//! Term scanning and the shared suggestion set
//!
//! Every offset matcher scans the whole dictionary and records matches in a
//! single [`SuggestionSet`]. The set is the only state shared between
//! concurrently running matchers and is guarded by one mutex.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::dictionary::Dictionary;

/// Deduplicated, optionally capped set of matched dictionary positions.
///
/// Terms are identified case-insensitively. When two dictionary entries fold
/// to the same key, the earlier one is kept regardless of which matcher found
/// it first, so the final content does not depend on scheduling.
#[derive(Debug)]
pub struct SuggestionSet {
    // folded term -> dictionary index
    entries: Mutex<HashMap<String, usize>>,
    saturated: AtomicBool,
    cap: Option<usize>,
}

impl SuggestionSet {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            saturated: AtomicBool::new(cap == Some(0)),
            cap,
        }
    }

    /// Record the term at `index`. Returns false if the term was new but the
    /// set is already full.
    pub fn insert(&self, dictionary: &Dictionary, index: usize) -> bool {
        let key = dictionary.folded(index);
        let mut entries = self.entries.lock();

        if let Some(existing) = entries.get_mut(key) {
            *existing = (*existing).min(index);
            return true;
        }

        if self.cap.is_some_and(|cap| entries.len() >= cap) {
            self.saturated.store(true, Ordering::Release);
            return false;
        }

        entries.insert(key.to_string(), index);
        if self.cap.is_some_and(|cap| entries.len() >= cap) {
            self.saturated.store(true, Ordering::Release);
        }
        true
    }

    /// True once the cap has been reached
    pub fn is_saturated(&self) -> bool {
        self.saturated.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dictionary positions currently in the set, in dictionary order
    pub fn snapshot(&self) -> Vec<usize> {
        let mut members: Vec<usize> = self.entries.lock().values().copied().collect();
        members.sort_unstable();
        members
    }
}

/// Result of scanning the dictionary with one pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Matching dictionary positions, in dictionary order
    pub matched: Vec<usize>,
    /// Scan ended before the last term (cap reached or cancelled)
    pub stopped_early: bool,
}

/// Scan every term with `pattern`, recording matches in `set`.
///
/// Stops as soon as the set is saturated or `cancel` fires.
pub fn scan(
    pattern: &Regex,
    dictionary: &Dictionary,
    set: &SuggestionSet,
    cancel: &CancellationToken,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for (index, term) in dictionary.terms().iter().enumerate() {
        if cancel.is_cancelled() || set.is_saturated() {
            outcome.stopped_early = true;
            break;
        }
        if pattern.is_match(term) {
            outcome.matched.push(index);
            set.insert(dictionary, index);
        }
    }

    outcome
}
