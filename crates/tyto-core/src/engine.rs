//! SearchEngine - query orchestration
//!
//! A search runs through these phases:
//! 1. Validate: queries shorter than `min_query_len` return an empty result.
//! 2. Dispatch: one offset pattern per query character, each scanned on the
//!    engine's matcher pool against the whole dictionary.
//! 3. Collect: wait for every matcher, the deadline, or cancellation,
//!    whichever comes first.
//! 4. Finalize: partition and sort whatever the shared set holds.
//!
//! Nothing in a search is fatal. Patterns that fail to compile, matchers that
//! panic and deadlines all degrade to fewer matches.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::aggregate;
use crate::config::{Anchoring, EngineConfig};
use crate::dictionary::{Dictionary, DictionaryLoader, DictionaryStore};
use crate::error::{EngineError, Result};
use crate::matcher::{self, SuggestionSet};
use crate::pattern::{offset_patterns, OffsetPattern};

/// How a search ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Every offset matcher finished
    #[default]
    Complete,
    /// Deadline elapsed; result holds what was collected so far
    TimedOut,
    /// Cancellation token fired; result holds what was collected so far
    Cancelled,
}

/// Hits and suggestions for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Terms containing the query (case-insensitive), shortest first
    pub hits: Vec<String>,
    /// Fuzzy matches that are not hits, shortest first
    pub suggestions: Vec<String>,
    pub status: SearchStatus,
}

impl SearchResult {
    fn interrupted(status: SearchStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Total number of terms returned
    pub fn len(&self) -> usize {
        self.hits.len() + self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.suggestions.is_empty()
    }

    /// True if the search stopped before all matchers finished
    pub fn is_partial(&self) -> bool {
        self.status != SearchStatus::Complete
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.hits, self.suggestions)
    }
}

/// Per-call search options. Unset values fall back to the engine config.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Cap on hits + suggestions
    pub max_suggestions: Option<usize>,
    /// Best-effort deadline for collecting matcher results
    pub timeout: Option<Duration>,
    /// Token that stops this search (and its matchers) when cancelled
    pub cancel: Option<CancellationToken>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = Some(max);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Completion report sent by each offset matcher
#[derive(Debug)]
struct UnitReport {
    offset: usize,
    matched: usize,
    stopped_early: bool,
}

/// Typo-tolerant search engine over an immutable dictionary.
///
/// Cloning is cheap: clones share the dictionary and the matcher pool, and
/// any number of searches may run concurrently on one engine.
#[derive(Clone)]
pub struct SearchEngine {
    store: DictionaryStore,
    config: EngineConfig,
    pool: Arc<ThreadPool>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}

impl SearchEngine {
    /// Create an engine over `terms` with an optional sensitivity (window)
    pub fn new(terms: Vec<String>, sensitivity: Option<usize>) -> Result<Self> {
        Self::with_config(terms, EngineConfig::with_sensitivity(sensitivity))
    }

    /// Create an engine with custom configuration and its own matcher pool
    pub fn with_config(terms: Vec<String>, config: EngineConfig) -> Result<Self> {
        let pool = Arc::new(build_pool(config.worker_threads)?);
        Self::with_pool(terms, config, pool)
    }

    /// Create an engine that runs matchers on a caller-supplied pool
    pub fn with_pool(
        terms: Vec<String>,
        config: EngineConfig,
        pool: Arc<ThreadPool>,
    ) -> Result<Self> {
        config.validate()?;
        let store = DictionaryStore::ready(Dictionary::new(terms));
        debug!(terms = store.snapshot().map_or(0, |d| d.len()), "Search engine created");
        Ok(Self {
            store,
            config,
            pool,
        })
    }

    /// Create an engine whose dictionary is published later.
    ///
    /// Searches issued before [`DictionaryLoader::publish`] wait for it,
    /// bounded by their deadline and cancellation. Dropping the loader
    /// without publishing leaves the engine with an empty dictionary.
    pub fn pending(config: EngineConfig) -> Result<(Self, DictionaryLoader)> {
        config.validate()?;
        let pool = Arc::new(build_pool(config.worker_threads)?);
        let (store, loader) = DictionaryStore::pending();
        Ok((
            Self {
                store,
                config,
                pool,
            },
            loader,
        ))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True once the dictionary is available
    pub fn is_ready(&self) -> bool {
        self.store.snapshot().is_some()
    }

    /// Number of terms, or 0 while the dictionary is still loading
    pub fn term_count(&self) -> usize {
        self.store.snapshot().map_or(0, |d| d.len())
    }

    /// Search the dictionary for `query`.
    ///
    /// Never fails; problems show up as fewer matches and, for deadlines and
    /// cancellation, in [`SearchResult::status`].
    pub async fn search(&self, query: &str, options: SearchOptions) -> SearchResult {
        let started = std::time::Instant::now();

        let query_len = query.chars().count();
        if query_len < self.config.min_query_len {
            debug!(
                query_len,
                min_query_len = self.config.min_query_len,
                "Query too short for typo detection"
            );
            return SearchResult::default();
        }

        let cap = options.max_suggestions.or(self.config.max_suggestions);
        if cap == Some(0) {
            return SearchResult::default();
        }

        let deadline = options
            .timeout
            .or_else(|| self.config.timeout())
            .map(|timeout| Instant::now() + timeout);
        let cancel = options.cancel.unwrap_or_default();

        let dictionary = tokio::select! {
            biased;
            _ = cancel.cancelled() => return SearchResult::interrupted(SearchStatus::Cancelled),
            _ = sleep_until(deadline) => {
                debug!("Deadline elapsed while waiting for dictionary");
                return SearchResult::interrupted(SearchStatus::TimedOut);
            }
            dictionary = self.store.wait_ready() => dictionary,
        };
        if dictionary.is_empty() {
            return SearchResult::default();
        }

        // Matchers observe this token; it fires when the search ends early,
        // when the caller cancels, or when this future is dropped.
        let units = cancel.child_token();
        let _units_guard = units.clone().drop_guard();

        let set = Arc::new(SuggestionSet::new(cap));
        let patterns = offset_patterns(query, self.config.window);
        let dispatched = patterns.len();
        let (tx, mut rx) = mpsc::unbounded_channel();

        debug!(offsets = dispatched, terms = dictionary.len(), "Dispatching offset matchers");
        for pattern in patterns {
            let dictionary = dictionary.clone();
            let set = set.clone();
            let units = units.clone();
            let tx = tx.clone();
            let anchoring = self.config.anchoring;
            let size_limit = self.config.pattern_size_limit;

            self.pool.spawn(move || {
                let report = run_unit(&pattern, anchoring, size_limit, &dictionary, &set, &units);
                // Receiver is gone if the search already finished
                let _ = tx.send(report);
            });
        }
        drop(tx);

        let status = collect(&mut rx, dispatched, deadline, &cancel).await;

        let (hits, suggestions) =
            aggregate::finalize(&dictionary, set.snapshot(), query, self.config.display);

        debug!(
            hits = hits.len(),
            suggestions = suggestions.len(),
            status = ?status,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Search finished"
        );

        SearchResult {
            hits,
            suggestions,
            status,
        }
    }
}

/// Compile one offset pattern and scan the dictionary with it
fn run_unit(
    pattern: &OffsetPattern,
    anchoring: Anchoring,
    size_limit: usize,
    dictionary: &Dictionary,
    set: &SuggestionSet,
    cancel: &CancellationToken,
) -> UnitReport {
    let regex = match pattern.compile(anchoring, size_limit) {
        Ok(regex) => regex,
        Err(err) => {
            warn!(
                offset = pattern.offset,
                error = %err,
                "Offset pattern failed to compile; skipping"
            );
            return UnitReport {
                offset: pattern.offset,
                matched: 0,
                stopped_early: false,
            };
        }
    };

    let outcome = matcher::scan(&regex, dictionary, set, cancel);
    UnitReport {
        offset: pattern.offset,
        matched: outcome.matched.len(),
        stopped_early: outcome.stopped_early,
    }
}

/// Wait for all matcher reports, the deadline, or cancellation
async fn collect(
    rx: &mut mpsc::UnboundedReceiver<UnitReport>,
    dispatched: usize,
    deadline: Option<Instant>,
    cancel: &CancellationToken,
) -> SearchStatus {
    let deadline = sleep_until(deadline);
    tokio::pin!(deadline);

    let mut received = 0;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(received, dispatched, "Search cancelled");
                return SearchStatus::Cancelled;
            }
            report = rx.recv() => match report {
                Some(report) => {
                    received += 1;
                    trace!(
                        offset = report.offset,
                        matched = report.matched,
                        stopped_early = report.stopped_early,
                        "Offset matcher finished"
                    );
                }
                None => {
                    if received < dispatched {
                        warn!(
                            lost = dispatched - received,
                            "Offset matchers exited without reporting"
                        );
                    }
                    return SearchStatus::Complete;
                }
            },
            _ = &mut deadline => {
                debug!(received, dispatched, "Search deadline elapsed");
                return SearchStatus::TimedOut;
            }
        }
    }
}

/// Sleep until `deadline`, or forever if there is none
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn build_pool(threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("tyto-matcher-{}", i))
        .panic_handler(|payload| {
            warn!(
                panic = panic_message(payload.as_ref()),
                "Offset matcher panicked; its offset contributes no matches"
            );
        })
        .build()
        .map_err(|e| EngineError::WorkerPool(e.to_string()))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
