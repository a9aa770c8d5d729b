//! Callback delivery and type-ahead sessions

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::{SearchEngine, SearchOptions, SearchResult};

/// Handle to a search running in the background
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SearchHandle {
    /// Stop the search. The completion callback still runs once, with a
    /// cancelled status.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the completion callback to return
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "Search task did not complete");
        }
    }
}

impl SearchEngine {
    /// Run a search on the current Tokio runtime and hand the result to
    /// `on_done` exactly once.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_search<F>(
        &self,
        query: impl Into<String>,
        options: SearchOptions,
        on_done: F,
    ) -> SearchHandle
    where
        F: FnOnce(SearchResult) + Send + 'static,
    {
        let cancel = options.cancel.clone().unwrap_or_default();
        let options = SearchOptions {
            cancel: Some(cancel.clone()),
            ..options
        };
        let engine = self.clone();
        let query = query.into();

        let task = tokio::spawn(async move {
            let result = engine.search(&query, options).await;
            on_done(result);
        });

        SearchHandle { cancel, task }
    }
}

/// Type-ahead search session.
///
/// Each submitted query supersedes the previous one: the earlier search is
/// cancelled so its matchers stop scanning.
#[derive(Debug)]
pub struct SearchSession {
    engine: SearchEngine,
    options: SearchOptions,
    current: Mutex<Option<SearchHandle>>,
}

impl SearchSession {
    pub fn new(engine: SearchEngine) -> Self {
        Self::with_options(engine, SearchOptions::default())
    }

    /// Session whose searches use `options` (any cancel token is ignored;
    /// each search gets its own)
    pub fn with_options(engine: SearchEngine, options: SearchOptions) -> Self {
        Self {
            engine,
            options: SearchOptions {
                cancel: None,
                ..options
            },
            current: Mutex::new(None),
        }
    }

    /// Cancel the in-flight search, if any, and start a new one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit<F>(&self, query: impl Into<String>, on_done: F)
    where
        F: FnOnce(SearchResult) + Send + 'static,
    {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            previous.cancel();
        }
        *current = Some(
            self.engine
                .spawn_search(query, self.options.clone(), on_done),
        );
    }

    /// Cancel the in-flight search, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.current.lock().as_ref() {
            handle.cancel();
        }
    }

    /// Wait for the most recently submitted search to deliver its result
    pub async fn finish(&self) {
        let handle = self.current.lock().take();
        if let Some(handle) = handle {
            handle.join().await;
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
