//! Dictionary store
//!
//! The dictionary is an immutable, ordered list of terms. It is either
//! supplied up front or published once by a [`DictionaryLoader`]; searches
//! issued before publication wait for it (bounded by their own deadline and
//! cancellation). A loader dropped without publishing leaves the store empty.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Immutable ordered sequence of terms
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    terms: Vec<String>,
    // Lowercase versions for hit detection and deduplication (computed once)
    folded: Vec<String>,
}

impl Dictionary {
    /// Take ownership of the terms, preserving order and case
    pub fn new(terms: Vec<String>) -> Self {
        let folded = terms.iter().map(|t| t.to_lowercase()).collect();
        Self { terms, folded }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in dictionary order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Lowercase form of the term at `index`
    pub(crate) fn folded(&self, index: usize) -> &str {
        &self.folded[index]
    }
}

type Slot = Option<Arc<Dictionary>>;

/// Read side of the dictionary, shared by every search on an engine
#[derive(Debug, Clone)]
pub(crate) enum DictionaryStore {
    Ready(Arc<Dictionary>),
    Pending(watch::Receiver<Slot>),
}

impl DictionaryStore {
    pub(crate) fn ready(dictionary: Dictionary) -> Self {
        Self::Ready(Arc::new(dictionary))
    }

    pub(crate) fn pending() -> (Self, DictionaryLoader) {
        let (tx, rx) = watch::channel(None);
        (Self::Pending(rx), DictionaryLoader { tx })
    }

    /// Dictionary if it has been published
    pub(crate) fn snapshot(&self) -> Option<Arc<Dictionary>> {
        match self {
            Self::Ready(dictionary) => Some(dictionary.clone()),
            Self::Pending(rx) => rx.borrow().clone(),
        }
    }

    /// Wait until the dictionary is published.
    ///
    /// Resolves to an empty dictionary if the loader goes away first.
    pub(crate) async fn wait_ready(&self) -> Arc<Dictionary> {
        let mut rx = match self {
            Self::Ready(dictionary) => return dictionary.clone(),
            Self::Pending(rx) => rx.clone(),
        };

        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(dictionary) = current {
                return dictionary;
            }
            if rx.changed().await.is_err() {
                return rx
                    .borrow()
                    .clone()
                    .unwrap_or_else(|| Arc::new(Dictionary::default()));
            }
        }
    }
}

/// One-shot publisher for a dictionary loaded after engine construction
#[derive(Debug)]
pub struct DictionaryLoader {
    tx: watch::Sender<Slot>,
}

impl DictionaryLoader {
    /// Publish the terms. Consumes the loader, so the dictionary can be set
    /// at most once.
    pub fn publish(self, terms: Vec<String>) {
        let dictionary = Dictionary::new(terms);
        info!(terms = dictionary.len(), "Dictionary published");
        self.tx.send_replace(Some(Arc::new(dictionary)));
    }
}
