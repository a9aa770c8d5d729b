//! TyTo Core Engine
//!
//! Typo-tolerant substring search over a small, static, in-memory dictionary.
//! A query yields two disjoint lists:
//!
//! - **hits**: terms that contain the query (case-insensitive)
//! - **suggestions**: terms matched by a fuzzy offset pattern that are not
//!   hits, i.e. likely corrections of a typo
//!
//! # How matching works
//!
//! For a query of `L` characters the engine builds `L` patterns, one per
//! offset. The pattern at offset `i` is the literal prefix `query[..i]`,
//! followed by up to `window` arbitrary characters, followed by the literal
//! suffix `query[i + window..]`. Each pattern is scanned against the whole
//! dictionary on the engine's matcher pool; matches are collected in one
//! shared, deduplicated set, then partitioned and sorted by length.
//!
//! # Example
//!
//! ```rust
//! use tyto_core::{SearchEngine, SearchOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = SearchEngine::new(vec!["Germany".into(), "Romania".into()], None).unwrap();
//! let result = engine.search("Gremany", SearchOptions::new()).await;
//! assert!(result.hits.is_empty());
//! assert_eq!(result.suggestions, vec!["Germany"]);
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod session;

// Re-export main types at crate root
pub use config::{
    Anchoring, DisplayCase, EngineConfig, DEFAULT_MIN_QUERY_LEN, DEFAULT_PATTERN_SIZE_LIMIT,
    DEFAULT_WINDOW,
};
pub use dictionary::{Dictionary, DictionaryLoader};
pub use engine::{SearchEngine, SearchOptions, SearchResult, SearchStatus};
pub use error::{EngineError, Result};
pub use pattern::{offset_patterns, OffsetPattern};
pub use session::{SearchHandle, SearchSession};

pub use tokio_util::sync::CancellationToken;
