//! # TyTo Shared Rust Library
//!
//! Collaborators around the `tyto-core` engine:
//! - **terms**: load dictionary terms from JSON data or files
//! - **error**: common error types
//! - **tracing**: logging setup for binaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tyto::terms::spawn_json_file_load;
//! use tyto_core::{EngineConfig, SearchEngine, SearchOptions};
//!
//! let (engine, loader) = SearchEngine::pending(EngineConfig::default())?;
//! spawn_json_file_load(loader, "countries.json".into(), "countries".into());
//! let result = engine.search("Gremany", SearchOptions::new()).await;
//! ```

pub mod error;
pub mod terms;
pub mod tracing;

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use terms::{spawn_json_file_load, terms_from_json, terms_from_json_file};
