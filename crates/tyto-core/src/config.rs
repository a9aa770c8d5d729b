//! Engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of "don't care" characters tolerated at each offset.
pub const DEFAULT_WINDOW: usize = 2;

/// Queries shorter than this carry too little signal for a 2-character gap.
pub const DEFAULT_MIN_QUERY_LEN: usize = 5;

/// Upper bound on the compiled size of a single offset pattern, in bytes.
pub const DEFAULT_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Where an offset pattern may start inside a term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchoring {
    /// Pattern may match anywhere in the term
    #[default]
    Anywhere,
    /// Pattern must match at the start of the term
    TermStart,
}

/// Display transform applied to result terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCase {
    /// Terms are returned exactly as supplied
    #[default]
    Preserve,
    /// First letter of each word upper-cased, the rest lower-cased
    Capitalized,
}

/// Configuration for the search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gap size (sensitivity) used by every offset pattern
    pub window: usize,
    /// Queries with fewer characters return an empty result
    pub min_query_len: usize,
    /// Default cap on hits + suggestions (None = unlimited)
    pub max_suggestions: Option<usize>,
    /// Default best-effort deadline for collecting matcher results
    pub timeout_ms: Option<u64>,
    /// Matcher pool size (0 = one thread per CPU)
    pub worker_threads: usize,
    /// Where offset patterns may match
    pub anchoring: Anchoring,
    /// Display transform applied at the aggregation boundary
    pub display: DisplayCase,
    /// Compiled size limit for a single offset pattern
    pub pattern_size_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            max_suggestions: None,
            timeout_ms: None,
            worker_threads: 0,
            anchoring: Anchoring::Anywhere,
            display: DisplayCase::Preserve,
            pattern_size_limit: DEFAULT_PATTERN_SIZE_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Default configuration with an optional sensitivity (window) override
    pub fn with_sensitivity(sensitivity: Option<usize>) -> Self {
        Self {
            window: sensitivity.unwrap_or(DEFAULT_WINDOW),
            ..Default::default()
        }
    }

    /// Default collection deadline as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if self.min_query_len == 0 {
            return Err(EngineError::InvalidConfig(
                "min_query_len must be at least 1".to_string(),
            ));
        }
        // With window >= query length the offset-0 pattern is a bare gap that
        // matches every term.
        if self.window >= self.min_query_len {
            return Err(EngineError::InvalidConfig(format!(
                "window ({}) must be smaller than min_query_len ({})",
                self.window, self.min_query_len
            )));
        }
        if self.pattern_size_limit == 0 {
            return Err(EngineError::InvalidConfig(
                "pattern_size_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
