//! Loading dictionary terms from JSON
//!
//! Terms live in a JSON document as an array of strings under a dotted key
//! path, e.g. `{"countries": ["Albania", ...]}` with key path `countries`, or
//! `{"data": {"countries": [...]}}` with `data.countries`. An empty key path
//! means the document itself is the array.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tyto_core::DictionaryLoader;

use crate::error::{Error, Result};

/// Parse terms from JSON bytes
pub fn terms_from_json(data: &[u8], key_path: &str) -> Result<Vec<String>> {
    let document: Value = serde_json::from_slice(data)?;
    terms_at(&document, key_path)
}

/// Read and parse terms from a JSON file
pub fn terms_from_json_file(path: impl AsRef<Path>, key_path: &str) -> Result<Vec<String>> {
    let data = std::fs::read(path.as_ref())?;
    terms_from_json(&data, key_path)
}

/// Extract the string array at `key_path`
pub fn terms_at(document: &Value, key_path: &str) -> Result<Vec<String>> {
    let mut node = document;
    for key in key_path.split('.').filter(|k| !k.is_empty()) {
        node = node.get(key).ok_or_else(|| Error::KeyPath {
            key_path: key_path.to_string(),
        })?;
    }

    let not_strings = || Error::NotStrings {
        key_path: key_path.to_string(),
    };
    node.as_array()
        .ok_or_else(not_strings)?
        .iter()
        .map(|value| value.as_str().map(str::to_string).ok_or_else(not_strings))
        .collect()
}

/// Load terms from a JSON file on a blocking task and publish them.
///
/// A file that cannot be read or parsed is logged and published as an empty
/// dictionary, so waiting searches resolve instead of hanging.
pub fn spawn_json_file_load(
    loader: DictionaryLoader,
    path: PathBuf,
    key_path: String,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let terms = match terms_from_json_file(&path, &key_path) {
            Ok(terms) => {
                info!(
                    path = %path.display(),
                    key_path = %key_path,
                    terms = terms.len(),
                    "Loaded terms"
                );
                terms
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    key_path = %key_path,
                    error = %err,
                    "Failed to load terms; using empty dictionary"
                );
                Vec::new()
            }
        };
        loader.publish(terms);
    })
}
