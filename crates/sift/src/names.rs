//! JSON-backed name sources.
//!
//! Loads the tag/category/user/field-name lists the suggestion resolver
//! consults from a JSON file of the shape
//! `{"tags": [...], "categories": [...], "users": [...], "field_names": [...]}`.
//! All keys are optional.

use std::{fs, path::Path};

use sift_query::InMemoryNames;
use thiserror::Error;

/// Errors from loading a name-source file.
#[derive(Debug, Error)]
pub enum NamesError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The offending path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// The offending path.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Loads an [`InMemoryNames`] from a JSON file.
pub fn load_names(path: &Path) -> Result<InMemoryNames, NamesError> {
    let contents = fs::read_to_string(path).map_err(|source| NamesError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| NamesError::Json {
        path: path.display().to_string(),
        source,
    })
}
