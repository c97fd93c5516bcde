//! Catalog error types for sleuth-catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the service catalog.
///
/// Lookups never error: an unknown service id yields empty results, because
/// the catalog is advisory rather than authoritative.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON or does not match the schema.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
