/*!
 * Error types for the xcstrings-tools application.
 *
 * This module contains custom error types for the catalog layer and the
 * application layer, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, inspecting or saving a string catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The catalog file is not valid JSON
    #[error("Failed to parse catalog {}: {source}", path.display())]
    Parse {
        /// Path of the file that failed to parse
        path: PathBuf,
        /// Underlying JSON error, carrying line and column
        #[source]
        source: serde_json::Error,
    },

    /// The catalog is valid JSON but does not have the expected shape
    #[error("Invalid catalog structure: {0}")]
    InvalidStructure(String),

    /// Serializing the catalog back to JSON failed
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading or writing the catalog file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// A required argument was missing or malformed
    #[error("Usage error: {0}")]
    Usage(String),

    /// The configuration file is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the catalog layer
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    /// Whether this error represents a path that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(CatalogError::NotFound(_)))
    }
}
