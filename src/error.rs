//! Error types for the docsieve library.

use std::io;
use thiserror::Error;

/// Result type alias for docsieve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during collection analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The text extraction collaborator failed for a document.
    #[error("Extraction failed for '{document}': {reason}")]
    Extraction {
        /// Filename of the affected document.
        document: String,
        /// Collaborator-reported reason.
        reason: String,
    },

    /// No document in the collection survived extraction.
    #[error("Collection '{0}' produced no usable documents")]
    EmptyCollection(String),

    /// The collection descriptor could not be parsed.
    #[error("Invalid collection descriptor: {0}")]
    Descriptor(String),

    /// Error during JSON serialization of results.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl Error {
    /// Build an extraction error for a document.
    pub fn extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Extraction {
            document: document.into(),
            reason: reason.into(),
        }
    }
}
