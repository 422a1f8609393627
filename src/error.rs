//! Error types for the PDF bundler library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF bundler library
#[derive(Error, Debug)]
pub enum Error {
    /// A source document could not be decoded; the merge was aborted
    #[error("Cannot read document #{position} \"{title}\" ({name}): {source}")]
    DocumentUnreadable {
        /// 1-based position of the document in the bundle order
        position: usize,
        /// Original file name of the source
        name: String,
        /// Title the document carries in the bundle
        title: String,
        #[source]
        source: lopdf::Error,
    },

    /// Title page text could not be rendered
    #[error("Cannot render title page \"{text}\": {reason}")]
    Render { text: String, reason: String },

    /// No documents and no cover title, so there is no page to write
    #[error("Nothing to merge: add at least one document or a cover title")]
    NothingToMerge,

    /// A document handle is not part of the bundle
    #[error("Document not found in bundle: {0}")]
    NotFound(String),

    /// Several documents share the name used to pick one out
    #[error("{count} documents are named \"{name}\"")]
    AmbiguousName { name: String, count: usize },

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed bundle manifest
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),
}

impl Error {
    pub(crate) fn render(text: &str, reason: impl Into<String>) -> Self {
        Error::Render {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
