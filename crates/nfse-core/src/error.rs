//! Error types for the nfse-core library.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for the nfse library.
#[derive(Error, Debug)]
pub enum NfseError {
    /// The document is not a parsable PDF or has no usable text layer.
    #[error("unreadable document {}: {source}", file.display())]
    UnreadableDocument {
        file: PathBuf,
        #[source]
        source: PdfError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NfseError {
    /// Wrap a PDF failure with the path of the document that caused it.
    pub fn unreadable(file: impl Into<PathBuf>, source: PdfError) -> Self {
        Self::UnreadableDocument {
            file: file.into(),
            source,
        }
    }
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF has no extractable text (scanned image only).
    #[error("PDF has no extractable text layer")]
    NoTextLayer,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Extraction did not finish within the configured bound.
    #[error("text extraction timed out after {0:?}")]
    Timeout(Duration),

    /// Too many earlier extractions overran their limit and are still running.
    #[error("{0} timed-out extractions still running")]
    TooManyStalled(usize),

    /// The PDF library panicked while reading the document.
    #[error("PDF parser aborted: {0}")]
    Panicked(String),

    /// The file could not be read from disk.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the nfse library.
pub type Result<T> = std::result::Result<T, NfseError>;
