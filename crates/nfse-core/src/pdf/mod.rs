//! PDF text extraction module.

mod bounded;
mod extractor;

pub use bounded::{extract_bounded, extract_pages_bounded, MAX_STALLED_WORKERS};
pub use extractor::{LoadedPdf, PdfExtractor, PdfPage};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of a document's plain text.
///
/// Implementations must be shareable across threads because extraction runs
/// on a worker thread under a time bound.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the whole document as one string.
    fn extract_text(&self, path: &Path) -> Result<String>;

    /// Extract text page by page. Sources without page structure return the
    /// whole text as page 1.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PdfPage>> {
        Ok(vec![PdfPage {
            number: 1,
            text: self.extract_text(path)?,
        }])
    }
}
