//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// Text-layer extractor for PDF files. No OCR fallback.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    min_text_length: usize,
}

/// A parsed PDF held in memory.
pub struct LoadedPdf {
    document: Document,
    raw_data: Vec<u8>,
}

/// Text from a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { min_text_length: 1 }
    }

    /// Set the minimum amount of text a document needs to count as readable.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length.max(1);
        self
    }

    /// Read and parse a PDF file.
    ///
    /// The file is read in one call so the handle is closed before parsing starts.
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let data = std::fs::read(path)?;
        trace!("Read {} bytes from {}", data.len(), path.display());
        LoadedPdf::from_bytes(&data)
    }

    fn has_text(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_text_length
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let pdf = self.load(path)?;
        let text = pdf.extract_text()?;

        if !self.has_text(&text) {
            debug!(
                "{} has {} chars of text, treating as image-only",
                path.display(),
                text.trim().len()
            );
            return Err(PdfError::NoTextLayer);
        }

        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }

    /// Same engine as [`extract_text`](Self::extract_text), split at page
    /// boundaries. Blank pages come back with empty text.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PdfPage>> {
        let pdf = self.load(path)?;
        let pages: Vec<PdfPage> = pdf
            .extract_pages_text()?
            .into_iter()
            .zip(1..)
            .map(|(text, number)| PdfPage { number, text })
            .collect();

        if pages.iter().all(|p| !self.has_text(&p.text)) {
            return Err(PdfError::NoTextLayer);
        }
        Ok(pages)
    }
}

impl LoadedPdf {
    /// Parse a PDF from bytes, decrypting documents protected by an empty password.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        if document.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", document.get_pages().len());
        Ok(Self { document, raw_data })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Text of the whole document, pages concatenated.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Text of every page, in page order.
    pub fn extract_pages_text(&self) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Text of a single page (1-indexed).
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        self.extract_pages_text()?
            .into_iter()
            .nth(page as usize - 1)
            .ok_or(PdfError::InvalidPage(page))
    }
}
