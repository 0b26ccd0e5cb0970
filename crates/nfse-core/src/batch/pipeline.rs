//! Single-document pipeline: extract, parse, validate, report.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{NfseError, Result};
use crate::invoice::{generate_report, InvoiceParser, InvoiceReport, NfseParser, Validator};
use crate::models::config::NfseConfig;
use crate::pdf::{extract_bounded, extract_pages_bounded, PdfExtractor, PdfPage, TextExtractor};

/// Runs one document through every processing stage.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    parser: NfseParser,
    validator: Validator,
    timeout: Option<Duration>,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::from_config(&NfseConfig::default())
    }

    /// Create a pipeline from configuration.
    pub fn from_config(config: &NfseConfig) -> Self {
        let extractor = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
        Self {
            extractor: Arc::new(extractor),
            parser: NfseParser::new(),
            validator: Validator::new()
                .with_cnpj_checksum(config.validation.verify_cnpj_checksum),
            timeout: config.pdf.timeout(),
        }
    }

    /// Replace the text source.
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the field parser, e.g. one with extra rules.
    pub fn with_parser(mut self, parser: NfseParser) -> Self {
        self.parser = parser;
        self
    }

    /// Set the extraction time limit (`None` waits indefinitely).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Process one PDF.
    ///
    /// Fails with [`NfseError::UnreadableDocument`] when no text can be
    /// obtained; missing fields are reported as problems, not errors.
    pub fn process_file(&self, path: &Path) -> Result<InvoiceReport> {
        debug!("Processing {}", path.display());
        let text = extract_bounded(&self.extractor, path, self.timeout)
            .map_err(|e| NfseError::unreadable(path, e))?;
        Ok(self.process_text(&text))
    }

    /// Per-page text under the same time limit as [`process_file`](Self::process_file).
    pub fn extract_pages(&self, path: &Path) -> Result<Vec<PdfPage>> {
        extract_pages_bounded(&self.extractor, path, self.timeout)
            .map_err(|e| NfseError::unreadable(path, e))
    }

    /// Parse and validate already extracted text.
    pub fn process_text(&self, text: &str) -> InvoiceReport {
        let fields = self.parser.parse(text);
        let problems = self.validator.validate(&fields);
        generate_report(fields, problems)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("parser", &self.parser)
            .field("validator", &self.validator)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
