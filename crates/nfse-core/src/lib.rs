//! Core library for Brazilian service invoice (NFS-e) PDF processing.
//!
//! This crate provides:
//! - PDF text extraction with a per-document time bound
//! - Rule-table extraction of eight invoice fields (issuer, CNPJ, number,
//!   issue date, amounts, service description)
//! - Completeness validation and reporting
//! - Directory batches with per-document failure isolation

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;

#[cfg(test)]
mod test_support;

pub use batch::{BatchProcessor, BatchRun, Pipeline};
pub use error::{NfseError, PdfError, Result};
pub use invoice::{generate_report, FieldRule, InvoiceParser, InvoiceReport, NfseParser, Validator};
pub use models::{DocumentResult, DocumentStatus, ExtractedFields, Field, NfseConfig, ValidationProblem};
pub use pdf::{PdfExtractor, TextExtractor};
