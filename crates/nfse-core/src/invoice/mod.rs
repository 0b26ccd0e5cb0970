//! Invoice field extraction, validation and reporting.

mod parser;
mod report;
pub mod rules;
mod validator;

pub use parser::NfseParser;
pub use report::{generate_report, InvoiceReport};
pub use rules::FieldRule;
pub use validator::Validator;

use crate::models::invoice::ExtractedFields;

/// Trait for invoice field extractors.
pub trait InvoiceParser {
    /// Extract fields from plain text.
    ///
    /// Fields that are not found are absent; this never fails.
    fn parse(&self, text: &str) -> ExtractedFields;
}
