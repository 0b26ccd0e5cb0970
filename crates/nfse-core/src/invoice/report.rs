//! Combined extraction and validation report.

use std::fmt;

use serde::Serialize;

use crate::models::invoice::ExtractedFields;
use crate::models::result::ValidationProblem;

/// Extracted fields together with their validation problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceReport {
    /// Extracted values.
    pub fields: ExtractedFields,
    /// Problems found by the validator, in check order.
    pub problems: Vec<ValidationProblem>,
}

impl InvoiceReport {
    /// Whether every mandatory field passed validation.
    pub fn is_complete(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Combine fields and problems into one report.
pub fn generate_report(fields: ExtractedFields, problems: Vec<ValidationProblem>) -> InvoiceReport {
    InvoiceReport { fields, problems }
}

impl fmt::Display for InvoiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.fields.iter() {
            writeln!(f, "{}: {}", field, value.unwrap_or("N/A"))?;
        }

        if !self.problems.is_empty() {
            writeln!(f)?;
            writeln!(f, "Problems:")?;
            for problem in &self.problems {
                writeln!(f, "  - {}", problem)?;
            }
        }
        Ok(())
    }
}
