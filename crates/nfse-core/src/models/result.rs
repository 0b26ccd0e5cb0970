//! Per-document outcomes and validation problems.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::invoice::{ExtractedFields, Field};
use crate::invoice::InvoiceReport;

/// A missing or ill-formed mandatory field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationProblem {
    /// Field the problem refers to.
    pub field: Field,
    /// Human-readable description.
    pub message: String,
}

impl ValidationProblem {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Whether the pipeline completed for a document.
///
/// `Success` says nothing about data completeness; see the problem list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Success,
    Error,
}

/// Outcome of processing one file in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    file_name: String,
    fields: ExtractedFields,
    problems: Vec<ValidationProblem>,
    status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl DocumentResult {
    /// Result for a document that went through the whole pipeline.
    pub fn success(file_name: impl Into<String>, report: InvoiceReport) -> Self {
        Self {
            file_name: file_name.into(),
            fields: report.fields,
            problems: report.problems,
            status: DocumentStatus::Success,
            error_message: None,
        }
    }

    /// Result for a document that could not be processed.
    pub fn failure(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "unknown error".to_string();
        }

        Self {
            file_name: file_name.into(),
            fields: ExtractedFields::default(),
            problems: Vec::new(),
            status: DocumentStatus::Error,
            error_message: Some(message),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    pub fn problems(&self) -> &[ValidationProblem] {
        &self.problems
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == DocumentStatus::Success
    }

    /// Pipeline completed and every mandatory field passed validation.
    pub fn is_complete(&self) -> bool {
        self.is_success() && self.problems.is_empty()
    }
}
