//! Data models for extracted invoices, results and configuration.

pub mod config;
pub mod invoice;
pub mod result;

pub use config::{DiscoveryConfig, NfseConfig, PdfConfig, ValidationConfig};
pub use invoice::{ExtractedFields, Field};
pub use result::{DocumentResult, DocumentStatus, ValidationProblem};
