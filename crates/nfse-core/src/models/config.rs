//! Configuration structures for the extraction pipeline.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NfseError, Result};

/// Main configuration for the nfse pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NfseConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Batch file discovery configuration.
    pub discovery: DiscoveryConfig,

    /// Field validation configuration.
    pub validation: ValidationConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum trimmed text length for a PDF to count as having a text layer.
    pub min_text_length: usize,

    /// Time limit for extracting one document, in milliseconds (0 = unlimited).
    pub timeout_ms: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            timeout_ms: 30_000,
        }
    }
}

impl PdfConfig {
    /// Extraction time limit, or `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// Which files a batch run picks up from a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Accepted file extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Match extensions case-sensitively.
    pub case_sensitive: bool,

    /// Descend into subdirectories.
    pub recursive: bool,

    /// Sort discovered files by path instead of keeping directory order.
    pub sort_by_name: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string()],
            case_sensitive: false,
            recursive: false,
            sort_by_name: false,
        }
    }
}

impl DiscoveryConfig {
    /// Whether a path has one of the accepted extensions.
    ///
    /// Files without an extension never match.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        self.extensions.iter().any(|accepted| {
            let accepted = accepted.trim_start_matches('.');
            if self.case_sensitive {
                ext == accepted
            } else {
                ext.eq_ignore_ascii_case(accepted)
            }
        })
    }
}

/// Field validation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Also verify the two CNPJ check digits, not only its shape.
    pub verify_cnpj_checksum: bool,
}

impl NfseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would make every batch empty.
    pub fn check(&self) -> Result<()> {
        if self.discovery.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            return Err(NfseError::Config(
                "discovery.extensions must contain at least one extension".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_discovery_matches_pdf_any_case() {
        let discovery = DiscoveryConfig::default();
        assert!(discovery.matches(&PathBuf::from("nota.pdf")));
        assert!(discovery.matches(&PathBuf::from("NOTA.PDF")));
        assert!(!discovery.matches(&PathBuf::from("nota.txt")));
        assert!(!discovery.matches(&PathBuf::from("pdf")));
        assert!(!discovery.matches(&PathBuf::from("nota")));
    }

    #[test]
    fn test_case_sensitive_discovery() {
        let discovery = DiscoveryConfig {
            case_sensitive: true,
            ..Default::default()
        };
        assert!(discovery.matches(&PathBuf::from("nota.pdf")));
        assert!(!discovery.matches(&PathBuf::from("nota.PDF")));
    }

    #[test]
    fn test_timeout_zero_disables_bound() {
        let pdf = PdfConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(pdf.timeout(), None);
        assert_eq!(PdfConfig::default().timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NfseConfig =
            serde_json::from_str(r#"{"discovery": {"recursive": true}}"#).unwrap();
        assert!(config.discovery.recursive);
        assert_eq!(config.discovery.extensions, vec!["pdf".to_string()]);
        assert_eq!(config.pdf.timeout_ms, 30_000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NfseConfig::default();
        config.validation.verify_cnpj_checksum = true;
        config.save(&path).unwrap();

        let loaded = NfseConfig::from_file(&path).unwrap();
        assert!(loaded.validation.verify_cnpj_checksum);
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let mut config = NfseConfig::default();
        config.discovery.extensions = vec![".".to_string()];
        assert!(config.check().is_err());
    }
}
