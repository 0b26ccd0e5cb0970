//! Directory batch processing with per-document failure isolation.

mod discovery;
mod pipeline;

pub use discovery::discover;
pub use pipeline::Pipeline;

use std::path::{Path, PathBuf};
use std::vec;

use tracing::{info, warn};

use crate::error::{NfseError, Result};
use crate::models::config::{DiscoveryConfig, NfseConfig};
use crate::models::result::DocumentResult;

/// Processes every matching file of a directory.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    pipeline: Pipeline,
    discovery: DiscoveryConfig,
}

impl BatchProcessor {
    /// Create a processor with the given pipeline and discovery policy.
    pub fn new(pipeline: Pipeline, discovery: DiscoveryConfig) -> Self {
        Self { pipeline, discovery }
    }

    /// Create a processor from configuration.
    pub fn from_config(config: &NfseConfig) -> Self {
        Self::new(Pipeline::from_config(config), config.discovery.clone())
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Discover the input files and return an iterator that processes them
    /// one at a time.
    ///
    /// Only discovery can fail; per-document failures become
    /// [`DocumentResult`]s with an error status.
    pub fn run(&self, dir: &Path) -> Result<BatchRun<'_>> {
        let files = discover(dir, &self.discovery)?;
        info!("Processing {} files from {}", files.len(), dir.display());
        Ok(BatchRun {
            pipeline: &self.pipeline,
            root: dir.to_path_buf(),
            files: files.into_iter(),
        })
    }

    /// Process the whole directory and collect the results in order.
    pub fn process_directory(&self, dir: &Path) -> Result<Vec<DocumentResult>> {
        Ok(self.run(dir)?.collect())
    }
}

/// Lazily processes the files of one batch, yielding one result per file.
#[derive(Debug)]
pub struct BatchRun<'a> {
    pipeline: &'a Pipeline,
    root: PathBuf,
    files: vec::IntoIter<PathBuf>,
}

impl BatchRun<'_> {
    /// Path of the next file to be processed.
    pub fn peek_path(&self) -> Option<&Path> {
        self.files.as_slice().first().map(PathBuf::as_path)
    }

    fn display_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Iterator for BatchRun<'_> {
    type Item = DocumentResult;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        let file_name = self.display_name(&path);

        let result = match self.pipeline.process_file(&path) {
            Ok(report) => DocumentResult::success(file_name, report),
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                let message = match e {
                    NfseError::UnreadableDocument { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                DocumentResult::failure(file_name, message)
            }
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

impl ExactSizeIterator for BatchRun<'_> {}
