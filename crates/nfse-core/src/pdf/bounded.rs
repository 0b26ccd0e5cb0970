//! Time-bounded text extraction.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::warn;

use super::{PdfPage, Result, TextExtractor};
use crate::error::PdfError;

/// Most extraction workers that may still be running after their caller gave up.
pub const MAX_STALLED_WORKERS: usize = 8;

static LIVE_WORKERS: AtomicUsize = AtomicUsize::new(0);

type Operation<T> = fn(&dyn TextExtractor, &Path) -> Result<T>;

/// Extract the whole text, waiting at most `timeout`.
///
/// With a limit the work runs on a worker thread; a worker that overruns is
/// left detached and its result dropped when it finishes. Once
/// [`MAX_STALLED_WORKERS`] such workers are still alive, further documents
/// fail with [`PdfError::TooManyStalled`] instead of spawning more. Without a
/// limit the extractor runs on the calling thread. Panics inside the
/// extractor come back as [`PdfError::Panicked`] either way.
pub fn extract_bounded(
    extractor: &Arc<dyn TextExtractor>,
    path: &Path,
    timeout: Option<Duration>,
) -> Result<String> {
    run_bounded(extractor, path, timeout, |e, p| e.extract_text(p), &LIVE_WORKERS, MAX_STALLED_WORKERS)
}

/// Per-page variant of [`extract_bounded`], with the same limits.
pub fn extract_pages_bounded(
    extractor: &Arc<dyn TextExtractor>,
    path: &Path,
    timeout: Option<Duration>,
) -> Result<Vec<PdfPage>> {
    run_bounded(extractor, path, timeout, |e, p| e.extract_pages(p), &LIVE_WORKERS, MAX_STALLED_WORKERS)
}

fn run_bounded<T: Send + 'static>(
    extractor: &Arc<dyn TextExtractor>,
    path: &Path,
    timeout: Option<Duration>,
    op: Operation<T>,
    live: &'static AtomicUsize,
    max_stalled: usize,
) -> Result<T> {
    let Some(limit) = timeout else {
        return contained(extractor.as_ref(), path, op);
    };

    // batches call this sequentially, so live workers are the stalled ones
    let stalled = live.load(Ordering::SeqCst);
    if stalled >= max_stalled {
        warn!("{} extraction workers still running, refusing {}", stalled, path.display());
        return Err(PdfError::TooManyStalled(stalled));
    }

    let (tx, rx) = mpsc::sync_channel(1);
    let worker = Arc::clone(extractor);
    let owned_path: PathBuf = path.to_path_buf();

    live.fetch_add(1, Ordering::SeqCst);
    let spawned = thread::Builder::new()
        .name("nfse-pdf".to_string())
        .spawn(move || {
            let _guard = LiveGuard(live);
            // receiver is gone after a timeout
            let _ = tx.send(contained(worker.as_ref(), &owned_path, op));
        });
    if let Err(e) = spawned {
        live.fetch_sub(1, Ordering::SeqCst);
        return Err(e.into());
    }

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            warn!("Text extraction of {} exceeded {:?}", path.display(), limit);
            Err(PdfError::Timeout(limit))
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(PdfError::Panicked("extraction worker exited".to_string()))
        }
    }
}

struct LiveGuard(&'static AtomicUsize);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn contained<T>(extractor: &dyn TextExtractor, path: &Path, op: Operation<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(|| op(extractor, path)))
        .unwrap_or_else(|payload| Err(PdfError::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
