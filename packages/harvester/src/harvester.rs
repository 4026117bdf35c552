//! Main harvester service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use dodaward_extractor::{assemble, Extraction, Rules};

use crate::cache::{list_cached, source_ref_for};
use crate::error::Result;
use crate::html::parse_document;

/// A cached page that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Records and failures of a batch run, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchExtraction {
    pub extraction: Extraction,
    pub documents: usize,
    pub failures: Vec<DocumentFailure>,
}

impl BatchExtraction {
    fn absorb(&mut self, other: BatchExtraction) {
        self.extraction.absorb(other.extraction);
        self.documents += other.documents;
        self.failures.extend(other.failures);
    }
}

/// Read, parse and assemble one cached page.
///
/// The source reference is the canonical article link rebuilt from the
/// file name.
///
/// # Errors
/// Fails when the file cannot be read, the page lacks its title or body,
/// or the title carries no parseable date.
pub fn extract_file(path: &Path, rules: &Rules) -> Result<Extraction> {
    let html = fs::read_to_string(path)?;
    let document = parse_document(&html, &source_ref_for(path))?;
    Ok(assemble(&document, rules)?)
}

/// Extract every cached page of a directory.
///
/// # Errors
/// Fails only when the directory cannot be listed. Page failures are
/// recorded in the result.
pub fn extract_directory(
    dir: &Path,
    workers: usize,
    rules: &Rules,
    on_document: impl Fn(&Path) + Sync,
) -> Result<BatchExtraction> {
    let files = list_cached(dir)?;
    tracing::info!(dir = %dir.display(), files = files.len(), workers, "Extracting cached pages");
    Ok(extract_files(&files, workers, rules, on_document))
}

/// Extract a list of pages on up to `workers` scoped threads.
///
/// Each worker takes a contiguous run of files and fills its own
/// accumulator. The accumulators are merged in run order, so records come
/// out grouped by document in file order regardless of timing.
pub fn extract_files(
    files: &[PathBuf],
    workers: usize,
    rules: &Rules,
    on_document: impl Fn(&Path) + Sync,
) -> BatchExtraction {
    if files.is_empty() {
        return BatchExtraction::default();
    }

    let chunk_size = files.len().div_ceil(workers.max(1));
    let on_document = &on_document;

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| (chunk, scope.spawn(move || extract_run(chunk, rules, on_document))))
            .collect();

        let mut merged = BatchExtraction::default();
        for (chunk, handle) in handles {
            match handle.join() {
                Ok(partial) => merged.absorb(partial),
                Err(_) => {
                    tracing::error!(files = chunk.len(), "Worker panicked, dropping its pages");
                    merged.failures.extend(chunk.iter().map(|path| DocumentFailure {
                        path: path.clone(),
                        error: "worker panicked".to_string(),
                    }));
                }
            }
        }
        merged
    })
}

fn extract_run(files: &[PathBuf], rules: &Rules, on_document: &(impl Fn(&Path) + Sync)) -> BatchExtraction {
    let mut batch = BatchExtraction::default();

    for path in files {
        match extract_file(path, rules) {
            Ok(extraction) => {
                batch.extraction.absorb(extraction);
                batch.documents += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping page");
                batch.failures.push(DocumentFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
        on_document(path);
    }

    batch
}
