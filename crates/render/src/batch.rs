//! Parallel rendering of many independent documents.

use crate::page::{Page, render_page};
use crate::{Options, RenderError};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// One document to render.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Caller-chosen identifier (typically the source path).
    pub id: String,
    /// Markdown source.
    pub source: String,
}

impl BatchInput {
    /// Creates a batch input.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// Outcome for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered page (present on success).
    pub page: Option<Page>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Counters for a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    /// Number of documents submitted.
    pub total: usize,
    /// Number rendered successfully.
    pub succeeded: usize,
    /// Number that failed.
    pub failed: usize,
    /// Wall-clock time in milliseconds.
    pub elapsed_ms: f64,
}

/// All per-document results (in input order) plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// One entry per processed input.
    pub results: Vec<BatchResult>,
    /// Run statistics.
    pub stats: BatchStats,
}

/// Renders every input, in parallel unless `continue_on_error` is off.
///
/// With `continue_on_error` disabled, documents are rendered sequentially
/// and processing stops after the first failure, so `results` may be shorter
/// than `inputs`.
pub fn render_batch(
    inputs: Vec<BatchInput>,
    options: &Options,
) -> Result<BatchOutcome, RenderError> {
    let start = Instant::now();
    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match render_page(&input.source, options) {
            Ok(page) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    page: Some(page),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::warn!("failed to render {}: {}", input.id, err);
                BatchResult {
                    id: input.id,
                    page: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if options.continue_on_error {
        match options.max_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|err| RenderError::ThreadPool(err.to_string()))?;
                pool.install(|| inputs.into_par_iter().map(process_input).collect())
            }
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.error.is_some();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    let elapsed = start.elapsed();
    log::debug!("rendered {} documents in {:?}", results.len(), elapsed);

    Ok(BatchOutcome {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        },
    })
}
