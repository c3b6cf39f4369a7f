#![deny(missing_docs)]
//! sitemark rendering: markdown documents to titled HTML pages, one at a time
//! or in parallel batches.

/// Parallel batch rendering.
pub mod batch;
/// Render error type.
pub mod error;
/// Rendering options.
pub mod options;
/// Single-page rendering.
pub mod page;

pub use batch::{BatchInput, BatchOutcome, BatchResult, BatchStats, render_batch};
pub use error::RenderError;
pub use options::Options;
pub use page::{Page, render_page};
