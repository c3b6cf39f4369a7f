use sitemark_core::MarkdownError;
use thiserror::Error;

/// Errors surfaced by page and batch rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The markdown itself could not be parsed.
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
    /// Options could not be read.
    #[error("Invalid options: {0}")]
    Config(String),
    /// A dedicated thread pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}
