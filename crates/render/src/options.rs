//! Rendering options.

use crate::RenderError;
use serde::Deserialize;
use sitemark_core::Escape;

/// Options shared by single-page and batch rendering.
///
/// Every field has a default, so `{}` is a valid configuration. camelCase
/// spellings are accepted alongside the snake_case field names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options {
    /// Encode `<`, `&` and quotes in text and attribute values.
    #[serde(default, alias = "escapeHtml")]
    pub escape_html: bool,
    /// Fail a page that has no `# ` title.
    #[serde(default = "default_true", alias = "requireTitle")]
    pub require_title: bool,
    /// Keep rendering the rest of a batch after a document fails.
    #[serde(default = "default_true", alias = "continueOnError")]
    pub continue_on_error: bool,
    /// Size of a dedicated thread pool for batches; the global pool otherwise.
    #[serde(default, alias = "maxThreads")]
    pub max_threads: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            escape_html: false,
            require_title: default_true(),
            continue_on_error: default_true(),
            max_threads: None,
        }
    }
}

impl Options {
    /// Reads options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|err| RenderError::Config(err.to_string()))
    }

    /// Escaping mode to serialize with.
    pub fn escape(&self) -> Escape {
        if self.escape_html {
            Escape::Html
        } else {
            Escape::None
        }
    }
}
