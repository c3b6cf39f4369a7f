use thiserror::Error;

/// Errors that can occur while turning markdown into a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// The document is structurally broken and cannot be parsed.
    #[error("Malformed markdown ({reason}): {text:?}")]
    MalformedMarkdown {
        /// What went wrong
        reason: String,
        /// The offending span or block text
        text: String,
    },
    /// No top-level `# ` heading was found.
    #[error("Title not found: document has no `# ` heading")]
    TitleNotFound,
}

impl MarkdownError {
    /// Create an error for a delimiter that is opened but never closed
    pub fn unterminated(delimiter: &str, text: impl Into<String>) -> Self {
        Self::MalformedMarkdown {
            reason: format!("unterminated {:?} delimiter", delimiter),
            text: text.into(),
        }
    }

    /// Create an error for an ordered list whose numbering is not 1, 2, 3, ...
    pub fn list_numbering(expected: usize, text: impl Into<String>) -> Self {
        Self::MalformedMarkdown {
            reason: format!("ordered list item {} is out of sequence", expected),
            text: text.into(),
        }
    }

    /// Returns the offending text for malformed input, if any.
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            MarkdownError::MalformedMarkdown { text, .. } => Some(text),
            MarkdownError::TitleNotFound => None,
        }
    }
}
