//! Single-document rendering.

use crate::{Options, RenderError};
use serde::Serialize;
use sitemark_core::{MarkdownError, extract_title, parse_document};

/// A rendered document: its title and serialized body markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Text of the first `# ` heading, when there is one.
    pub title: Option<String>,
    /// Serialized node tree (a root `div`).
    pub html: String,
}

/// Renders one markdown document to a [`Page`].
///
/// Title extraction runs independently of tree building; a missing title is
/// only an error when [`Options::require_title`] is set.
pub fn render_page(markdown: &str, options: &Options) -> Result<Page, RenderError> {
    let root = parse_document(markdown)?;
    let html = root.to_html_with(options.escape());

    let title = match extract_title(markdown) {
        Ok(title) => Some(title),
        Err(MarkdownError::TitleNotFound) if !options.require_title => None,
        Err(err) => return Err(err.into()),
    };

    Ok(Page { title, html })
}
