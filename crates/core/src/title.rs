use crate::error::MarkdownError;

/// Returns the text of the first top-level `# ` heading.
///
/// Only a single leading `#` counts; `## ` and deeper headings are skipped,
/// as are headings with no text.
///
/// # Examples
///
/// ```
/// use sitemark_core::extract_title;
///
/// assert_eq!(extract_title("# Hello\nbody").unwrap(), "Hello");
/// assert!(extract_title("no heading here").is_err());
/// ```
pub fn extract_title(markdown: &str) -> Result<String, MarkdownError> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(str::to_string)
        .ok_or(MarkdownError::TitleNotFound)
}
