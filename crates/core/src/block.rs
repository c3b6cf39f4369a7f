//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines ([`segment`]), and each block
//! is then given a [`BlockKind`] by looking at its boundary lines
//! ([`classify`]). Only ordered lists get their interior lines checked; other
//! blocks are trusted to be well-formed past their first (and, for fences,
//! last) line.

use crate::error::MarkdownError;
use serde::Serialize;

/// Opening and closing marker of a fenced code block.
pub const FENCE: &str = "```";

/// Structural type of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    /// `#` to `######` heading.
    Heading {
        /// Number of leading `#` characters (1-6).
        level: u8,
    },
    /// Fenced code block.
    Code {
        /// Info string after the opening fence, if any.
        lang: Option<String>,
    },
    /// `> ` quote.
    Quote,
    /// `* ` list.
    UnorderedList,
    /// `1. ` list.
    OrderedList,
    /// Anything else.
    Paragraph,
}

/// A run of non-blank lines together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Lines of the block joined by `\n`, trailing whitespace removed.
    pub raw: String,
    /// Structural type.
    pub kind: BlockKind,
}

impl Block {
    /// Creates a block from raw text and its kind.
    pub fn new(raw: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            raw: raw.into(),
            kind,
        }
    }

    /// Iterates over the block's lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.split('\n')
    }
}

impl From<(String, BlockKind)> for Block {
    fn from((raw, kind): (String, BlockKind)) -> Self {
        Self { raw, kind }
    }
}

/// Splits a document into blocks of consecutive non-blank lines.
///
/// Trailing whitespace is trimmed from every line. A blank line or the end of
/// the document closes the current block; no empty blocks are produced.
pub fn segment(document: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in document.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    // The document need not end with a blank line.
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Classifies a single block by its boundary lines.
///
/// Fails only for ordered lists whose items are not numbered 1, 2, 3, ...
pub fn classify(block: &str) -> Result<BlockKind, MarkdownError> {
    let mut lines = block.split('\n');
    let first = lines.next().unwrap_or_default();
    let last = lines.next_back();

    if let Some(level) = heading_level(first) {
        return Ok(BlockKind::Heading { level });
    }

    if let Some(last) = last
        && first.starts_with(FENCE)
        && last.starts_with(FENCE)
    {
        let lang = first[FENCE.len()..].trim();
        return Ok(BlockKind::Code {
            lang: (!lang.is_empty()).then(|| lang.to_string()),
        });
    }

    if first.starts_with("> ") {
        return Ok(BlockKind::Quote);
    }

    if first.starts_with("* ") {
        return Ok(BlockKind::UnorderedList);
    }

    if starts_ordered_item(first) {
        validate_numbering(block)?;
        return Ok(BlockKind::OrderedList);
    }

    Ok(BlockKind::Paragraph)
}

/// Segments and classifies a whole document.
pub fn build_blocks(document: &str) -> Result<Vec<Block>, MarkdownError> {
    segment(document)
        .into_iter()
        .map(|raw| {
            let kind = classify(&raw)?;
            log::debug!("classified block as {:?}", kind);
            Ok(Block { raw, kind })
        })
        .collect()
}

/// Returns the heading level (1-6) if `line` starts with `#`s and a space.
pub fn heading_level(line: &str) -> Option<u8> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    if !line[hashes..].starts_with(' ') {
        return None;
    }
    u8::try_from(hashes).ok()
}

/// The `n. ` prefix an ordered list item carries at position `index`.
pub(crate) fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

fn starts_ordered_item(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit()) && chars.as_str().starts_with(". ")
}

fn validate_numbering(block: &str) -> Result<(), MarkdownError> {
    for (i, line) in block.split('\n').enumerate() {
        if !line.starts_with(&ordered_marker(i)) {
            return Err(MarkdownError::list_numbering(i + 1, line));
        }
    }
    Ok(())
}
