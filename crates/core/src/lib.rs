#![deny(missing_docs)]
//! sitemark core: markdown blocks, inline spans, and the HTML node tree.
//!
//! The pipeline is [`block::segment`] → [`block::classify`] →
//! [`inline::parse_inline`] → [`tree::build`], with [`parse_document`] running
//! all of it and [`serialize`] turning the resulting [`Node`] into markup.

/// Block segmentation and classification.
pub mod block;
/// Core error types.
pub mod error;
/// Inline span parsing.
pub mod inline;
/// Output node tree and serializer.
pub mod node;
/// Title extraction.
pub mod title;
/// Tree construction from classified blocks.
pub mod tree;

pub use block::{Block, BlockKind, build_blocks, classify, segment};
pub use error::MarkdownError;
pub use inline::{Delimiter, Span, SpanKind, parse_inline, span_to_node};
pub use node::{Attributes, Escape, Node, serialize};
pub use title::extract_title;
pub use tree::{build, parse_document};
