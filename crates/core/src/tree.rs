//! Builds the HTML node tree from classified blocks.

use crate::block::{Block, BlockKind, build_blocks, ordered_marker};
use crate::error::MarkdownError;
use crate::inline::{parse_inline, span_to_node};
use crate::node::{Attributes, Node};

/// Parses a markdown document into a root `div` node.
pub fn parse_document(markdown: &str) -> Result<Node, MarkdownError> {
    let blocks = build_blocks(markdown)?;
    log::debug!("parsed {} blocks", blocks.len());
    build(&blocks)
}

/// Assembles classified blocks into a root `div`, one child per block.
pub fn build(blocks: &[Block]) -> Result<Node, MarkdownError> {
    let children = blocks
        .iter()
        .map(block_to_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::container("div", children))
}

/// Converts one classified block into its element.
pub fn block_to_node(block: &Block) -> Result<Node, MarkdownError> {
    match &block.kind {
        BlockKind::Heading { level } => {
            let marker_len = usize::from(*level) + 1;
            let text = block.raw.get(marker_len..).unwrap_or_default();
            inline_element(&format!("h{}", level), &join_lines(text.split('\n')))
        }
        BlockKind::Code { lang } => Ok(code_block(block, lang.as_deref())),
        BlockKind::Quote => {
            let text = join_lines(block.lines().map(strip_quote));
            inline_element("blockquote", &text)
        }
        BlockKind::UnorderedList => {
            let items = block
                .lines()
                .map(|line| inline_element("li", line.strip_prefix("* ").unwrap_or(line)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::container("ul", items))
        }
        BlockKind::OrderedList => {
            let items = block
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    let marker = ordered_marker(i);
                    inline_element("li", line.strip_prefix(marker.as_str()).unwrap_or(line))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::container("ol", items))
        }
        BlockKind::Paragraph => inline_element("p", &join_lines(block.lines())),
    }
}

/// Wraps the inline spans of `text` in `tag`.
///
/// Text that is a single plain span becomes a tagged leaf; anything else
/// becomes a container of span nodes.
fn inline_element(tag: &str, text: &str) -> Result<Node, MarkdownError> {
    let spans = parse_inline(text)?;
    if let [only] = spans.as_slice()
        && only.is_plain()
    {
        return Ok(Node::leaf(tag, only.text()));
    }
    Ok(Node::container(tag, spans.iter().map(span_to_node).collect()))
}

fn code_block(block: &Block, lang: Option<&str>) -> Node {
    let lines: Vec<&str> = block.lines().collect();
    let body = match lines.as_slice() {
        [_, inner @ .., _] => inner.join("\n"),
        _ => String::new(),
    };

    let mut attributes = Attributes::new();
    if let Some(lang) = lang {
        attributes.set("class", format!("language-{}", lang));
    }
    Node::container("pre", vec![Node::leaf_with("code", body, attributes)])
}

fn strip_quote(line: &str) -> &str {
    line.strip_prefix("> ")
        .or_else(|| line.strip_prefix('>'))
        .unwrap_or(line)
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join(" ")
}
