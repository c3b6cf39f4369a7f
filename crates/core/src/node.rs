//! The HTML node tree and its serializer.
//!
//! A [`Node`] is either a leaf (text, optionally wrapped in a tag) or a
//! container that owns an ordered list of children. Trees are built bottom-up,
//! so serialization is a read-only traversal.

use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Insertion-ordered attribute list.
///
/// Setting a key that already exists replaces its value in place, so the
/// rendered order is the order in which keys were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`Attributes::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, value)` pairs in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_to(&self, out: &mut String, escape: Escape) {
        for (key, value) in &self.0 {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape.attribute(value));
            out.push('"');
        }
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Text encoding applied while serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Emit text and attribute values verbatim.
    #[default]
    None,
    /// Encode text content and attribute values for HTML.
    Html,
}

impl Escape {
    fn text<'a>(self, s: &'a str) -> Cow<'a, str> {
        match self {
            Escape::None => Cow::Borrowed(s),
            Escape::Html => html_escape::encode_text(s),
        }
    }

    fn attribute<'a>(self, s: &'a str) -> Cow<'a, str> {
        match self {
            Escape::None => Cow::Borrowed(s),
            Escape::Html => html_escape::encode_double_quoted_attribute(s),
        }
    }
}

/// An element of the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Text with an optional wrapping tag. Never has children.
    Leaf {
        /// Wrapping tag; `None` renders the text as-is.
        tag: Option<String>,
        /// Text content.
        text: String,
        /// Attributes rendered on the opening tag.
        #[serde(skip_serializing_if = "Attributes::is_empty")]
        attributes: Attributes,
    },
    /// A tag wrapping an ordered list of child nodes.
    Container {
        /// Element tag.
        tag: String,
        /// Child nodes, in render order.
        children: Vec<Node>,
        /// Attributes rendered on the opening tag.
        #[serde(skip_serializing_if = "Attributes::is_empty")]
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            text: text.into(),
            attributes: Attributes::new(),
        }
    }

    /// Tagged leaf without attributes.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::leaf_with(tag, text, Attributes::new())
    }

    /// Tagged leaf with attributes.
    pub fn leaf_with(
        tag: impl Into<String>,
        text: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            text: text.into(),
            attributes,
        }
    }

    /// Container without attributes.
    pub fn container(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Container {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Returns the element tag, or `None` for plain text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Container { tag, .. } => Some(tag),
        }
    }

    /// Returns the node's attributes.
    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => attributes,
        }
    }

    /// Returns the children of a container; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Container { children, .. } => children,
        }
    }

    /// Serializes the node with the given escaping mode.
    pub fn to_html_with(&self, escape: Escape) -> String {
        let mut out = String::new();
        self.write_html(&mut out, escape);
        out
    }

    fn write_html(&self, out: &mut String, escape: Escape) {
        match self {
            Node::Leaf {
                tag: None, text, ..
            } => out.push_str(&escape.text(text)),
            Node::Leaf {
                tag: Some(tag),
                text,
                attributes,
            } => {
                open_tag(out, tag, attributes, escape);
                out.push_str(&escape.text(text));
                close_tag(out, tag);
            }
            Node::Container {
                tag,
                children,
                attributes,
            } => {
                open_tag(out, tag, attributes, escape);
                for child in children {
                    child.write_html(out, escape);
                }
                close_tag(out, tag);
            }
        }
    }
}

fn open_tag(out: &mut String, tag: &str, attributes: &Attributes, escape: Escape) {
    out.push('<');
    out.push_str(tag);
    attributes.write_to(out, escape);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Serializes a node tree to markup, emitting text verbatim.
pub fn serialize(node: &Node) -> String {
    node.to_html_with(Escape::None)
}
