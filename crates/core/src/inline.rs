//! Inline span parsing.
//!
//! Raw text is turned into a flat list of [`Span`]s by a fixed sequence of
//! passes: bold (`**`), italic (`*`), code (`` ` ``), images, then links.
//! Every pass takes the previous output and returns a new list; only
//! [`SpanKind::Plain`] spans are split further, typed spans pass through.

use crate::error::MarkdownError;
use crate::node::{Attributes, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[(?P<text>[^\[\]]*)\]\((?P<url>[^()]*)\)").expect("image pattern is valid")
});

// `regex` has no look-behind; an image's leading `!` is rejected by the caller.
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<text>[^\[\]]*)\]\((?P<url>[^()]*)\)").expect("link pattern is valid")
});

/// The kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    /// Unformatted text.
    Plain,
    /// `**bold**`
    Bold,
    /// `*italic*`
    Italic,
    /// `` `code` ``
    Code,
    /// `[text](url)`
    Link,
    /// `![alt](url)`
    Image,
}

/// An inline delimiter that wraps text in a style.
///
/// Links and images are bracket syntax, not delimiters, so they have no
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `**`
    Bold,
    /// `*`
    Italic,
    /// `` ` ``
    Code,
}

impl Delimiter {
    /// The literal marker text.
    pub fn literal(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "*",
            Delimiter::Code => "`",
        }
    }

    /// The kind of span the delimited text becomes.
    pub fn kind(self) -> SpanKind {
        match self {
            Delimiter::Bold => SpanKind::Bold,
            Delimiter::Italic => SpanKind::Italic,
            Delimiter::Code => SpanKind::Code,
        }
    }
}

/// A typed fragment of inline text.
///
/// Only links and images carry a url; the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    kind: SpanKind,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Span {
    /// Plain text span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Plain, text)
    }

    /// Bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Bold, text)
    }

    /// Italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Italic, text)
    }

    /// Inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Code, text)
    }

    /// Link span with its target.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// Image span; `text` is the alt text.
    pub fn image(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Image,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    // Only reached with Plain or a `Delimiter` kind; links and images
    // have their own constructors.
    fn styled(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            url: None,
        }
    }

    /// The span kind.
    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// The span text (alt text for images).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The target url of a link or image.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether this span is still subject to splitting.
    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Parses a line of inline markdown into spans.
///
/// # Examples
///
/// ```
/// use sitemark_core::inline::{parse_inline, Span};
///
/// let spans = parse_inline("a **b** c").unwrap();
/// assert_eq!(spans, vec![Span::plain("a "), Span::bold("b"), Span::plain(" c")]);
/// ```
pub fn parse_inline(text: &str) -> Result<Vec<Span>, MarkdownError> {
    let spans = vec![Span::plain(text)];
    let spans = split_delimiter(&spans, Delimiter::Bold)?;
    let spans = split_delimiter(&spans, Delimiter::Italic)?;
    let spans = split_delimiter(&spans, Delimiter::Code)?;
    let spans = resolve_until_stable(spans, split_images);
    Ok(resolve_until_stable(spans, split_links))
}

/// Splits every plain span on `delimiter`, styling the enclosed parts.
///
/// Parts at even positions stay plain, parts at odd positions take the
/// delimiter's kind. Empty parts are dropped. An unpaired delimiter fails the
/// whole pass.
pub fn split_delimiter(spans: &[Span], delimiter: Delimiter) -> Result<Vec<Span>, MarkdownError> {
    let (literal, kind) = (delimiter.literal(), delimiter.kind());
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span.clone());
            continue;
        }

        let parts: Vec<&str> = span.text.split(literal).collect();
        if parts.len() % 2 == 0 {
            return Err(MarkdownError::unterminated(literal, span.text.as_str()));
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(Span::styled(kind, part));
        }
    }
    Ok(out)
}

/// Returns every `(alt, url)` pair of `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE
        .captures_iter(text)
        .map(|caps| (caps["text"].to_string(), caps["url"].to_string()))
        .collect()
}

/// Returns every `(text, url)` pair of `[text](url)` in `text`, skipping images.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    let mut links = Vec::new();
    let mut rest = text;
    while let Some(found) = find_link(rest) {
        links.push((found.text.to_string(), found.url.to_string()));
        rest = &rest[found.end..];
    }
    links
}

/// Cuts each plain span at its first image, in a single pass.
pub fn split_images(spans: &[Span]) -> Vec<Span> {
    split_first(spans, find_image, Span::image)
}

/// Cuts each plain span at its first link, in a single pass.
pub fn split_links(spans: &[Span]) -> Vec<Span> {
    split_first(spans, find_link, Span::link)
}

/// Reapplies a single-pass splitter until its output stops changing.
///
/// [`split_images`] and [`split_links`] only resolve one match per plain span
/// per call; this drives them until every match in the line is resolved.
pub fn resolve_until_stable<F>(mut spans: Vec<Span>, pass: F) -> Vec<Span>
where
    F: Fn(&[Span]) -> Vec<Span>,
{
    loop {
        let next = pass(&spans);
        if next == spans {
            return spans;
        }
        log::trace!("span pass grew {} -> {} spans", spans.len(), next.len());
        spans = next;
    }
}

/// Maps a span to its output node.
pub fn span_to_node(span: &Span) -> Node {
    let text = span.text.as_str();
    let url = span.url.as_deref().unwrap_or_default();
    match span.kind {
        SpanKind::Plain => Node::text(text),
        SpanKind::Bold => Node::leaf("b", text),
        SpanKind::Italic => Node::leaf("i", text),
        SpanKind::Code => Node::leaf("code", text),
        SpanKind::Link => Node::leaf_with("a", text, Attributes::new().with("href", url)),
        SpanKind::Image => Node::leaf_with(
            "img",
            "",
            Attributes::new().with("src", url).with("alt", text),
        ),
    }
}

struct Found<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    url: &'a str,
}

fn find_image(text: &str) -> Option<Found<'_>> {
    let caps = IMAGE.captures(text)?;
    let whole = caps.get(0)?;
    Some(Found {
        start: whole.start(),
        end: whole.end(),
        text: caps.name("text")?.as_str(),
        url: caps.name("url")?.as_str(),
    })
}

fn find_link(text: &str) -> Option<Found<'_>> {
    let mut offset = 0;
    while let Some(caps) = LINK.captures(&text[offset..]) {
        let whole = caps.get(0)?;
        let start = offset + whole.start();
        let end = offset + whole.end();
        if text[..start].ends_with('!') {
            // Image syntax; resume right after its opening bracket.
            offset = start + 1;
            continue;
        }
        return Some(Found {
            start,
            end,
            text: caps.name("text")?.as_str(),
            url: caps.name("url")?.as_str(),
        });
    }
    None
}

fn split_first<'s, M, C>(spans: &'s [Span], find: M, make: C) -> Vec<Span>
where
    M: Fn(&'s str) -> Option<Found<'s>>,
    C: Fn(&'s str, &'s str) -> Span,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span.clone());
            continue;
        }
        let Some(found) = find(span.text.as_str()) else {
            out.push(span.clone());
            continue;
        };

        let before = &span.text[..found.start];
        let after = &span.text[found.end..];
        if !before.is_empty() {
            out.push(Span::plain(before));
        }
        out.push(make(found.text, found.url));
        if !after.is_empty() {
            out.push(Span::plain(after));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Vec<Span> {
        vec![Span::plain(text)]
    }

    #[test]
    fn splits_bold() {
        let spans = split_delimiter(
            &plain("this is **some serious** business"),
            Delimiter::Bold,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("this is "),
                Span::bold("some serious"),
                Span::plain(" business"),
            ]
        );
    }

    #[test]
    fn splits_italic() {
        let spans = split_delimiter(
            &plain("this is *a lot of sarcastic* business"),
            Delimiter::Italic,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("this is "),
                Span::italic("a lot of sarcastic"),
                Span::plain(" business"),
            ]
        );
    }

    #[test]
    fn splits_code() {
        let spans =
            split_delimiter(&plain("this is `beep boop` business"), Delimiter::Code).unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("this is "),
                Span::code("beep boop"),
                Span::plain(" business"),
            ]
        );
    }

    #[test]
    fn delimiter_at_boundaries_drops_empty_parts() {
        let spans = split_delimiter(&plain("**all bold**"), Delimiter::Bold).unwrap();
        assert_eq!(spans, vec![Span::bold("all bold")]);

        let spans = split_delimiter(&plain("`a` and `b`"), Delimiter::Code).unwrap();
        assert_eq!(
            spans,
            vec![Span::code("a"), Span::plain(" and "), Span::code("b")]
        );
    }

    #[test]
    fn unterminated_delimiter_fails() {
        let err = split_delimiter(&plain("a **b"), Delimiter::Bold).unwrap_err();
        assert!(matches!(err, MarkdownError::MalformedMarkdown { .. }), "{err:?}");
        assert_eq!(err.offending_text(), Some("a **b"));

        assert!(parse_inline("a **b").is_err());
        assert!(parse_inline("an `open code span").is_err());
        assert!(parse_inline("one *star").is_err());
    }

    #[test]
    fn typed_spans_pass_through_later_passes() {
        let spans = vec![Span::code("a * b"), Span::plain("c")];
        let out = split_delimiter(&spans, Delimiter::Italic).unwrap();
        assert_eq!(out, spans);
    }

    #[test]
    fn bold_is_resolved_before_italic() {
        let spans = parse_inline("**x** and *y*").unwrap();
        assert_eq!(
            spans,
            vec![Span::bold("x"), Span::plain(" and "), Span::italic("y")]
        );
    }

    #[test]
    fn extracts_images() {
        let text = "This is text with ![the ferry building](https://example.com/ferry.jpg) \
                    and ![the golden gate bridge](https://example.com/bridge.jpg)";
        assert_eq!(
            extract_images(text),
            vec![
                (
                    "the ferry building".to_string(),
                    "https://example.com/ferry.jpg".to_string()
                ),
                (
                    "the golden gate bridge".to_string(),
                    "https://example.com/bridge.jpg".to_string()
                ),
            ]
        );
    }

    #[test]
    fn extracts_links_but_not_images() {
        let text = "This is text with [EFF](https://www.eff.org/) and ![pic](p.png) \
                    and [Codeberg](https://codeberg.org/) links";
        assert_eq!(
            extract_links(text),
            vec![
                ("EFF".to_string(), "https://www.eff.org/".to_string()),
                ("Codeberg".to_string(), "https://codeberg.org/".to_string()),
            ]
        );
    }

    #[test]
    fn image_at_start_middle_and_end() {
        let url = "https://example.com/bridge.jpg";
        assert_eq!(
            split_images(&plain(&format!("![bridge]({url}) in all its glory"))),
            vec![Span::image("bridge", url), Span::plain(" in all its glory")]
        );
        assert_eq!(
            split_images(&plain(&format!("Behold:![bridge]({url}) the bridge in fog"))),
            vec![
                Span::plain("Behold:"),
                Span::image("bridge", url),
                Span::plain(" the bridge in fog"),
            ]
        );
        assert_eq!(
            split_images(&plain(&format!("Behold, ![bridge]({url})"))),
            vec![Span::plain("Behold, "), Span::image("bridge", url)]
        );
    }

    #[test]
    fn link_at_start_middle_and_end() {
        assert_eq!(
            split_links(&plain("[Here's](https://gnu.org) a link to GNU")),
            vec![Span::link("Here's", "https://gnu.org"), Span::plain(" a link to GNU")]
        );
        assert_eq!(
            split_links(&plain("And a [link](https://eff.org) to EFF")),
            vec![
                Span::plain("And a "),
                Span::link("link", "https://eff.org"),
                Span::plain(" to EFF"),
            ]
        );
        assert_eq!(
            split_links(&plain("Have a link to [my website](http://example.com/)")),
            vec![
                Span::plain("Have a link to "),
                Span::link("my website", "http://example.com/"),
            ]
        );
    }

    #[test]
    fn link_pass_does_not_match_images() {
        let spans = plain("see ![alt](a.png)");
        assert_eq!(split_links(&spans), spans);
    }

    #[test]
    fn single_pass_only_resolves_first_match() {
        let once = split_links(&plain("[a](1) and [b](2)"));
        assert_eq!(
            once,
            vec![Span::link("a", "1"), Span::plain(" and [b](2)")]
        );

        let stable = resolve_until_stable(once, split_links);
        assert_eq!(
            stable,
            vec![Span::link("a", "1"), Span::plain(" and "), Span::link("b", "2")]
        );
    }

    #[test]
    fn no_match_returns_spans_unchanged() {
        let spans = plain("nothing to see [here]");
        assert_eq!(split_images(&spans), spans);
        assert_eq!(split_links(&spans), spans);
    }

    #[test]
    fn parses_mixed_line() {
        let spans =
            parse_inline("This is **bold** and *italic* and ![alt](u) and [t](v).").unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is "),
                Span::bold("bold"),
                Span::plain(" and "),
                Span::italic("italic"),
                Span::plain(" and "),
                Span::image("alt", "u"),
                Span::plain(" and "),
                Span::link("t", "v"),
                Span::plain("."),
            ]
        );
    }

    #[test]
    fn parses_every_kind() {
        let text = "This is some **bolded text** with an *italic* word \
                    and some `monospace code` and an \
                    ![innocent image](https://example.com/1207210) \
                    and a [link](https://example.com)";
        assert_eq!(
            parse_inline(text).unwrap(),
            vec![
                Span::plain("This is some "),
                Span::bold("bolded text"),
                Span::plain(" with an "),
                Span::italic("italic"),
                Span::plain(" word and some "),
                Span::code("monospace code"),
                Span::plain(" and an "),
                Span::image("innocent image", "https://example.com/1207210"),
                Span::plain(" and a "),
                Span::link("link", "https://example.com"),
            ]
        );
    }

    #[test]
    fn content_round_trips_without_delimiters() {
        for text in [
            "plain",
            "a **b** c *d* e `f` g",
            "**start** middle *end*",
            "`x`",
        ] {
            let spans = parse_inline(text).unwrap();
            let joined: String = spans.iter().map(Span::text).collect();
            let expected = text.replace("**", "").replace(['*', '`'], "");
            assert_eq!(joined, expected, "{text}");
        }
    }

    #[test]
    fn empty_text_yields_no_spans() {
        assert_eq!(parse_inline("").unwrap(), vec![]);
    }

    #[test]
    fn only_links_and_images_carry_urls() {
        assert_eq!(Span::bold("x").url(), None);
        assert_eq!(Span::plain("x").url(), None);
        assert_eq!(Span::link("x", "u").url(), Some("u"));
        assert_eq!(Span::image("x", "u").url(), Some("u"));
    }

    #[test]
    fn delimiter_passes_never_produce_links_or_images() {
        let spans = plain("a ~x~ [b](c) ~y~ ![d](e)");
        for delimiter in [Delimiter::Bold, Delimiter::Italic, Delimiter::Code] {
            let wrapped = format!("a {0}x{0} b", delimiter.literal());
            let out = split_delimiter(&plain(&wrapped), delimiter).unwrap();
            assert_eq!(out[1].kind(), delimiter.kind());
            assert!(
                out.iter().all(|s| s.url().is_none()),
                "{delimiter:?}: {out:?}"
            );

            let out = split_delimiter(&spans, delimiter).unwrap();
            assert_eq!(out, spans);
        }
    }

    #[test]
    fn spans_serialize_to_json() {
        let spans = parse_inline("a **b** [c](d)").unwrap();
        assert_eq!(
            serde_json::to_value(&spans).unwrap(),
            serde_json::json!([
                { "kind": "plain", "text": "a " },
                { "kind": "bold", "text": "b" },
                { "kind": "plain", "text": " " },
                { "kind": "link", "text": "c", "url": "d" }
            ])
        );
    }

    #[test]
    fn maps_spans_to_nodes() {
        use crate::node::serialize;

        assert_eq!(serialize(&span_to_node(&Span::plain("i'm normal"))), "i'm normal");
        assert_eq!(serialize(&span_to_node(&Span::bold("srs"))), "<b>srs</b>");
        assert_eq!(serialize(&span_to_node(&Span::italic("spicy"))), "<i>spicy</i>");
        assert_eq!(serialize(&span_to_node(&Span::code("beep"))), "<code>beep</code>");
        assert_eq!(
            serialize(&span_to_node(&Span::link("google", "https://www.google.com"))),
            r#"<a href="https://www.google.com">google</a>"#
        );
        assert_eq!(
            serialize(&span_to_node(&Span::image("alt text", "https://example.com/a.png"))),
            r#"<img src="https://example.com/a.png" alt="alt text"></img>"#
        );
    }
}
