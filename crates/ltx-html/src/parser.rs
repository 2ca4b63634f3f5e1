//! Lenient HTML parser that builds source-tracked trees.

use crate::types::{has_optional_end_tag, is_raw_text_element, is_void_element};
use crate::{
    Error, HtmlAttribute, HtmlDocument, HtmlElement, HtmlNode, HtmlParseContext, ParseResult,
    Result, SourceSpan,
};
use ltx_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, Event};

/// Parse HTML from a string.
///
/// Recoverable problems (stray or implicitly closing end tags) are dropped;
/// use [`parse_with_context`] to collect them.
///
/// # Example
///
/// ```rust
/// use ltx_html::parse;
///
/// let doc = parse("<p>One<br>two</p>").unwrap();
/// let p = doc.find(|e| e.name == "p").unwrap();
/// assert_eq!(p.children.len(), 3);
/// assert_eq!(doc.to_string(), "<p>One<br>two</p>");
/// ```
pub fn parse(content: &str) -> Result<HtmlDocument> {
    HtmlParser::new(content).parse()
}

/// Parse HTML from raw bytes, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<HtmlDocument> {
    let content = std::str::from_utf8(bytes).map_err(|err| Error::InvalidUtf8 {
        message: err.to_string(),
        valid_up_to: err.valid_up_to(),
    })?;
    parse(content)
}

/// Parse HTML, collecting warnings in `ctx`.
///
/// # Errors
///
/// Returns the fatal diagnostic (also added to `ctx`) if the input cannot be
/// tokenized or contains no elements.
pub fn parse_with_context(content: &str, ctx: &mut HtmlParseContext) -> ParseResult<HtmlDocument> {
    let mut parser = HtmlParser::new(content);
    let result = parser.parse();
    for warning in parser.warnings.drain(..) {
        ctx.add_diagnostic(warning);
    }
    match result {
        Ok(doc) => Ok(doc),
        Err(err) => {
            let diagnostic = err.to_diagnostic();
            ctx.add_diagnostic(diagnostic.clone());
            Err(vec![diagnostic])
        }
    }
}

/// Internal parser state.
struct HtmlParser<'a> {
    source: &'a str,

    /// Reader over `source[base..]`.
    reader: Reader<&'a [u8]>,
    base: usize,

    /// Elements whose end tag has not been seen yet.
    stack: Vec<BuildNode>,

    /// Finished top-level nodes.
    nodes: Vec<HtmlNode>,

    warnings: Vec<DiagnosticMessage>,
}

/// An element being constructed during parsing.
struct BuildNode {
    name: String,
    attributes: Vec<HtmlAttribute>,

    /// Byte offset of the start tag's `<`.
    start_offset: usize,

    /// Byte offset just past the start tag's `>`.
    start_tag_end: usize,

    children: Vec<HtmlNode>,
}

impl BuildNode {
    fn finish(self, end_offset: usize) -> HtmlElement {
        HtmlElement {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
            self_closing: false,
            source_span: SourceSpan::new(self.start_offset, end_offset),
        }
    }
}

impl<'a> HtmlParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            reader: lenient_reader(source),
            base: 0,
            stack: Vec::new(),
            nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<HtmlDocument> {
        loop {
            let event_start = self.position();

            if starts_bare_lt(&self.source[event_start..]) {
                self.push_text(SourceSpan::new(event_start, event_start + 1));
                self.restart_at(event_start + 1);
                continue;
            }

            match self.reader.read_event() {
                Ok(Event::Start(e)) => self.handle_start(e, event_start)?,
                Ok(Event::End(e)) => self.handle_end(e, event_start),
                Ok(Event::Empty(e)) => {
                    let element = self.handle_empty(e, event_start)?;
                    self.push_node(HtmlNode::Element(element));
                }
                Ok(Event::Text(_) | Event::CData(_)) => {
                    let span = self.span_from(event_start);
                    self.push_text(span);
                }
                Ok(Event::Comment(_)) => {
                    let span = self.span_from(event_start);
                    self.push_node(HtmlNode::Comment {
                        raw: self.source[span.range()].to_string(),
                        source_span: span,
                    });
                }
                Ok(Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {
                    let span = self.span_from(event_start);
                    self.push_node(HtmlNode::Declaration {
                        raw: self.source[span.range()].to_string(),
                        source_span: span,
                    });
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Syntax {
                        message: e.to_string(),
                        position: Some(self.base as u64 + self.reader.error_position()),
                    });
                }
            }
        }

        // Whatever is still open ends with the input.
        let end = self.source.len();
        while let Some(node) = self.stack.pop() {
            if !has_optional_end_tag(&node.name) {
                self.warnings.push(implicitly_closed(&node, "the end of the input"));
            }
            let element = node.finish(end);
            self.push_node(HtmlNode::Element(element));
        }

        let nodes = std::mem::take(&mut self.nodes);
        if !nodes.iter().any(|n| matches!(n, HtmlNode::Element(_))) {
            return Err(Error::EmptyDocument);
        }

        Ok(HtmlDocument {
            nodes,
            source_span: SourceSpan::new(0, end),
        })
    }

    /// Byte offset of the reader in `source`.
    fn position(&self) -> usize {
        self.base + self.reader.buffer_position() as usize
    }

    /// Continue reading from `offset`, discarding the reader's state.
    fn restart_at(&mut self, offset: usize) {
        let source: &'a str = self.source;
        self.reader = lenient_reader(&source[offset..]);
        self.base = offset;
    }

    fn span_from(&self, start: usize) -> SourceSpan {
        SourceSpan::new(start, self.position())
    }

    /// Add source text, joining it to a text node that ends where it starts.
    fn push_text(&mut self, span: SourceSpan) {
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.nodes,
        };
        if let Some(HtmlNode::Text { raw, source_span }) = siblings.last_mut() {
            if source_span.end == span.start {
                raw.push_str(&self.source[span.range()]);
                source_span.end = span.end;
                return;
            }
        }
        siblings.push(HtmlNode::Text {
            raw: self.source[span.range()].to_string(),
            source_span: span,
        });
    }

    fn push_node(&mut self, node: HtmlNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn handle_start(&mut self, e: BytesStart<'a>, event_start: usize) -> Result<()> {
        let name = element_name(&e);
        let attributes = self.parse_attributes(&e, event_start)?;
        let start_tag_end = self.position();

        if is_void_element(&name) {
            self.push_node(HtmlNode::Element(HtmlElement {
                name,
                attributes,
                children: Vec::new(),
                self_closing: false,
                source_span: SourceSpan::new(event_start, start_tag_end),
            }));
            return Ok(());
        }

        if is_raw_text_element(&name) {
            // Script and style bodies are not markup.
            let body = self.reader.read_to_end(e.name())?;
            let body_span = SourceSpan::new(self.base + body.start as usize, self.base + body.end as usize);
            let mut children = Vec::new();
            if !body_span.is_empty() {
                children.push(HtmlNode::Text {
                    raw: self.source[body_span.range()].to_string(),
                    source_span: body_span,
                });
            }
            self.push_node(HtmlNode::Element(HtmlElement {
                name,
                attributes,
                children,
                self_closing: false,
                source_span: self.span_from(event_start),
            }));
            return Ok(());
        }

        self.stack.push(BuildNode {
            name,
            attributes,
            start_offset: event_start,
            start_tag_end,
            children: Vec::new(),
        });
        Ok(())
    }

    fn handle_end(&mut self, e: BytesEnd<'_>, event_start: usize) {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
        let end_offset = self.position();

        let Some(target) = self.stack.iter().rposition(|node| node.name == name) else {
            self.warnings.push(
                DiagnosticMessageBuilder::warning("Stray End Tag")
                    .with_code("L-1-4")
                    .problem(format!("`</{}>` has no matching open element", name))
                    .add_detail("The end tag was ignored")
                    .with_location(SourceSpan::new(event_start, end_offset))
                    .build(),
            );
            return;
        };

        while self.stack.len() > target + 1 {
            let Some(node) = self.stack.pop() else {
                break;
            };
            if !has_optional_end_tag(&node.name) {
                self.warnings
                    .push(implicitly_closed(&node, &format!("`</{}>`", name)));
            }
            let element = node.finish(event_start);
            self.push_node(HtmlNode::Element(element));
        }

        if let Some(node) = self.stack.pop() {
            let element = node.finish(end_offset);
            self.push_node(HtmlNode::Element(element));
        }
    }

    fn handle_empty(&mut self, e: BytesStart<'_>, event_start: usize) -> Result<HtmlElement> {
        let name = element_name(&e);
        let attributes = self.parse_attributes(&e, event_start)?;
        Ok(HtmlElement {
            name,
            attributes,
            children: Vec::new(),
            self_closing: true,
            source_span: self.span_from(event_start),
        })
    }

    fn parse_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<HtmlAttribute>> {
        let mut attributes = Vec::new();

        // Tag content starts after '<'; attributes follow the element name.
        let content_start = tag_start + 1;
        let tag_str = String::from_utf8_lossy(e.as_ref());
        let mut cursor = e.name().as_ref().len();

        let mut attrs = e.html_attributes();
        attrs.with_checks(false);
        for attr in attrs {
            let attr = attr?;
            let raw_name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let raw_value = String::from_utf8_lossy(&attr.value);
            let value = crate::text::decode(&raw_value).into_owned();

            let (start, end) = attribute_bounds(&tag_str, cursor, &raw_name);
            cursor = end;

            attributes.push(HtmlAttribute {
                name: raw_name.to_ascii_lowercase(),
                value,
                source_span: SourceSpan::new(content_start + start, content_start + end),
            });
        }

        Ok(attributes)
    }
}

fn lenient_reader(source: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.trim_text_start = false;
    config.trim_text_end = false;
    // End tags are matched here, with HTML recovery rules.
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;
    reader
}

/// A `<` that cannot open a tag, comment or declaration is text.
fn starts_bare_lt(rest: &str) -> bool {
    let mut bytes = rest.bytes();
    bytes.next() == Some(b'<')
        && !bytes
            .next()
            .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn implicitly_closed(node: &BuildNode, closer: &str) -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Implicitly Closed Element")
        .with_code("L-1-5")
        .problem(format!("`<{}>` was closed by {}", node.name, closer))
        .with_location(SourceSpan::new(node.start_offset, node.start_tag_end))
        .build()
}

/// Byte range of `name[=value]` within the tag content, searching from `from`.
///
/// Falls back to an empty range at `from` if the name cannot be found.
fn attribute_bounds(tag: &str, from: usize, name: &str) -> (usize, usize) {
    let Some(rest) = tag.get(from..) else {
        return (from, from);
    };
    let Some(rel) = rest.find(name) else {
        return (from, from);
    };
    let start = from + rel;
    let mut end = start + name.len();

    let bytes = tag.as_bytes();
    let mut pos = end;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'=' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                end = tag[pos + 1..]
                    .find(quote as char)
                    .map_or(bytes.len(), |close| pos + 1 + close + 1);
            }
            Some(_) => {
                end = tag[pos..]
                    .find(|c: char| c.is_ascii_whitespace())
                    .map_or(bytes.len(), |stop| pos + stop);
            }
            None => end = pos,
        }
    }
    (start, end)
}
