//! Serialization back to HTML text.
//!
//! Parsed text, comments and declarations are written out verbatim.
//! Attributes are re-escaped and always double-quoted, so an untouched
//! document round-trips except for attribute quoting.

use std::fmt::{self, Display, Formatter, Write};

use crate::text::escape_attribute;
use crate::{HtmlDocument, HtmlElement, HtmlNode};

impl Display for HtmlDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl Display for HtmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HtmlNode::Element(element) => write!(f, "{}", element),
            HtmlNode::Text { raw, .. }
            | HtmlNode::Comment { raw, .. }
            | HtmlNode::Declaration { raw, .. } => f.write_str(raw),
        }
    }
}

impl Display for HtmlElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        f.write_str(&self.name)?;
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.name, escape_attribute(&attr.value))?;
        }

        if self.is_void() {
            return f.write_str(if self.self_closing { "/>" } else { ">" });
        }
        if self.self_closing && self.children.is_empty() {
            return f.write_str("/>");
        }

        f.write_char('>')?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}
