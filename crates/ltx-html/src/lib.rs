//! Source-tracked, mutable HTML trees.
//!
//! This crate parses the HTML that LaTeXML produces into an owned tree of
//! [`HtmlNode`]s, lets callers query and rewrite it in place (the operations a
//! page script would perform on the DOM), and serializes it back out. It wraps
//! [`quick-xml`] with HTML leniency on top: void elements, raw-text
//! `<script>`/`<style>` bodies, valueless attributes and end tags that close
//! several open elements at once.
//!
//! # Example
//!
//! ```rust
//! use ltx_html::{HtmlElement, HtmlNode, parse};
//!
//! let mut doc = parse(r#"<html><body><div class="ltx_page_main"><p>Hi</p></div></body></html>"#).unwrap();
//!
//! let path = doc.find_path(|e| e.has_class("ltx_page_main")).unwrap();
//! doc.element_at_mut(&path).unwrap().set_attribute("id", "main");
//!
//! let body = doc.body_path().unwrap();
//! doc.element_at_mut(&body)
//!     .unwrap()
//!     .insert_child(0, HtmlNode::Element(HtmlElement::new("header")));
//!
//! assert_eq!(
//!     doc.to_string(),
//!     r#"<html><body><header></header><div class="ltx_page_main" id="main"><p>Hi</p></div></body></html>"#
//! );
//! ```
//!
//! # Source Location Tracking
//!
//! Every parsed element, attribute and text node records the byte range it
//! came from as a [`SourceSpan`], so diagnostics can point back into the
//! input file. Nodes created by the decorator carry an empty synthetic span.
//!
//! ```rust
//! use ltx_html::parse;
//!
//! let content = "<cite><a href=\"#bib.1\">1</a></cite>";
//! let doc = parse(content).unwrap();
//! let anchor = doc.find(|e| e.name == "a").unwrap();
//! assert_eq!(&content[anchor.source_span.range()], "<a href=\"#bib.1\">1</a>");
//! ```

pub mod context;
pub mod error;
pub mod parser;
pub mod serialize;
pub mod text;
pub mod types;

pub use context::HtmlParseContext;
pub use error::{Error, ParseResult, Result};
pub use ltx_error_reporting::SourceSpan;
pub use parser::{parse, parse_bytes, parse_with_context};
pub use types::{HtmlAttribute, HtmlDocument, HtmlElement, HtmlNode, NodePath};
