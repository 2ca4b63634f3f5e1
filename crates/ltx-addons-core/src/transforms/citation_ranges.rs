/*
 * citation_ranges.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Rewrites numeric citation markers as range tokens.
 */

//! Citation marker rewriting.
//!
//! LaTeXML renders `\cite{a,b,c}` as
//!
//! ```html
//! <cite class="ltx_cite">[<a href="#bib.bib3" class="ltx_ref">3</a>, <a href="#bib.bib4" class="ltx_ref">4</a>]</cite>
//! ```
//!
//! Each `cite.ltx_cite` whose anchors are numbered becomes a bracketed list
//! of range tokens, one `<button>` per range, carrying the range text in
//! `data-range` for the citation modal.

use ltx_error_reporting::DiagnosticMessageBuilder;
use ltx_html::{HtmlDocument, HtmlElement, HtmlNode, NodePath};

use crate::Result;
use crate::citations::{CitationGroup, CitationRange, malformed_label, parse_label};
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;

/// Class of the rendered range tokens.
pub const RANGE_TOKEN_CLASS: &str = "ltx_cite_range";

pub struct CitationRangesTransform;

impl CitationRangesTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CitationRangesTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for CitationRangesTransform {
    fn name(&self) -> &str {
        "citation-ranges"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        let markers = doc.find_all_paths(|e| e.name == "cite" && e.has_class("ltx_cite"));
        let mut rewritten: Vec<NodePath> = Vec::new();

        for path in markers {
            // A marker nested in one already rewritten no longer exists.
            if rewritten.iter().any(|outer| outer.contains(&path)) {
                continue;
            }
            let Some(cite) = doc.element_at(&path) else {
                continue;
            };
            if let Some(children) = rewrite_marker(cite, ctx) {
                if let Some(cite) = doc.element_at_mut(&path) {
                    cite.replace_children(children);
                }
                rewritten.push(path);
            }
        }

        tracing::debug!(markers = rewritten.len(), "Rewrote citation markers");
        Ok(())
    }
}

/// An anchor that links within the page.
fn is_citation_anchor(element: &HtmlElement) -> bool {
    element.name == "a" && element.get_attribute("href").is_some_and(|h| h.starts_with('#'))
}

/// Anchors that link into the bibliography.
fn citation_anchors(cite: &HtmlElement) -> Vec<&HtmlElement> {
    fn collect<'a>(element: &'a HtmlElement, out: &mut Vec<&'a HtmlElement>) {
        for child in element.child_elements() {
            if is_citation_anchor(child) {
                out.push(child);
            } else {
                collect(child, out);
            }
        }
    }
    let mut anchors = Vec::new();
    collect(cite, &mut anchors);
    anchors
}

/// Text of the marker outside its citation anchors.
fn punctuation(cite: &HtmlElement) -> String {
    fn collect(element: &HtmlElement, out: &mut String) {
        for child in &element.children {
            match child {
                HtmlNode::Element(e) if is_citation_anchor(e) => {}
                HtmlNode::Element(e) => collect(e, out),
                HtmlNode::Text { raw, .. } => out.push_str(&ltx_html::text::decode(raw)),
                _ => {}
            }
        }
    }
    let mut out = String::new();
    collect(cite, &mut out);
    out
}

/// Numeric markers have only brackets and separators between their anchors.
fn is_numeric_marker(cite: &HtmlElement) -> bool {
    punctuation(cite)
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '[' | ']' | ',' | ';' | '-' | '\u{2013}'))
}

/// The replacement content for one marker, or `None` to leave it as is.
fn rewrite_marker(cite: &HtmlElement, ctx: &mut DecorateContext<'_>) -> Option<Vec<HtmlNode>> {
    let anchors = citation_anchors(cite);
    if anchors.is_empty() {
        return None;
    }

    if !is_numeric_marker(cite) {
        ctx.add_diagnostic(
            DiagnosticMessageBuilder::info("Citation Marker Left Unchanged")
                .with_code("L-2-2")
                .problem("The marker is not a bracketed list of numbers")
                .with_location(cite.source_span)
                .build(),
        );
        return None;
    }

    let labels: Vec<String> = anchors.iter().map(|a| a.text_content()).collect();
    let group = CitationGroup::from_labels(&labels);

    for anchor in anchors.iter().filter(|a| parse_label(&a.text_content()).is_none()) {
        ctx.add_diagnostic(
            malformed_label(&anchor.text_content())
                .with_location(anchor.source_span)
                .build(),
        );
    }

    if group.is_empty() {
        ctx.add_diagnostic(
            DiagnosticMessageBuilder::info("Citation Marker Left Unchanged")
                .with_code("L-2-2")
                .problem("No anchor in the marker has a numeric label")
                .with_location(cite.source_span)
                .build(),
        );
        return None;
    }

    let mut children = vec![HtmlNode::text("[")];
    for (i, range) in group.ranges().into_iter().enumerate() {
        if i > 0 {
            children.push(HtmlNode::text(","));
        }
        let token_id = ctx.next_token_id();
        for n in range.numbers() {
            ctx.citation_tokens
                .entry(n)
                .or_insert_with(|| token_id.clone());
        }
        let token = range_token(range, &token_id, &ctx.config.modal.dialog_id);
        children.push(HtmlNode::Element(token));
    }
    children.push(HtmlNode::text("]"));
    Some(children)
}

/// An activatable token for one range.
pub fn range_token(range: CitationRange, id: &str, dialog_id: &str) -> HtmlElement {
    let text = range.to_string();
    HtmlElement::new("button")
        .with_attr("type", "button")
        .with_class(RANGE_TOKEN_CLASS)
        .with_attr("data-range", text.as_str())
        .with_attr("id", id)
        .with_attr("aria-haspopup", "dialog")
        .with_attr("aria-controls", dialog_id)
        .with_text(&text)
}
