/*
 * back_references.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Back-reference links in bibliography entries.
 */

//! Links from bibliography entries back to where they were cited.

use ltx_html::{HtmlDocument, HtmlElement, HtmlNode};

use crate::Result;
use crate::citations::parse_label;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;

const BACK_REF_CLASS: &str = "ltx_back_ref";

/// Appends an `a.ltx_back_ref` to every cited bibliography entry, pointing
/// at the first range token that covers it.
///
/// Runs after [`CitationRangesTransform`](super::CitationRangesTransform),
/// which records the token ids.
pub struct BackReferencesTransform;

impl BackReferencesTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BackReferencesTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for BackReferencesTransform {
    fn name(&self) -> &str {
        "back-references"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        if ctx.citation_tokens.is_empty() {
            return Ok(());
        }
        let prefix = ctx.config.citations.bib_id_prefix.as_str();
        let tokens = &ctx.citation_tokens;

        let mut linked = 0usize;
        doc.for_each_element_mut(&mut |element| {
            let Some(number) = element
                .id()
                .and_then(|id| id.strip_prefix(prefix))
                .and_then(parse_label)
            else {
                return;
            };
            let Some(token) = tokens.get(&number) else {
                return;
            };
            if element.find(|e| e.has_class(BACK_REF_CLASS)).is_some() {
                return;
            }
            element.append_child(back_reference(token));
            linked += 1;
        });

        tracing::debug!(entries = linked, "Linked bibliography entries");
        Ok(())
    }
}

fn back_reference(token_id: &str) -> HtmlNode {
    HtmlNode::Element(
        HtmlElement::new("a")
            .with_class(BACK_REF_CLASS)
            .with_attr("href", format!("#{}", token_id))
            .with_attr("aria-label", "Back to citation")
            .with_text("\u{21a9}"),
    )
}
