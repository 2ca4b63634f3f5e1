/*
 * favicon.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Favicon link for decorated pages.
 */

//! Favicon link.

use ltx_html::{HtmlDocument, HtmlElement};

use crate::Result;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;

/// Links the configured favicon from `<head>` unless the page already has one.
pub struct FaviconTransform;

impl FaviconTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaviconTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for FaviconTransform {
    fn name(&self) -> &str {
        "favicon"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        let config = ctx.config;
        let Some(href) = config.favicon.as_deref() else {
            return Ok(());
        };

        let has_icon = doc
            .find(|e| {
                e.name == "link"
                    && e.get_attribute("rel")
                        .is_some_and(|rel| rel.split_ascii_whitespace().any(|r| r == "icon"))
            })
            .is_some();
        if has_icon {
            return Ok(());
        }

        let Some(head_path) = doc.head_path() else {
            ctx.target_missing(self.name(), "`<head>`");
            return Ok(());
        };
        if let Some(head) = doc.element_at_mut(&head_path) {
            head.append_child(
                HtmlElement::new("link")
                    .with_attr("rel", "icon")
                    .with_attr("type", "image/x-icon")
                    .with_attr("href", href),
            );
        }
        Ok(())
    }
}
