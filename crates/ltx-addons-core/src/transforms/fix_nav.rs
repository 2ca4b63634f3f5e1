/*
 * fix_nav.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Table of contents placement and labelling.
 */

//! Table of contents placement.
//!
//! LaTeXML puts the table of contents in a navbar beside the article. For
//! screen readers it works better as a labelled navigation landmark at the
//! start of the main content, so this transform:
//!
//! 1. unwraps `nav.ltx_page_navbar`,
//! 2. labels `nav.ltx_TOC` with a "Table of Contents" heading,
//! 3. moves it to the start of `#main`.

use ltx_html::{HtmlDocument, HtmlElement};

use crate::Result;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;
use crate::transforms::main_landmark::MAIN_ID;

const TOC_HEADER_ID: &str = "toc_header";

pub struct FixNavTransform;

impl FixNavTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixNavTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for FixNavTransform {
    fn name(&self) -> &str {
        "fix-nav"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        if let Some(navbar) = doc.find_path(|e| e.name == "nav" && e.has_class("ltx_page_navbar")) {
            doc.unwrap(&navbar);
        }

        let Some(toc_path) = doc.find_path(|e| e.name == "nav" && e.has_class("ltx_TOC")) else {
            ctx.target_missing(self.name(), "`nav.ltx_TOC`");
            return Ok(());
        };

        if let Some(toc) = doc.element_at_mut(&toc_path) {
            toc.set_attribute("aria-labelledby", TOC_HEADER_ID);
            let labelled = toc
                .child_elements()
                .next()
                .is_some_and(|first| first.id() == Some(TOC_HEADER_ID));
            if !labelled {
                toc.insert_child(
                    0,
                    HtmlElement::new("h2")
                        .with_attr("id", TOC_HEADER_ID)
                        .with_text("Table of Contents"),
                );
            }
        }

        let Some(main_path) = doc.find_path_by_id(MAIN_ID) else {
            tracing::debug!(transform = self.name(), "No #main to move the table of contents into");
            return Ok(());
        };
        if toc_path.contains(&main_path) {
            return Ok(());
        }

        let Some(toc) = doc.remove(&toc_path) else {
            return Ok(());
        };
        // Removing the toc can shift the path of #main.
        if let Some(main_path) = doc.find_path_by_id(MAIN_ID) {
            if let Some(main) = doc.element_at_mut(&main_path) {
                main.insert_child(0, toc);
            }
        }
        Ok(())
    }
}
