/*
 * main_landmark.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Marks the main content region.
 */

//! Main content landmark.

use ltx_html::HtmlDocument;

use crate::Result;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;

/// The id the skip link and the table of contents point at.
pub const MAIN_ID: &str = "main";

/// Gives `div.ltx_page_main` the id `main`.
pub struct MainLandmarkTransform;

impl MainLandmarkTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MainLandmarkTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for MainLandmarkTransform {
    fn name(&self) -> &str {
        "main-landmark"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        let Some(path) = doc.find_path(|e| e.name == "div" && e.has_class("ltx_page_main")) else {
            ctx.target_missing(self.name(), "`div.ltx_page_main`");
            return Ok(());
        };
        if let Some(main) = doc.element_at_mut(&path) {
            main.set_attribute("id", MAIN_ID);
        }
        Ok(())
    }
}
