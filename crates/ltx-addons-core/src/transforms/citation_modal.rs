/*
 * citation_modal.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that installs the citation dialog.
 */

//! Installs the hidden citation dialog.

use ltx_html::HtmlDocument;

use crate::Result;
use crate::context::DecorateContext;
use crate::modal::install_dialog;
use crate::transform::DocumentTransform;

/// Appends the shared, hidden citation dialog to `<body>`.
///
/// The page script opens it when a range token is activated; see
/// [`ModalController`](crate::modal::ModalController) for its behavior.
pub struct CitationModalTransform;

impl CitationModalTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CitationModalTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for CitationModalTransform {
    fn name(&self) -> &str {
        "citation-modal"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        if install_dialog(doc, &ctx.config.modal_options()).is_none() {
            ctx.target_missing(self.name(), "`<body>`");
        }
        Ok(())
    }
}
