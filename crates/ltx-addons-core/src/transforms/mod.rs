/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Decoration transforms for LaTeXML article pages.
 */

//! Decoration transforms for LaTeXML article pages.
//!
//! In pipeline order:
//!
//! - [`StripFooterTransform`] - Removes the footer LaTeXML writes
//! - [`MainLandmarkTransform`] - Gives `div.ltx_page_main` the `main` id
//! - [`FixNavTransform`] - Moves a labelled table of contents into `#main`
//! - [`FaviconTransform`] - Links the configured icon from `<head>`
//! - [`HeaderTransform`] - Adds the page header bar
//! - [`CitationRangesTransform`] - Collapses citation markers into range tokens
//! - [`BackReferencesTransform`] - Links bibliography entries back to their citations
//! - [`CitationModalTransform`] - Installs the hidden citation dialog
//! - [`FooterTransform`] - Adds the keyboard glossary and page footer
//!
//! These implement [`DocumentTransform`](crate::transform::DocumentTransform)
//! and are assembled by [`build_pipeline`](crate::decorate::build_pipeline).

mod back_references;
mod citation_modal;
mod citation_ranges;
mod favicon;
mod fix_nav;
mod footer;
mod header;
mod main_landmark;
mod strip_footer;

pub use back_references::BackReferencesTransform;
pub use citation_modal::CitationModalTransform;
pub use citation_ranges::CitationRangesTransform;
pub use favicon::FaviconTransform;
pub use fix_nav::FixNavTransform;
pub use footer::FooterTransform;
pub use header::HeaderTransform;
pub use main_landmark::MainLandmarkTransform;
pub use strip_footer::StripFooterTransform;

/// Decorate a freshly parsed document with a single transform.
#[cfg(test)]
pub(crate) fn run_transform(
    transform: &dyn crate::transform::DocumentTransform,
    html: &str,
    config: &crate::AddonsConfig,
    paper: &crate::PaperInfo,
) -> (ltx_html::HtmlDocument, Vec<ltx_error_reporting::DiagnosticMessage>) {
    let mut doc = ltx_html::parse(html).unwrap();
    let mut ctx = crate::DecorateContext::new(config, paper);
    transform.transform(&mut doc, &mut ctx).unwrap();
    (doc, ctx.diagnostics)
}
