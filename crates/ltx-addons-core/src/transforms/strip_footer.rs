/*
 * strip_footer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Removes the LaTeXML page footer.
 */

//! Remove the footer LaTeXML writes, so the page footer can replace it.

use ltx_html::HtmlDocument;

use crate::Result;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;

/// Removes the first `<footer>` in the document.
pub struct StripFooterTransform;

impl StripFooterTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StripFooterTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for StripFooterTransform {
    fn name(&self) -> &str {
        "strip-footer"
    }

    fn transform(&self, doc: &mut HtmlDocument, _ctx: &mut DecorateContext<'_>) -> Result<()> {
        match doc.find_path_by_tag("footer") {
            Some(path) => {
                doc.remove(&path);
            }
            None => tracing::debug!(transform = self.name(), "No footer to strip"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::run_transform;
    use crate::{AddonsConfig, PaperInfo};

    #[test]
    fn test_removes_first_footer_only() {
        let (doc, diagnostics) = run_transform(
            &StripFooterTransform::new(),
            r#"<body><div>x</div><footer class="ltx_page_footer">L</footer><footer>second</footer></body>"#,
            &AddonsConfig::default(),
            &PaperInfo::default(),
        );
        assert_eq!(doc.to_string(), "<body><div>x</div><footer>second</footer></body>");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_no_footer_is_a_no_op() {
        let (doc, diagnostics) = run_transform(
            &StripFooterTransform::new(),
            "<body><p>x</p></body>",
            &AddonsConfig::default(),
            &PaperInfo::default(),
        );
        assert_eq!(doc.to_string(), "<body><p>x</p></body>");
        assert!(diagnostics.is_empty());
    }
}
