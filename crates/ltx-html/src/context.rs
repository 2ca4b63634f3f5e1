//! Context for HTML parsing with diagnostic collection.

use ltx_error_reporting::{DiagnosticKind, DiagnosticMessage};

/// Context for HTML parsing that collects diagnostics.
///
/// The parser is lenient: stray end tags and elements closed by an enclosing
/// end tag do not fail the parse. They are recorded here as warnings so a
/// caller can surface them next to its own diagnostics.
///
/// # Example
///
/// ```rust
/// use ltx_html::{HtmlParseContext, parse_with_context};
///
/// let mut ctx = HtmlParseContext::new();
/// let doc = parse_with_context("<div><span>text</div></em>", &mut ctx).unwrap();
/// assert_eq!(doc.to_string(), "<div><span>text</span></div>");
/// assert_eq!(ctx.diagnostics().len(), 2);
/// assert!(!ctx.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct HtmlParseContext {
    diagnostics: Vec<DiagnosticMessage>,
}

impl HtmlParseContext {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Check if any errors (not warnings) have been collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }
}
