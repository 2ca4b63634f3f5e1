//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse structure: one problem statement, a
//! handful of details (error/info/note bullets) and hints phrased as
//! questions.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use crate::source::SourceSpan;

/// Builder for [`DiagnosticMessage`].
///
/// # Example
///
/// ```
/// use ltx_error_reporting::DiagnosticMessageBuilder;
///
/// let msg = DiagnosticMessageBuilder::info("Citation Marker Left Unchanged")
///     .with_code("L-2-2")
///     .problem("The marker contains no numeric citation labels")
///     .add_note("Author-year markers are left as written")
///     .build();
///
/// assert_eq!(msg.details.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    pub fn note(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Note, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// Set the problem statement (the "must" or "can't" sentence).
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(self, detail: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, detail.into(), None)
    }

    /// Add an error detail pointing at a location in the input.
    pub fn add_detail_at(self, detail: impl Into<String>, location: SourceSpan) -> Self {
        self.push_detail(DetailKind::Error, detail.into(), Some(location))
    }

    /// Add an info detail (ℹ bullet).
    pub fn add_info(self, info: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, info.into(), None)
    }

    /// Add a note detail (• bullet).
    pub fn add_note(self, note: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Note, note.into(), None)
    }

    /// Add a hint. Hints should end with a question mark.
    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn with_location(mut self, location: SourceSpan) -> Self {
        self.message.location = Some(location);
        self
    }

    /// Attach a location only when one is known.
    pub fn with_optional_location(mut self, location: Option<SourceSpan>) -> Self {
        self.message.location = location;
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }

    fn push_detail(mut self, kind: DetailKind, content: String, location: Option<SourceSpan>) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content,
            location,
        });
        self
    }
}
