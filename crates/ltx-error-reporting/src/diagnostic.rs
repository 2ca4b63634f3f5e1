//! Core diagnostic message types.
//!
//! This module defines the fundamental structures for representing diagnostic messages
//! (errors, warnings, info) following tidyverse-style guidelines.

use serde::{Deserialize, Serialize};

use crate::source::{SourceFile, SourceSpan};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
    /// A note providing additional context
    Note,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
            DiagnosticKind::Note => "note",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Error detail (✖ bullet in tidyverse style)
    Error,
    /// Info detail (i bullet in tidyverse style)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(&self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
    /// Where in the input this detail applies, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceSpan>,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "L-2-1") for searchability
/// 2. **Title**: Brief message
/// 3. **Kind**: Error, Warning, Info, Note
/// 4. **Problem**: What went wrong (the "must" or "can't" statement)
/// 5. **Details**: Specific information (bulleted)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    pub kind: DiagnosticKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<DetailItem>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hints: Vec<String>,

    /// Where in the input the issue occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceSpan>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Prefer [`DiagnosticMessageBuilder`](crate::DiagnosticMessageBuilder) for anything
    /// with a problem statement or details.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
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

    /// Set the error code.
    ///
    /// Error codes follow the format `L-<subsystem>-<number>` (e.g., "L-1-1").
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Get the documentation URL for this diagnostic, if it has a catalogued code.
    pub fn docs_url(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|code| crate::catalog::get_docs_url(code))
    }

    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// Format:
    /// ```text
    /// Warning [L-2-1]: title
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// • Note detail
    /// ? Hint
    /// ```
    ///
    /// When `file` is given and the diagnostic has a location inside it, an
    /// ariadne snippet replaces the title and problem lines.
    pub fn to_text(&self, file: Option<&SourceFile>) -> String {
        use std::fmt::Write;

        let mut result = String::new();

        let snippet = match (&self.location, file) {
            (Some(location), Some(file)) => self.render_ariadne_source_context(location, file),
            _ => None,
        };

        match &snippet {
            Some(rendered) => result.push_str(rendered),
            None => {
                match &self.code {
                    Some(code) => {
                        let _ = writeln!(result, "{} [{}]: {}", self.kind.label(), code, self.title);
                    }
                    None => {
                        let _ = writeln!(result, "{}: {}", self.kind.label(), self.title);
                    }
                }
                if let Some(problem) = &self.problem {
                    let _ = writeln!(result, "{}", problem);
                }
            }
        }

        // ariadne already shows located details as labels
        for detail in &self.details {
            if snippet.is_some() && detail.location.is_some() {
                continue;
            }
            let _ = writeln!(result, "{} {}", detail.kind.bullet(), detail.content);
        }

        for hint in &self.hints {
            let _ = writeln!(result, "? {}", hint);
        }

        result
    }

    /// Render this diagnostic message as a JSON value.
    ///
    /// # Example
    ///
    /// ```
    /// use ltx_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::warning("Missing Bibliography Entry");
    /// let json = msg.to_json();
    /// assert_eq!(json["kind"], "warning");
    /// assert_eq!(json["title"], "Missing Bibliography Entry");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "kind": self.kind.as_str(),
                "title": self.title,
            })
        })
    }

    /// Render the source snippet with ariadne.
    ///
    /// Returns `None` when the location does not fall inside `file`.
    fn render_ariadne_source_context(
        &self,
        location: &SourceSpan,
        file: &SourceFile,
    ) -> Option<String> {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        if !file.contains(location) {
            return None;
        }

        let (report_kind, main_color) = match self.kind {
            DiagnosticKind::Error => (ReportKind::Error, Color::Red),
            DiagnosticKind::Warning => (ReportKind::Warning, Color::Yellow),
            DiagnosticKind::Info => (ReportKind::Advice, Color::Cyan),
            DiagnosticKind::Note => (ReportKind::Advice, Color::Blue),
        };

        let mut report = Report::build(report_kind, file.path.clone(), location.start)
            .with_config(Config::default().with_color(false));

        if let Some(code) = &self.code {
            report = report.with_message(format!("[{}] {}", code, self.title));
        } else {
            report = report.with_message(&self.title);
        }

        let main_message = self.problem.as_deref().unwrap_or(&self.title);
        report = report.with_label(
            Label::new((file.path.clone(), location.range()))
                .with_message(main_message)
                .with_color(main_color),
        );

        for detail in &self.details {
            let Some(detail_loc) = &detail.location else {
                continue;
            };
            if !file.contains(detail_loc) {
                continue;
            }
            let detail_color = match detail.kind {
                DetailKind::Error => Color::Red,
                DetailKind::Info => Color::Cyan,
                DetailKind::Note => Color::Blue,
            };
            report = report.with_label(
                Label::new((file.path.clone(), detail_loc.range()))
                    .with_message(&detail.content)
                    .with_color(detail_color),
            );
        }

        let mut output = Vec::new();
        report
            .finish()
            .write((file.path.clone(), Source::from(file.content.as_str())), &mut output)
            .ok()?;

        String::from_utf8(output).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticMessageBuilder;

    #[test]
    fn test_diagnostic_message_new() {
        let msg = DiagnosticMessage::new(DiagnosticKind::Error, "Test error");
        assert_eq!(msg.title, "Test error");
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert!(msg.code.is_none());
        assert!(msg.problem.is_none());
        assert!(msg.details.is_empty());
        assert!(msg.hints.is_empty());
    }

    #[test]
    fn test_docs_url() {
        let msg = DiagnosticMessage::error("Internal Error").with_code("L-0-1");
        assert!(msg.docs_url().unwrap().contains("L-0-1"));
        assert!(DiagnosticMessage::error("no code").docs_url().is_none());
    }

    #[test]
    fn test_to_text_simple() {
        let msg = DiagnosticMessage::warning("Something odd");
        insta::assert_snapshot!(msg.to_text(None).trim_end(), @"Warning: Something odd");
    }

    #[test]
    fn test_to_text_full_message() {
        let msg = DiagnosticMessageBuilder::warning("Malformed Citation Label")
            .with_code("L-2-1")
            .problem("Citation labels must be positive integers")
            .add_detail("Found label `x`")
            .add_info("The label was excluded from the marker")
            .add_hint("Fix the bibitem label?")
            .build();

        let text = msg.to_text(None);
        assert_eq!(
            text,
            "Warning [L-2-1]: Malformed Citation Label\n\
             Citation labels must be positive integers\n\
             ✖ Found label `x`\n\
             ℹ The label was excluded from the marker\n\
             ? Fix the bibitem label?\n"
        );
    }

    #[test]
    fn test_to_text_with_source_snippet() {
        let file = SourceFile::new("paper.html", "<p><cite>[<a>x</a>]</cite></p>\n");
        let msg = DiagnosticMessageBuilder::warning("Malformed Citation Label")
            .with_code("L-2-1")
            .problem("label is not a number")
            .with_location(SourceSpan::new(10, 18))
            .add_hint("Fix the bibitem label?")
            .build();

        let text = msg.to_text(Some(&file));
        assert!(text.contains("[L-2-1] Malformed Citation Label"));
        assert!(text.contains("paper.html"));
        assert!(text.contains("label is not a number"));
        assert!(text.ends_with("? Fix the bibitem label?\n"));
    }

    #[test]
    fn test_out_of_bounds_location_falls_back_to_plain_text() {
        let file = SourceFile::new("paper.html", "<p></p>");
        let msg = DiagnosticMessageBuilder::info("Far away")
            .with_location(SourceSpan::new(100, 120))
            .build();
        assert_eq!(msg.to_text(Some(&file)), "Info: Far away\n");
    }

    #[test]
    fn test_to_json_full_message() {
        let msg = DiagnosticMessageBuilder::warning("Missing Bibliography Entry")
            .with_code("L-3-1")
            .add_info("bib.4")
            .with_location(SourceSpan::new(1, 2))
            .build();

        let json = msg.to_json();
        assert_eq!(json["kind"], "warning");
        assert_eq!(json["code"], "L-3-1");
        assert_eq!(json["details"][0]["kind"], "info");
        assert_eq!(json["details"][0]["content"], "bib.4");
        assert_eq!(json["location"]["start"], 1);
        assert!(json.get("hints").is_none());
    }
}
