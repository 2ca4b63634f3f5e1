//! Error types for ltx-addons-core

use ltx_error_reporting::{DiagnosticMessage, SourceFile};
use thiserror::Error;

/// Structured parse error with diagnostics and the source they point into.
///
/// Keeping the source lets callers render ariadne snippets for the
/// diagnostics instead of bare byte offsets.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Diagnostic messages from parsing
    pub diagnostics: Vec<DiagnosticMessage>,
    /// The input that failed to parse
    pub source_file: SourceFile,
}

impl ParseError {
    pub fn new(diagnostics: Vec<DiagnosticMessage>, source_file: SourceFile) -> Self {
        Self {
            diagnostics,
            source_file,
        }
    }

    /// Render all diagnostics with source snippets.
    pub fn render(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_text(Some(&self.source_file)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for ParseError {}

#[derive(Error, Debug)]
pub enum AddonsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[source] ParseError),

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: String, message: String },

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("{0}")]
    Other(String),
}

impl AddonsError {
    /// Create an error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// The diagnostics behind this error, or a single generic one.
    pub fn to_diagnostics(&self) -> Vec<DiagnosticMessage> {
        use ltx_error_reporting::DiagnosticMessageBuilder;

        match self {
            AddonsError::Parse(err) => err.diagnostics.clone(),
            AddonsError::Config { path, message } => {
                vec![
                    DiagnosticMessageBuilder::error("Invalid Configuration")
                        .with_code("L-4-2")
                        .problem(message.clone())
                        .add_detail(format!("While reading `{}`", path))
                        .build(),
                ]
            }
            other => vec![
                DiagnosticMessageBuilder::error("Internal Error")
                    .with_code("L-0-1")
                    .problem(other.to_string())
                    .build(),
            ],
        }
    }
}

pub type Result<T> = std::result::Result<T, AddonsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_diagnostic() {
        let err = AddonsError::Config {
            path: "_addons.yml".to_string(),
            message: "unknown field `colour`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration in _addons.yml: unknown field `colour`"
        );
        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics[0].code.as_deref(), Some("L-4-2"));
    }

    #[test]
    fn test_other_error_is_internal() {
        let diagnostics = AddonsError::other("boom").to_diagnostics();
        assert_eq!(diagnostics[0].code.as_deref(), Some("L-0-1"));
        assert_eq!(diagnostics[0].problem.as_deref(), Some("boom"));
    }
}
