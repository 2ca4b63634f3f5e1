//! Error types for HTML parsing with source locations.

use ltx_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, SourceSpan};
use thiserror::Error;

/// Result type alias for ltx-html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for parse operations that return diagnostics.
pub type ParseResult<T> = std::result::Result<T, Vec<DiagnosticMessage>>;

/// Errors that can occur during HTML parsing.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Tokenizer error from quick-xml.
    #[error("HTML syntax error: {message}{}", at_byte(.position))]
    Syntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// The input contains no elements.
    #[error("Empty HTML document: no elements found")]
    EmptyDocument,

    /// The input bytes are not UTF-8.
    #[error("HTML input is not valid UTF-8: {message}")]
    InvalidUtf8 { message: String, valid_up_to: usize },
}

fn at_byte(position: &Option<u64>) -> String {
    match position {
        Some(pos) => format!(" at byte {}", pos),
        None => String::new(),
    }
}

impl Error {
    /// Convert this error to a DiagnosticMessage with the appropriate L-1-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::Syntax { message, position } => {
                let mut builder = DiagnosticMessageBuilder::error("HTML Syntax Error")
                    .with_code("L-1-1")
                    .problem(message.clone());

                if let Some(pos) = position {
                    builder = builder
                        .add_detail(format!("Error at byte offset {}", pos))
                        .with_location(SourceSpan::new(*pos as usize, *pos as usize + 1));
                }

                builder
                    .add_hint("Is the file complete LaTeXML HTML output?")
                    .build()
            }

            Error::EmptyDocument => DiagnosticMessageBuilder::error("Empty HTML Document")
                .with_code("L-1-2")
                .problem("The HTML input contains no elements")
                .build(),

            Error::InvalidUtf8 {
                message,
                valid_up_to,
            } => DiagnosticMessageBuilder::error("Invalid UTF-8")
                .with_code("L-1-3")
                .problem(message.clone())
                .add_detail(format!("The first {} bytes are valid", valid_up_to))
                .add_hint("Re-encode the file as UTF-8?")
                .build(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Syntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Syntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::Syntax {
            message: "bad".to_string(),
            position: Some(3),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code.as_deref(), Some("L-1-1"));
        assert_eq!(diag.location, Some(SourceSpan::new(3, 4)));

        assert_eq!(Error::EmptyDocument.to_diagnostic().code.as_deref(), Some("L-1-2"));

        let err = Error::InvalidUtf8 {
            message: "invalid utf-8 sequence".to_string(),
            valid_up_to: 7,
        };
        assert_eq!(err.to_diagnostic().code.as_deref(), Some("L-1-3"));
    }

    #[test]
    fn test_display() {
        let err = Error::Syntax {
            message: "unexpected token".to_string(),
            position: Some(42),
        };
        assert_eq!(err.to_string(), "HTML syntax error: unexpected token at byte 42");

        let err = Error::Syntax {
            message: "unexpected token".to_string(),
            position: None,
        };
        assert_eq!(err.to_string(), "HTML syntax error: unexpected token");
    }
}
