//! Command implementations for the ltx-addons CLI
//!
//! Each command module handles the CLI interface and delegates to
//! ltx-addons-core for the actual work.

pub mod decorate;
pub mod modal;
pub mod ranges;

use ltx_error_reporting::{DiagnosticMessage, SourceFile};

/// Print diagnostics to stderr, as text with source snippets or as JSON lines.
pub(crate) fn report(diagnostics: &[DiagnosticMessage], source: Option<&SourceFile>, json: bool) {
    for diagnostic in diagnostics {
        if json {
            eprintln!("{}", diagnostic.to_json());
        } else {
            eprintln!("{}", diagnostic.to_text(source));
        }
    }
}
