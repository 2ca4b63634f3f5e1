//! Diagnostic messages for the LaTeXML HTML addons.
//!
//! Every recoverable problem the decorator runs into (a citation label that is
//! not a number, a bibliography entry that does not exist, a landmark element
//! that is missing) is reported as a [`DiagnosticMessage`] rather than an
//! error. Diagnostics follow the tidyverse structure used throughout the
//! project: a title, an optional problem statement, bulleted details and
//! hints ending in `?`.
//!
//! # Example
//!
//! ```
//! use ltx_error_reporting::{DiagnosticKind, DiagnosticMessageBuilder};
//!
//! let warning = DiagnosticMessageBuilder::warning("Malformed Citation Label")
//!     .with_code("L-2-1")
//!     .problem("Citation labels must be positive integers")
//!     .add_detail("Found label `a`")
//!     .add_hint("Check the LaTeX source for a non-numeric \\bibitem label?")
//!     .build();
//!
//! assert_eq!(warning.kind, DiagnosticKind::Warning);
//! assert!(warning.to_text(None).contains("[L-2-1]"));
//! ```
//!
//! # Source locations
//!
//! Diagnostics may carry a [`SourceSpan`] (byte offsets into the HTML input).
//! When rendered together with the matching [`SourceFile`], the output includes
//! an ariadne source snippet.

pub mod builder;
pub mod catalog;
pub mod diagnostic;
pub mod source;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_docs_url, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
pub use source::{SourceFile, SourceSpan};
