//! Accessibility decoration for LaTeXML article pages.
//!
//! This crate rewrites the HTML that LaTeXML produces for arXiv papers into
//! the reader-facing page: numeric citation markers collapse into ranges
//! (`[1, 2, 3, 5]` becomes `[1-3,5]`), each range opens a shared dialog
//! listing the bibliography entries it covers, and the page gains a header,
//! a footer and a labelled table of contents.
//!
//! # Architecture
//!
//! - [`citations`] - Pure range compression over citation numbers
//! - [`modal`] - The citation dialog and its state machine
//! - [`transform`] - The [`DocumentTransform`] trait and pipeline
//! - [`transforms`] - The individual decoration steps
//! - [`decorate`] - Parse, transform and serialize one page
//!
//! # Example
//!
//! ```rust
//! use ltx_addons_core::{AddonsConfig, PaperInfo, decorate_html};
//!
//! let html = concat!(
//!     r##"<html><body><p><cite class="ltx_cite">[<a href="#bib.1">1</a>, "##,
//!     r##"<a href="#bib.2">2</a>, <a href="#bib.3">3</a>]</cite></p></body></html>"##,
//! );
//! let output = decorate_html(html, &AddonsConfig::default(), &PaperInfo::default()).unwrap();
//! assert!(output.html.contains(r#"data-range="1-3""#));
//! ```

pub mod citations;
pub mod config;
pub mod context;
pub mod decorate;
pub mod error;
pub mod modal;
pub mod transform;
pub mod transforms;

pub use citations::{CitationGroup, CitationNumber, CitationRange, compress, expand, render_marker};
pub use config::AddonsConfig;
pub use context::{DecorateContext, PaperInfo};
pub use decorate::{
    DecorateOutput, build_pipeline, decorate_document, decorate_file, decorate_html,
    decorate_source,
};
pub use error::{AddonsError, ParseError, Result};
pub use modal::{Key, ModalController, ModalEvent, ModalOptions, ModalState, Transition};
pub use transform::{DocumentTransform, TransformPipeline};
