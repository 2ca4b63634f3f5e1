/*
 * decorate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The decoration pipeline: parse, transform, serialize.
 */

//! The decoration pipeline.
//!
//! [`decorate_html`] is the single entry point used by the CLI and the
//! integration tests. It:
//! 1. Parses the LaTeXML HTML, keeping the parser's warnings
//! 2. Runs the transforms selected by [`build_pipeline`]
//! 3. Serializes the decorated tree back to HTML

use std::path::Path;

use ltx_error_reporting::{DiagnosticMessage, SourceFile};
use ltx_html::{HtmlDocument, HtmlParseContext};

use crate::config::AddonsConfig;
use crate::context::{DecorateContext, PaperInfo};
use crate::error::{AddonsError, ParseError, Result};
use crate::transform::TransformPipeline;
use crate::transforms::{
    BackReferencesTransform, CitationModalTransform, CitationRangesTransform, FaviconTransform,
    FixNavTransform, FooterTransform, HeaderTransform, MainLandmarkTransform,
    StripFooterTransform,
};

/// Output of decorating one document.
#[derive(Debug)]
pub struct DecorateOutput {
    /// The decorated HTML.
    pub html: String,
    /// Non-fatal diagnostics from parsing and decoration, in order.
    pub diagnostics: Vec<DiagnosticMessage>,
}

/// Build the decoration pipeline for `config`.
///
/// Transforms run in this order, each only when enabled:
/// 1. `strip-footer`
/// 2. `main-landmark`
/// 3. `fix-nav`
/// 4. `favicon`
/// 5. `header`
/// 6. `citation-ranges`
/// 7. `back-references` (needs the token ids from `citation-ranges`)
/// 8. `citation-modal`
/// 9. `footer` (inserted before the dialog)
pub fn build_pipeline(config: &AddonsConfig) -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();
    let navigation = &config.navigation;

    if navigation.strip_latexml_footer {
        pipeline.push(Box::new(StripFooterTransform::new()));
    }
    if navigation.main_landmark {
        pipeline.push(Box::new(MainLandmarkTransform::new()));
    }
    if navigation.fix_toc {
        pipeline.push(Box::new(FixNavTransform::new()));
    }
    if config.favicon.is_some() {
        pipeline.push(Box::new(FaviconTransform::new()));
    }
    if config.header.enabled {
        pipeline.push(Box::new(HeaderTransform::new()));
    }
    if config.citations.enabled {
        pipeline.push(Box::new(CitationRangesTransform::new()));
        if config.citations.back_references {
            pipeline.push(Box::new(BackReferencesTransform::new()));
        }
    }
    if config.modal.enabled {
        pipeline.push(Box::new(CitationModalTransform::new()));
    }
    if config.footer.enabled {
        pipeline.push(Box::new(FooterTransform::new()));
    }
    pipeline
}

/// Decorate an already parsed document in place.
///
/// Returns the diagnostics the transforms recorded.
pub fn decorate_document(
    doc: &mut HtmlDocument,
    config: &AddonsConfig,
    paper: &PaperInfo,
) -> Result<Vec<DiagnosticMessage>> {
    let pipeline = build_pipeline(config);
    tracing::debug!(transforms = ?pipeline.transform_names(), "Running decoration pipeline");

    let mut ctx = DecorateContext::new(config, paper);
    pipeline.execute(doc, &mut ctx)?;
    Ok(ctx.diagnostics)
}

/// Parse, decorate and serialize one LaTeXML page.
///
/// # Errors
///
/// Returns [`AddonsError::Parse`] if the input is not usable HTML, and
/// propagates internal transform failures. Missing decoration targets are
/// diagnostics, not errors.
pub fn decorate_html(source: &str, config: &AddonsConfig, paper: &PaperInfo) -> Result<DecorateOutput> {
    decorate_source("<input>", source, config, paper)
}

/// Like [`decorate_html`], reading `path` and deriving the paper from its
/// parent directory name.
pub fn decorate_file(path: &Path, config: &AddonsConfig) -> Result<DecorateOutput> {
    let bytes = std::fs::read(path)?;
    let source = String::from_utf8(bytes).map_err(|err| {
        let utf8 = err.utf8_error();
        let diagnostic = ltx_html::Error::InvalidUtf8 {
            message: utf8.to_string(),
            valid_up_to: utf8.valid_up_to(),
        }
        .to_diagnostic();
        AddonsError::Parse(ParseError::new(
            vec![diagnostic],
            SourceFile::new(path.display().to_string(), String::from_utf8_lossy(err.as_bytes())),
        ))
    })?;
    let paper = PaperInfo::from_path(path);
    decorate_source(&path.display().to_string(), &source, config, &paper)
}

/// Like [`decorate_html`], with `name` identifying the input in parse errors.
pub fn decorate_source(
    name: &str,
    source: &str,
    config: &AddonsConfig,
    paper: &PaperInfo,
) -> Result<DecorateOutput> {
    let mut parse_ctx = HtmlParseContext::new();
    let mut doc = ltx_html::parse_with_context(source, &mut parse_ctx).map_err(|diagnostics| {
        AddonsError::Parse(ParseError::new(diagnostics, SourceFile::new(name, source)))
    })?;

    let mut diagnostics = parse_ctx.take_diagnostics();
    diagnostics.extend(decorate_document(&mut doc, config, paper)?);

    Ok(DecorateOutput {
        html: doc.to_string(),
        diagnostics,
    })
}
