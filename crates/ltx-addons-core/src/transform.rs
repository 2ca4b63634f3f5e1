/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document transformation pipeline infrastructure.
 */

//! Document transformation pipeline infrastructure.
//!
//! - [`DocumentTransform`] - The trait implemented by every decoration step
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//!
//! Transforms run in a flat, ordered sequence (insertion order). Each one
//! mutates the HTML tree in place and may record diagnostics on the
//! [`DecorateContext`]. A transform whose target element is absent does
//! nothing; only internal failures are errors.
//!
//! # Example
//!
//! ```rust
//! use ltx_addons_core::{AddonsConfig, DecorateContext, PaperInfo, Result};
//! use ltx_addons_core::transform::{DocumentTransform, TransformPipeline};
//! use ltx_html::HtmlDocument;
//!
//! struct LangTransform;
//!
//! impl DocumentTransform for LangTransform {
//!     fn name(&self) -> &str { "lang" }
//!
//!     fn transform(&self, doc: &mut HtmlDocument, _ctx: &mut DecorateContext<'_>) -> Result<()> {
//!         if let Some(path) = doc.find_path(|e| e.name == "html") {
//!             if let Some(html) = doc.element_at_mut(&path) {
//!                 html.set_attribute("lang", "en");
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.push(Box::new(LangTransform));
//!
//! let config = AddonsConfig::default();
//! let paper = PaperInfo::default();
//! let mut ctx = DecorateContext::new(&config, &paper);
//! let mut doc = ltx_html::parse("<html><body></body></html>").unwrap();
//! pipeline.execute(&mut doc, &mut ctx).unwrap();
//! assert_eq!(doc.to_string(), r#"<html lang="en"><body></body></html>"#);
//! ```

use ltx_html::HtmlDocument;

use crate::Result;
use crate::context::DecorateContext;

/// A decoration step applied to a parsed document.
///
/// Transforms must be `Send + Sync` so a batch run can share one pipeline.
pub trait DocumentTransform: Send + Sync {
    /// Human-readable name for this transform.
    ///
    /// Used for logging and in diagnostics.
    fn name(&self) -> &str;

    /// Apply the transformation to the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()>;
}

/// A pipeline of document transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn DocumentTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn DocumentTransform>) {
        self.transforms.push(transform);
    }

    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn DocumentTransform>>) {
        self.transforms.extend(transforms);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn execute(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(doc, ctx)?;
        }

        Ok(())
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddonsConfig;
    use crate::context::PaperInfo;
    use crate::error::AddonsError;
    use std::sync::{Arc, Mutex};

    /// Appends its order number to a shared log.
    struct RecordingTransform {
        name: &'static str,
        order: usize,
        log: Arc<Mutex<Vec<usize>>>,
    }

    impl DocumentTransform for RecordingTransform {
        fn name(&self) -> &str {
            self.name
        }

        fn transform(&self, _doc: &mut HtmlDocument, _ctx: &mut DecorateContext<'_>) -> Result<()> {
            self.log.lock().unwrap().push(self.order);
            Ok(())
        }
    }

    struct FailingTransform;

    impl DocumentTransform for FailingTransform {
        fn name(&self) -> &str {
            "failing"
        }

        fn transform(&self, _doc: &mut HtmlDocument, _ctx: &mut DecorateContext<'_>) -> Result<()> {
            Err(AddonsError::Transform("failed intentionally".to_string()))
        }
    }

    fn recording(name: &'static str, order: usize, log: &Arc<Mutex<Vec<usize>>>) -> Box<dyn DocumentTransform> {
        Box::new(RecordingTransform {
            name,
            order,
            log: log.clone(),
        })
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = TransformPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }

    #[test]
    fn test_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TransformPipeline::new();
        pipeline.push(recording("first", 1, &log));
        pipeline.extend([recording("second", 2, &log), recording("third", 3, &log)]);
        assert_eq!(pipeline.transform_names(), vec!["first", "second", "third"]);

        let config = AddonsConfig::default();
        let paper = PaperInfo::default();
        let mut ctx = DecorateContext::new(&config, &paper);
        let mut doc = HtmlDocument::default();
        pipeline.execute(&mut doc, &mut ctx).unwrap();

        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stops_at_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TransformPipeline::new();
        pipeline.push(recording("before", 1, &log));
        pipeline.push(Box::new(FailingTransform));
        pipeline.push(recording("after", 2, &log));

        let config = AddonsConfig::default();
        let paper = PaperInfo::default();
        let mut ctx = DecorateContext::new(&config, &paper);
        let mut doc = HtmlDocument::default();
        let err = pipeline.execute(&mut doc, &mut ctx).unwrap_err();

        assert!(matches!(err, AddonsError::Transform(_)));
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }
}
