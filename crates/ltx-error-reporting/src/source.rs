/*
 * source.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Byte-offset source spans for HTML input.
 */

//! Source locations.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A half-open byte range `[start, end)` into an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// A span that covers nothing, used for synthesized nodes.
    pub fn synthetic() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(&self, other: &SourceSpan) -> SourceSpan {
        SourceSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// An input file as seen by diagnostics rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display path (used as the ariadne source id).
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Does `span` lie inside this file's content?
    pub fn contains(&self, span: &SourceSpan) -> bool {
        span.end <= self.content.len()
            && self.content.is_char_boundary(span.start)
            && self.content.is_char_boundary(span.end)
    }

    /// The text covered by `span`, if it is in bounds.
    pub fn slice(&self, span: &SourceSpan) -> Option<&str> {
        if self.contains(span) {
            Some(&self.content[span.range()])
        } else {
            None
        }
    }
}
