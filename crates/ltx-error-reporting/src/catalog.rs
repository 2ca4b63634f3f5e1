//! Error code catalog and lookup.
//!
//! This module provides access to the centralized error catalog, which maps
//! error codes (like "L-2-1") to their metadata (title, message template, docs URL, etc.).
//!
//! Codes are grouped by subsystem: `L-0-*` internal, `L-1-*` HTML parsing,
//! `L-2-*` citation markers, `L-3-*` the citation modal, `L-4-*` decoration
//! and configuration.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "html", "citations", "modal")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// Default message template
    pub message_template: String,

    /// URL to documentation (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, embedded at compile time and parsed on first use.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid. This can only happen if
/// `error_catalog.json` is edited by hand into an invalid state.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in ltx-addons")
});

/// Look up error code information.
///
/// # Example
///
/// ```
/// use ltx_error_reporting::catalog::get_error_info;
///
/// let info = get_error_info("L-2-1").unwrap();
/// assert_eq!(info.subsystem, "citations");
/// ```
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get documentation URL for an error code.
pub fn get_docs_url(code: &str) -> Option<&str> {
    ERROR_CATALOG
        .get(code)
        .and_then(|info| info.docs_url.as_deref())
}

/// Get the subsystem name for an error code.
pub fn get_subsystem(code: &str) -> Option<&str> {
    ERROR_CATALOG.get(code).map(|info| info.subsystem.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        assert!(!ERROR_CATALOG.is_empty());
    }

    #[test]
    fn test_internal_error_exists() {
        let info = get_error_info("L-0-1").unwrap();
        assert_eq!(info.subsystem, "internal");
        assert_eq!(info.title, "Internal Error");
        assert!(info.docs_url.is_some());
    }

    #[test]
    fn test_every_code_matches_its_subsystem() {
        for (code, info) in ERROR_CATALOG.iter() {
            let expected = match code.split('-').nth(1) {
                Some("0") => "internal",
                Some("1") => "html",
                Some("2") => "citations",
                Some("3") => "modal",
                Some("4") => "decorate",
                other => panic!("unexpected subsystem number {:?} in {}", other, code),
            };
            assert_eq!(info.subsystem, expected, "code {}", code);
        }
    }

    #[test]
    fn test_get_subsystem() {
        assert_eq!(get_subsystem("L-3-1"), Some("modal"));
        assert_eq!(get_subsystem("L-999-999"), None);
    }

    #[test]
    fn test_docs_url_optional() {
        assert!(get_docs_url("L-2-1").is_some());
        assert!(get_docs_url("L-3-1").is_none());
        assert!(get_docs_url("L-999-999").is_none());
    }
}
