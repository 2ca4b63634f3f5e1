/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Decoration settings read from `_addons.yml`.
 */

//! Decoration settings.
//!
//! Settings come from an `_addons.yml` (or `_addons.yaml`) file found in the
//! input's directory or one of its ancestors. Every key is optional:
//!
//! ```yaml
//! abs-url-base: https://arxiv.org/abs
//! favicon: https://static.arxiv.org/static/browse/0.3.4/images/icons/favicon.ico
//! citations:
//!   bib-id-prefix: bib.bib
//! footer:
//!   generated-on: Wed Dec 14 18:01:44 2022
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AddonsError, Result};
use crate::modal::ModalOptions;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &["_addons.yml", "_addons.yaml"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddonsConfig {
    /// Base of the "Back to Abstract" link; the paper identifier is appended.
    pub abs_url_base: String,

    /// Base URL of the header logos.
    pub assets_base: String,

    /// Icon linked from `<head>`, if any.
    pub favicon: Option<String>,

    pub header: HeaderConfig,
    pub footer: FooterConfig,
    pub navigation: NavigationConfig,
    pub citations: CitationsConfig,
    pub modal: ModalConfig,
}

impl Default for AddonsConfig {
    fn default() -> Self {
        Self {
            abs_url_base: "https://arxiv.org/abs".to_string(),
            assets_base: "https://services.dev.arxiv.org/html".to_string(),
            favicon: None,
            header: HeaderConfig::default(),
            footer: FooterConfig::default(),
            navigation: NavigationConfig::default(),
            citations: CitationsConfig::default(),
            modal: ModalConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeaderConfig {
    pub enabled: bool,
    pub logo: String,
    pub logomark: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            logo: "arxiv-logo-one-color-white.svg".to_string(),
            logomark: "arxiv-logomark-small-white.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FooterConfig {
    pub enabled: bool,

    /// Include the keyboard-commands glossary (the `#footer` target).
    pub keyboard_glossary: bool,

    pub copyright_url: String,
    pub privacy_policy_url: String,
    pub why_html_url: String,
    pub latexml_url: String,

    /// Shown as "Generated on <date> by LaTeXML".
    pub generated_on: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keyboard_glossary: true,
            copyright_url: "https://arxiv.org/help/license".to_string(),
            privacy_policy_url: "https://arxiv.org/help/policies/privacy_policy".to_string(),
            why_html_url: "https://info.arxiv.org/about/accessible_HTML.html".to_string(),
            latexml_url: "https://math.nist.gov/~BMiller/LaTeXML/".to_string(),
            generated_on: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NavigationConfig {
    /// Remove the footer LaTeXML writes.
    pub strip_latexml_footer: bool,

    /// Give `div.ltx_page_main` the `main` id used by the skip link.
    pub main_landmark: bool,

    /// Unwrap the navbar and move the labelled table of contents into `#main`.
    pub fix_toc: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            strip_latexml_footer: true,
            main_landmark: true,
            fix_toc: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CitationsConfig {
    /// Collapse numeric citation markers into range tokens.
    pub enabled: bool,

    /// Bibliography entry ids are this prefix followed by the number.
    pub bib_id_prefix: String,

    /// Link each cited bibliography entry back to its first citation.
    pub back_references: bool,
}

impl Default for CitationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bib_id_prefix: "bib.".to_string(),
            back_references: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModalConfig {
    pub enabled: bool,
    pub dialog_id: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dialog_id: "cite-modal".to_string(),
        }
    }
}

impl AddonsConfig {
    /// Parse configuration text. `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        // An empty file is a valid, all-default configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AddonsError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Search `start_dir` and its parents for a config file.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }
        None
    }

    /// Settings for decorating `input`.
    ///
    /// An explicit path wins; otherwise the nearest config file above
    /// `input` is used, falling back to the defaults. Returns the file the
    /// settings came from, if any.
    pub fn discover(input: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let start = if input.is_dir() {
            input.to_path_buf()
        } else {
            input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };
        let start = start.canonicalize().unwrap_or(start);

        match Self::find(&start) {
            Some(path) => {
                tracing::debug!(config = %path.display(), "Using discovered configuration");
                Ok((Self::load(&path)?, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn modal_options(&self) -> ModalOptions {
        ModalOptions {
            dialog_id: self.modal.dialog_id.clone(),
            bib_id_prefix: self.citations.bib_id_prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AddonsConfig::default();
        assert_eq!(config.citations.bib_id_prefix, "bib.");
        assert_eq!(config.modal.dialog_id, "cite-modal");
        assert!(config.header.enabled);
        assert!(config.favicon.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = AddonsConfig::from_yaml_str(
            "favicon: /favicon.ico\ncitations:\n  bib-id-prefix: bib.bib\n",
            "_addons.yml",
        )
        .unwrap();
        assert_eq!(config.favicon.as_deref(), Some("/favicon.ico"));
        assert_eq!(config.citations.bib_id_prefix, "bib.bib");
        assert!(config.citations.back_references);
        assert_eq!(config.abs_url_base, "https://arxiv.org/abs");
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = AddonsConfig::from_yaml_str("  \n", "_addons.yml").unwrap();
        assert_eq!(config, AddonsConfig::default());
    }

    #[test]
    fn test_unknown_key_is_a_config_error() {
        let err = AddonsConfig::from_yaml_str("colour: blue\n", "_addons.yml").unwrap_err();
        match err {
            AddonsError::Config { path, message } => {
                assert_eq!(path, "_addons.yml");
                assert!(message.contains("colour"), "{}", message);
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_walks_up_from_input() {
        let dir = tempfile::tempdir().unwrap();
        let paper_dir = dir.path().join("2401.00001");
        std::fs::create_dir_all(&paper_dir).unwrap();
        std::fs::write(dir.path().join("_addons.yml"), "modal:\n  dialog-id: refs\n").unwrap();
        let input = paper_dir.join("paper.html");
        std::fs::write(&input, "<html></html>").unwrap();

        let (config, found) = AddonsConfig::discover(&input, None).unwrap();
        assert_eq!(config.modal.dialog_id, "refs");
        assert_eq!(
            found.unwrap().file_name().and_then(|n| n.to_str()),
            Some("_addons.yml")
        );
    }

    #[test]
    fn test_explicit_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_addons.yml"), "favicon: a.ico\n").unwrap();
        let explicit = dir.path().join("other.yml");
        std::fs::write(&explicit, "favicon: b.ico\n").unwrap();
        let input = dir.path().join("paper.html");

        let (config, found) = AddonsConfig::discover(&input, Some(&explicit)).unwrap();
        assert_eq!(config.favicon.as_deref(), Some("b.ico"));
        assert_eq!(found, Some(explicit));
    }
}
