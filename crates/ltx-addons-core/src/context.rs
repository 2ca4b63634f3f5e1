//! Per-document decoration state.

use std::collections::BTreeMap;
use std::path::Path;

use ltx_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};

use crate::citations::CitationNumber;
use crate::config::AddonsConfig;

/// The identifier that marks a paper still under submission.
pub const SUBMISSION_ID: &str = "submission";

/// Which paper a document belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperInfo {
    /// arXiv identifier, e.g. `2401.00001v2`.
    pub identifier: Option<String>,

    /// Submissions have no abstract page to link back to.
    pub is_submission: bool,
}

impl PaperInfo {
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            is_submission: identifier == SUBMISSION_ID,
            identifier: Some(identifier),
        }
    }

    pub fn submission() -> Self {
        Self::new(SUBMISSION_ID)
    }

    /// Derive the paper from a path shaped `<...>/<identifier>/<file>.html`.
    pub fn from_path(path: &Path) -> Self {
        path.parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .map(PaperInfo::new)
            .unwrap_or_default()
    }

    /// The abstract page, for published papers with a known identifier.
    pub fn abs_url(&self, base: &str) -> Option<String> {
        if self.is_submission {
            return None;
        }
        let id = self.identifier.as_deref()?;
        Some(format!("{}/{}", base.trim_end_matches('/'), id))
    }
}

/// State shared by the transforms decorating one document.
pub struct DecorateContext<'a> {
    pub config: &'a AddonsConfig,
    pub paper: &'a PaperInfo,

    /// Non-fatal problems found so far.
    pub diagnostics: Vec<DiagnosticMessage>,

    /// For each cited number, the id of the first range token covering it.
    pub citation_tokens: BTreeMap<CitationNumber, String>,

    next_token: usize,
}

impl<'a> DecorateContext<'a> {
    pub fn new(config: &'a AddonsConfig, paper: &'a PaperInfo) -> Self {
        Self {
            config,
            paper,
            diagnostics: Vec::new(),
            citation_tokens: BTreeMap::new(),
            next_token: 0,
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    /// Allocate the next range token id (`cite-ref-1`, `cite-ref-2`, ...).
    pub fn next_token_id(&mut self) -> String {
        self.next_token += 1;
        format!("cite-ref-{}", self.next_token)
    }

    /// Record that a transform skipped because its target is absent.
    pub fn target_missing(&mut self, transform: &str, target: &str) {
        tracing::debug!(transform, target, "Element not found, skipping");
        self.diagnostics.push(
            DiagnosticMessageBuilder::info("Decoration Target Missing")
                .with_code("L-4-1")
                .problem(format!("`{}` found no {}", transform, target))
                .build(),
        );
    }
}
