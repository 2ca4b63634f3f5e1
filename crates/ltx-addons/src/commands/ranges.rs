//! Ranges command: compress citation labels without a page.

use anyhow::Result;

use ltx_addons_core::CitationGroup;
use ltx_addons_core::citations::malformed_label;
use ltx_error_reporting::DiagnosticMessage;

/// Print the compressed marker for `labels`.
///
/// Labels that are not positive integers are reported and skipped; if none
/// remain the marker is empty.
pub fn execute(labels: &[String]) -> Result<()> {
    let group = CitationGroup::from_labels(labels);
    super::report(&rejections(&group), None, false);
    println!("{}", group.marker());
    Ok(())
}

fn rejections(group: &CitationGroup) -> Vec<DiagnosticMessage> {
    group
        .rejected
        .iter()
        .map(|label| malformed_label(label).build())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections() {
        let labels = vec!["2".to_string(), " x ".to_string(), "0".to_string()];
        let group = CitationGroup::from_labels(&labels);
        let diagnostics = rejections(&group);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].problem.as_deref(), Some("`x` is not a positive integer"));
        assert_eq!(group.marker(), "[2]");
    }
}
