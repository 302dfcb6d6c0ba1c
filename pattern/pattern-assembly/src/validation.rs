//! Pattern validation report.
//!
//! Seams are checked when they are recorded; this report re-checks the
//! finished tree, catching edits made after a seam was declared.

use crate::interface::EdgeRef;

/// Issues found in a component tree.
#[derive(Debug, Clone, Default)]
pub struct PatternValidation {
    /// Panels whose loop does not close (`name`, gap).
    pub open_loops: Vec<(String, f64)>,

    /// Panels not traversed clockwise.
    pub inverted_panels: Vec<String>,

    /// Seam references to edges or panels that no longer exist.
    pub stale_references: Vec<EdgeRef>,

    /// Seams whose lengths no longer match (seam index, difference).
    pub mismatched_stitches: Vec<(usize, f64)>,
}

impl PatternValidation {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no issue was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issue_count() == 0
    }

    /// Total number of issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.open_loops.len()
            + self.inverted_panels.len()
            + self.stale_references.len()
            + self.mismatched_stitches.len()
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "Pattern is valid".to_string();
        }

        let mut issues = Vec::new();
        if !self.open_loops.is_empty() {
            issues.push(format!("{} open loop(s)", self.open_loops.len()));
        }
        if !self.inverted_panels.is_empty() {
            issues.push(format!("{} inverted panel(s)", self.inverted_panels.len()));
        }
        if !self.stale_references.is_empty() {
            issues.push(format!("{} stale reference(s)", self.stale_references.len()));
        }
        if !self.mismatched_stitches.is_empty() {
            issues.push(format!(
                "{} mismatched stitch(es)",
                self.mismatched_stitches.len()
            ));
        }
        format!("Validation failed: {}", issues.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_types::EdgeId;

    #[test]
    fn test_empty_report_is_valid() {
        let report = PatternValidation::new();
        assert!(report.is_valid());
        assert_eq!(report.summary(), "Pattern is valid");
    }

    #[test]
    fn test_summary_lists_issues() {
        let mut report = PatternValidation::new();
        report.stale_references.push(EdgeRef::new("front", EdgeId(2)));
        report.mismatched_stitches.push((0, 0.5));
        assert_eq!(report.issue_count(), 2);
        let summary = report.summary();
        assert!(summary.contains("1 stale reference(s)"));
        assert!(summary.contains("1 mismatched stitch(es)"));
    }
}
