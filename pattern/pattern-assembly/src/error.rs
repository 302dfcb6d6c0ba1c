//! Error types for pattern assembly.

use pattern_types::{EdgeId, GeometryError};
use thiserror::Error;

/// Result type for pattern assembly operations.
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors that can occur while building panels, components and seams.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PatternError {
    /// A boundary operation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A seam joins interfaces of different length.
    #[error(
        "mismatched stitch: {left:.4} x {gather} vs {right:.4} (difference {difference:.2e} exceeds {tolerance:.0e})"
    )]
    MismatchedStitch {
        /// Length of the first interface.
        left: f64,
        /// Length of the second interface.
        right: f64,
        /// Gathering ratio applied to the first interface.
        gather: f64,
        /// Absolute length difference after gathering.
        difference: f64,
        /// Allowed difference.
        tolerance: f64,
    },

    /// An interface names an edge that is no longer part of its panel.
    #[error("stale interface: edge {edge} is no longer part of panel '{panel}'")]
    StaleInterface {
        /// The panel the reference points into.
        panel: String,
        /// The retired edge id.
        edge: EdgeId,
    },

    /// A panel with the given name does not exist.
    #[error("panel '{name}' not found")]
    PanelNotFound {
        /// The missing panel name.
        name: String,
    },

    /// A panel name is used twice in one component tree.
    #[error("panel '{name}' already exists")]
    DuplicatePanel {
        /// The duplicate name.
        name: String,
    },

    /// A named interface does not exist.
    #[error("interface '{name}' not found on '{owner}'")]
    InterfaceNotFound {
        /// Panel or component that was searched.
        owner: String,
        /// The missing interface name.
        name: String,
    },

    /// An interface holds no edges.
    #[error("interface is empty")]
    EmptyInterface,

    /// A corner reference is not two consecutive edges of one panel.
    #[error("not a corner of panel '{panel}': {reason}")]
    NotACorner {
        /// The panel the reference was applied to.
        panel: String,
        /// Why the reference does not describe a corner.
        reason: String,
    },

    /// Final validation found problems.
    #[error("invalid pattern: {summary}")]
    InvalidPattern {
        /// Summary of the issues found.
        summary: String,
    },
}

impl PatternError {
    /// Create a not-a-corner error.
    #[must_use]
    pub fn not_a_corner(panel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotACorner {
            panel: panel.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from geometry that cannot be realized.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Geometry(e) if e.is_infeasible())
    }

    /// Check if this error is a stitch length mismatch.
    #[must_use]
    pub fn is_mismatched_stitch(&self) -> bool {
        matches!(self, Self::MismatchedStitch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_conversion() {
        let err: PatternError = GeometryError::infeasible_cut("too wide").into();
        assert!(err.is_infeasible());
        assert!(err.to_string().contains("too wide"));
    }

    #[test]
    fn test_stale_display() {
        let err = PatternError::StaleInterface {
            panel: "front".to_string(),
            edge: EdgeId(3),
        };
        assert!(err.to_string().contains("e3"));
        assert!(!err.is_mismatched_stitch());
    }
}
