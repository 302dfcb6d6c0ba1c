//! Error types for boundary primitive operations.

use thiserror::Error;

/// Result type for boundary primitive operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while building or editing panel boundaries.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    /// Too few points to form the requested primitive.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Two consecutive points coincide, producing a zero-length edge.
    #[error("degenerate edge at index {index}: endpoints coincide")]
    DegenerateEdge {
        /// Index of the zero-length edge.
        index: usize,
    },

    /// An edge index is outside the loop.
    #[error("edge index {index} out of range for loop of {len} edges")]
    EdgeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of edges in the loop.
        len: usize,
    },

    /// A replacement sequence does not start and end where the replaced edge does.
    #[error("replacement for edge {index} does not match its endpoints (gap {gap:.3e})")]
    EndpointMismatch {
        /// Index of the replaced edge.
        index: usize,
        /// Largest endpoint distance found.
        gap: f64,
    },

    /// A cut into an edge cannot be realized with the given parameters.
    #[error("infeasible cut: {reason}")]
    InfeasibleCut {
        /// Description of the violated constraint.
        reason: String,
    },

    /// Stored loop data breaks the loop invariants.
    #[error("invalid loop: {reason}")]
    InvalidLoop {
        /// Description of the violated invariant.
        reason: String,
    },

    /// A shape cannot be projected onto a corner.
    #[error("infeasible corner projection: {reason}")]
    InfeasibleProjection {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl GeometryError {
    /// Create an infeasible cut error.
    #[must_use]
    pub fn infeasible_cut(reason: impl Into<String>) -> Self {
        Self::InfeasibleCut {
            reason: reason.into(),
        }
    }

    /// Create an infeasible projection error.
    #[must_use]
    pub fn infeasible_projection(reason: impl Into<String>) -> Self {
        Self::InfeasibleProjection {
            reason: reason.into(),
        }
    }

    /// Create an invalid loop error.
    #[must_use]
    pub fn invalid_loop(reason: impl Into<String>) -> Self {
        Self::InvalidLoop {
            reason: reason.into(),
        }
    }

    /// Check if this error reports geometry that cannot be realized.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::InfeasibleCut { .. } | Self::InfeasibleProjection { .. }
        )
    }
}
