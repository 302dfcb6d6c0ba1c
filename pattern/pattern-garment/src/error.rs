//! Error types for garment programs.

use pattern_assembly::{PatternError, PatternResult};
use pattern_types::GeometryError;
use thiserror::Error;

/// Result type for garment programs.
pub type GarmentResult<T> = Result<T, GarmentError>;

/// Errors that can occur while building a garment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GarmentError {
    /// A derived dart or cut cannot be realized on its panel.
    #[error("infeasible {feature} on panel '{panel}': {reason}")]
    InfeasibleGeometry {
        /// Panel being built.
        panel: String,
        /// The dart or cut that failed.
        feature: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// A design value names a variant that does not exist.
    #[error("unknown {kind} '{name}' (expected one of: {})", valid.join(", "))]
    UnknownVariant {
        /// What kind of variant was requested.
        kind: &'static str,
        /// The requested name.
        name: String,
        /// Valid names.
        valid: Vec<&'static str>,
    },

    /// A body measurement is outside its physical range.
    #[error("invalid measurement '{name}' = {value}: {reason}")]
    InvalidMeasurement {
        /// Measurement name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A design parameter is out of range.
    #[error("invalid design parameter '{field}': {reason}")]
    InvalidDesign {
        /// Parameter path.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Building a boundary shape failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Assembling panels or seams failed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Parsing or writing JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GarmentError {
    /// Create an unknown variant error.
    #[must_use]
    pub fn unknown_variant(kind: &'static str, name: impl Into<String>, valid: &[&'static str]) -> Self {
        Self::UnknownVariant {
            kind,
            name: name.into(),
            valid: valid.to_vec(),
        }
    }

    /// Create an invalid design error.
    #[must_use]
    pub fn invalid_design(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDesign {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this error reports geometry that cannot be realized.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        match self {
            Self::InfeasibleGeometry { .. } => true,
            Self::Geometry(e) => e.is_infeasible(),
            Self::Pattern(e) => e.is_infeasible(),
            _ => false,
        }
    }

    /// Check if this error is a seam length mismatch.
    #[must_use]
    pub fn is_mismatched_stitch(&self) -> bool {
        matches!(self, Self::Pattern(e) if e.is_mismatched_stitch())
    }
}

/// Attach the panel and feature being built to infeasible-geometry errors.
pub(crate) trait FeatureContext<T> {
    fn at(self, panel: &str, feature: &str) -> GarmentResult<T>;
}

impl<T> FeatureContext<T> for PatternResult<T> {
    fn at(self, panel: &str, feature: &str) -> GarmentResult<T> {
        self.map_err(|e| {
            if e.is_infeasible() {
                GarmentError::InfeasibleGeometry {
                    panel: panel.to_string(),
                    feature: feature.to_string(),
                    reason: e.to_string(),
                }
            } else {
                e.into()
            }
        })
    }
}
