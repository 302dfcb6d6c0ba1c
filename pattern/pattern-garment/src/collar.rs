//! Neckline shapes.
//!
//! A collar is not a separate piece of fabric here: its shape is cut into
//! the collar corner of a bodice panel and becomes permanent boundary.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use pattern_types::EdgeSequence;
use serde::{Deserialize, Serialize};

use crate::error::{GarmentError, GarmentResult};

/// Segments used to approximate curved necklines.
pub const NECK_CURVE_SEGMENTS: usize = 8;

/// Neckline shape of one bodice half.
///
/// Shapes run from the shoulder line towards the centre line and span half
/// the neck width horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollarShape {
    /// Straight diagonal.
    VNeckHalf,
    /// Straight down, then across.
    SquareNeckHalf,
    /// Slanted down, then across.
    TrapezoidNeckHalf,
    /// Quarter ellipse.
    CircleNeckHalf,
}

impl CollarShape {
    /// Every registered shape.
    pub const ALL: [Self; 4] = [
        Self::VNeckHalf,
        Self::SquareNeckHalf,
        Self::TrapezoidNeckHalf,
        Self::CircleNeckHalf,
    ];

    /// Registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VNeckHalf => "VNeckHalf",
            Self::SquareNeckHalf => "SquareNeckHalf",
            Self::TrapezoidNeckHalf => "TrapezoidNeckHalf",
            Self::CircleNeckHalf => "CircleNeckHalf",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }

    /// Neckline of the given depth for a neck of width `neck_w`.
    ///
    /// # Errors
    ///
    /// [`GarmentError::InvalidDesign`] if either dimension is not positive.
    pub fn shape(self, depth: f64, neck_w: f64) -> GarmentResult<EdgeSequence> {
        if !(depth > 0.0 && neck_w > 0.0) {
            return Err(GarmentError::invalid_design(
                "collar",
                format!("depth {depth} and neck width {neck_w} must be positive"),
            ));
        }
        let half = neck_w / 2.0;
        let verts: Vec<[f64; 2]> = match self {
            Self::VNeckHalf => vec![[0.0, 0.0], [half, -depth]],
            Self::SquareNeckHalf => vec![[0.0, 0.0], [0.0, -depth], [half, -depth]],
            Self::TrapezoidNeckHalf => vec![[0.0, 0.0], [half / 2.0, -depth], [half, -depth]],
            Self::CircleNeckHalf => (0..=NECK_CURVE_SEGMENTS)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = FRAC_PI_2 * i as f64 / NECK_CURVE_SEGMENTS as f64;
                    [half - half * angle.cos(), -depth * angle.sin()]
                })
                .collect(),
        };
        Ok(EdgeSequence::from_verts(verts)?)
    }
}

impl fmt::Display for CollarShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollarShape {
    type Err = GarmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| GarmentError::unknown_variant("collar shape", s, &Self::names()))
    }
}

impl TryFrom<String> for CollarShape {
    type Error = GarmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CollarShape> for String {
    fn from(shape: CollarShape) -> Self {
        shape.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_by_name() {
        for shape in CollarShape::ALL {
            assert_eq!(shape.name().parse::<CollarShape>().unwrap(), shape);
        }
        let err = "Turtle".parse::<CollarShape>().unwrap_err();
        match err {
            GarmentError::UnknownVariant { name, valid, .. } => {
                assert_eq!(name, "Turtle");
                assert_eq!(valid.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shapes_span_half_neck() {
        for shape in CollarShape::ALL {
            let seq = shape.shape(10.0, 18.0).unwrap();
            let chord = seq.chord();
            assert_relative_eq!(chord.x, 9.0, epsilon = 1e-12);
            assert_relative_eq!(chord.y, -10.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circle_is_segmented() {
        let seq = CollarShape::CircleNeckHalf.shape(4.0, 18.0).unwrap();
        assert_eq!(seq.segment_count(), NECK_CURVE_SEGMENTS);
        // Leaves the shoulder vertically and meets the centre horizontally.
        let first = seq.segment(0).unwrap().vector();
        let last = seq.segment(NECK_CURVE_SEGMENTS - 1).unwrap().vector();
        assert!(first.y.abs() > first.x.abs());
        assert!(last.x.abs() > last.y.abs());
    }

    #[test]
    fn test_rejects_non_positive_depth() {
        assert!(CollarShape::VNeckHalf.shape(0.0, 18.0).is_err());
    }
}
