//! Open chains of boundary segments.
//!
//! An [`EdgeSequence`] is a free-standing shape that is not owned by any
//! panel yet: dart wedges, collar curves and armhole openings are authored
//! as sequences and then cut into a loop.

use crate::edge::{Edge, EdgeId};
use crate::{GeometryError, GeometryResult};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered, open chain of straight segments through at least two points.
///
/// # Example
///
/// ```
/// use pattern_types::EdgeSequence;
/// use nalgebra::Point2;
///
/// let seq = EdgeSequence::from_verts([[0.0, 0.0], [3.0, 0.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(seq.segment_count(), 2);
/// assert!((seq.length() - 7.0).abs() < 1e-12);
/// assert!((seq.chord().norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEdgeSequence"))]
pub struct EdgeSequence {
    points: Vec<Point2<f64>>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawEdgeSequence {
    points: Vec<Point2<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEdgeSequence> for EdgeSequence {
    type Error = GeometryError;

    fn try_from(raw: RawEdgeSequence) -> GeometryResult<Self> {
        Self::new(raw.points)
    }
}

impl EdgeSequence {
    /// Create a sequence from points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InsufficientPoints`] for fewer than two points
    /// and [`GeometryError::DegenerateEdge`] if two consecutive points coincide.
    pub fn new(points: Vec<Point2<f64>>) -> GeometryResult<Self> {
        if points.len() < 2 {
            return Err(GeometryError::InsufficientPoints {
                required: 2,
                actual: points.len(),
            });
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| (w[1] - w[0]).norm() <= f64::EPSILON)
        {
            return Err(GeometryError::DegenerateEdge { index });
        }
        Ok(Self { points })
    }

    /// Create a sequence from `[x, y]` pairs.
    pub fn from_verts(verts: impl IntoIterator<Item = [f64; 2]>) -> GeometryResult<Self> {
        Self::new(verts.into_iter().map(|[x, y]| Point2::new(x, y)).collect())
    }

    /// The points of the chain, in order.
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of segments (`points - 1`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// First point.
    #[must_use]
    pub fn start(&self) -> Point2<f64> {
        self.points[0]
    }

    /// Last point.
    #[must_use]
    pub fn end(&self) -> Point2<f64> {
        self.points[self.points.len() - 1]
    }

    /// Vector from the first to the last point.
    #[must_use]
    pub fn chord(&self) -> Vector2<f64> {
        self.end() - self.start()
    }

    /// Segment `index` as an edge with a placeholder id.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Edge> {
        (index < self.segment_count())
            .then(|| Edge::new(EdgeId(0), self.points[index], self.points[index + 1]))
    }

    /// Cumulative length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Copy shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        Self {
            points: self.points.iter().map(|p| p + offset).collect(),
        }
    }

    /// Copy traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Copy reflected about the local Y axis (`x -> -x`).
    #[must_use]
    pub fn mirrored_x(&self) -> Self {
        Self {
            points: self.points.iter().map(|p| Point2::new(-p.x, p.y)).collect(),
        }
    }

    /// Interior points (everything except the two endpoints).
    pub(crate) fn interior(&self) -> &[Point2<f64>] {
        &self.points[1..self.points.len() - 1]
    }
}
