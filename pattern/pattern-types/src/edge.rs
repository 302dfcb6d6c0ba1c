//! Directed boundary segments and their stable identifiers.

use nalgebra::{Point2, Vector2};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of an edge inside one [`EdgeLoop`](crate::EdgeLoop).
///
/// Identifiers are never reused within a loop: substituting an edge retires
/// its id and hands out fresh ones for the inserted edges. References that
/// still carry a retired id are therefore detectably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Which side of a directed edge a shape is cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Right of the travel direction (the interior of a clockwise loop).
    Right,
    /// Left of the travel direction.
    Left,
}

/// A straight directed segment of a panel boundary.
///
/// Edges are views produced by an [`EdgeLoop`](crate::EdgeLoop); the loop
/// owns the vertices, so an `Edge` is a snapshot and never aliases the loop.
///
/// # Example
///
/// ```
/// use pattern_types::{Edge, EdgeId};
/// use nalgebra::Point2;
///
/// let edge = Edge::new(EdgeId(0), Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
/// assert!((edge.length() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Identifier of this edge in its loop.
    pub id: EdgeId,
    /// Start point.
    pub start: Point2<f64>,
    /// End point.
    pub end: Point2<f64>,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(id: EdgeId, start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { id, start, end }
    }

    /// Vector from start to end.
    #[must_use]
    pub fn vector(&self) -> Vector2<f64> {
        self.end - self.start
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction, or `None` for a zero-length edge.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2<f64>> {
        let v = self.vector();
        let len = v.norm();
        (len > f64::EPSILON).then(|| v / len)
    }

    /// Unit normal pointing to the given side of the travel direction.
    #[must_use]
    pub fn normal(&self, side: Side) -> Option<Vector2<f64>> {
        self.direction().map(|d| side_normal(d, side))
    }

    /// Point at arc distance `distance` from the start (not clamped).
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> Point2<f64> {
        match self.direction() {
            Some(d) => self.start + d * distance,
            None => self.start,
        }
    }

    /// Midpoint of the edge.
    #[must_use]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start, &self.end)
    }
}

/// Normal of a unit direction toward `side`.
pub(crate) fn side_normal(direction: Vector2<f64>, side: Side) -> Vector2<f64> {
    let right = Vector2::new(direction.y, -direction.x);
    match side {
        Side::Right => right,
        Side::Left => -right,
    }
}
