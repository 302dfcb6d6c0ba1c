//! Shape operations on boundaries: darts, edge cuts and corner projection.
//!
//! All operations are pure: they compute a new [`EdgeSequence`] that a
//! caller then splices into an [`EdgeLoop`](crate::EdgeLoop).

use crate::edge::{Edge, Side, side_normal};
use crate::sequence::EdgeSequence;
use crate::{GeometryError, GeometryResult};
use nalgebra::{Matrix2, Point2, Vector2};

/// Determinant magnitude below which two edges are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Create a dart wedge of the given opening `width` and `depth`.
///
/// The wedge is authored along the local +X axis with its apex below it:
/// `(0, 0) -> (width / 2, -depth) -> (width, 0)`. Both flanks have equal
/// length, so closing the dart brings its two legs together.
///
/// # Errors
///
/// Returns [`GeometryError::InfeasibleCut`] for a non-positive or
/// non-finite width or depth.
///
/// # Example
///
/// ```
/// use pattern_types::dart_shape;
///
/// let dart = dart_shape(4.0, 10.0).unwrap();
/// assert_eq!(dart.segment_count(), 2);
/// ```
pub fn dart_shape(width: f64, depth: f64) -> GeometryResult<EdgeSequence> {
    if !(width.is_finite() && width > 0.0) {
        return Err(GeometryError::infeasible_cut(format!(
            "dart width must be positive, got {width}"
        )));
    }
    if !(depth.is_finite() && depth > 0.0) {
        return Err(GeometryError::infeasible_cut(format!(
            "dart depth must be positive, got {depth}"
        )));
    }
    EdgeSequence::from_verts([[0.0, 0.0], [width / 2.0, -depth], [width, 0.0]])
}

/// Result of cutting a shape into an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCut {
    /// Open sequence from the edge start to the edge end with the shape inserted.
    pub replacement: EdgeSequence,
    /// Number of segments contributed by the shape itself.
    pub shape_segments: usize,
}

impl EdgeCut {
    /// Segment indices of the two outer parts of the original edge.
    #[must_use]
    pub fn outer_segments(&self) -> [usize; 2] {
        [0, self.shape_segments + 1]
    }

    /// Segment indices that belong to the inserted shape.
    #[must_use]
    pub fn shape_segment_range(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.shape_segments
    }

    /// Combined length of the two outer parts.
    #[must_use]
    pub fn outer_length(&self) -> f64 {
        self.outer_segments()
            .iter()
            .filter_map(|&i| self.replacement.segment(i))
            .map(|e| e.length())
            .sum()
    }
}

/// Cut `shape` into `edge`, centred at arc distance `offset` from its start.
///
/// The shape's chord is laid onto the edge and the shape is bent to `side`:
/// points below the chord in shape-local coordinates (a dart apex) end up on
/// that side of the edge. The chord must fit strictly inside the edge.
///
/// # Errors
///
/// Returns [`GeometryError::InfeasibleCut`] if the shape has a zero chord or
/// does not fit between the edge endpoints at the requested offset.
///
/// # Example
///
/// ```
/// use pattern_types::{cut_into_edge, dart_shape, Edge, EdgeId, Side};
/// use nalgebra::Point2;
///
/// let edge = Edge::new(EdgeId(0), Point2::new(0.0, 0.0), Point2::new(-20.0, 0.0));
/// let cut = cut_into_edge(&dart_shape(4.0, 8.0).unwrap(), &edge, 10.0, Side::Right).unwrap();
/// assert_eq!(cut.replacement.segment_count(), 4);
/// assert!((cut.outer_length() - 16.0).abs() < 1e-9);
/// ```
pub fn cut_into_edge(
    shape: &EdgeSequence,
    edge: &Edge,
    offset: f64,
    side: Side,
) -> GeometryResult<EdgeCut> {
    let chord = shape.chord();
    let width = chord.norm();
    if width <= f64::EPSILON {
        return Err(GeometryError::infeasible_cut("shape has a zero-length chord"));
    }
    let length = edge.length();
    let Some(direction) = edge.direction() else {
        return Err(GeometryError::infeasible_cut("target edge has zero length"));
    };
    let lo = offset - width / 2.0;
    let hi = offset + width / 2.0;
    if !(lo > 0.0 && hi < length) {
        return Err(GeometryError::infeasible_cut(format!(
            "shape of width {width:.3} at offset {offset:.3} does not fit edge of length {length:.3}"
        )));
    }

    // Shape-local frame: `u` along the chord, `v` its left perpendicular.
    let u = chord / width;
    let v = Vector2::new(-u.y, u.x);
    // Local -v maps to `side`, so local +v maps to the opposite normal.
    let target_v = -side_normal(direction, side);
    let origin = edge.start + direction * lo;

    let mut points = Vec::with_capacity(shape.points().len() + 2);
    points.push(edge.start);
    for p in shape.points() {
        let local = p - shape.start();
        points.push(origin + direction * local.dot(&u) + target_v * local.dot(&v));
    }
    points.push(edge.end);

    Ok(EdgeCut {
        replacement: EdgeSequence::new(points)?,
        shape_segments: shape.segment_count(),
    })
}

/// Translate `shape` so that it starts on `incoming` and ends on `outgoing`.
///
/// `incoming` must end where `outgoing` starts (the corner vertex). The
/// shape's orientation is preserved; only a translation is solved for.
/// Returns the placed shape together with the fractions along each edge at
/// which it attaches.
///
/// # Errors
///
/// Returns [`GeometryError::InfeasibleProjection`] if the edges are parallel
/// or the shape's endpoints would land outside the open edge segments.
pub fn project_corner(
    shape: &EdgeSequence,
    incoming: &Edge,
    outgoing: &Edge,
) -> GeometryResult<(EdgeSequence, f64, f64)> {
    let d1 = incoming.vector();
    let d2 = outgoing.vector();
    let corner = outgoing.start;
    // Start at incoming.start + s * d1, end at corner + t * d2, end - start = chord:
    // t * d2 - s * d1 = chord - (corner - incoming.start).
    let rhs = shape.chord() - (corner - incoming.start);
    let m = Matrix2::from_columns(&[d2, -d1]);
    let det = m.determinant();
    if det.abs() <= PARALLEL_EPSILON {
        return Err(GeometryError::infeasible_projection(
            "corner edges are parallel",
        ));
    }
    let Some(inv) = m.try_inverse() else {
        return Err(GeometryError::infeasible_projection(
            "corner edges are parallel",
        ));
    };
    let sol = inv * rhs;
    let (t, s) = (sol.x, sol.y);
    if !(s > 0.0 && s < 1.0) {
        return Err(GeometryError::infeasible_projection(format!(
            "shape start falls outside the incoming edge (fraction {s:.3})"
        )));
    }
    if !(t > 0.0 && t < 1.0) {
        return Err(GeometryError::infeasible_projection(format!(
            "shape end falls outside the outgoing edge (fraction {t:.3})"
        )));
    }
    let anchor: Point2<f64> = incoming.start + d1 * s;
    let placed = shape.translated(anchor - shape.start());
    Ok((placed, s, t))
}
