//! Closed boundary loops with stable edge identifiers.

use crate::edge::{Edge, EdgeId};
use crate::sequence::EdgeSequence;
use crate::{GeometryError, GeometryResult};
use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance under which two points are treated as the same vertex.
pub const POINT_TOLERANCE: f64 = 1e-6;

/// A closed, ordered loop of straight edges owned by one panel.
///
/// The loop is stored as a vertex ring: edge `i` runs from vertex `i` to
/// vertex `i + 1 (mod n)`, so the end of the last edge is always the start
/// of the first. Every edge carries an [`EdgeId`] that survives edits which
/// only move its endpoints ([`set_vertex`](Self::set_vertex),
/// [`replace_corner`](Self::replace_corner), [`mirrored_x`](Self::mirrored_x))
/// and is retired when the edge itself is replaced
/// ([`substitute`](Self::substitute)).
///
/// # Example
///
/// ```
/// use pattern_types::EdgeLoop;
///
/// let square = EdgeLoop::from_verts([[0.0, 0.0], [-1.0, 0.0], [-1.0, 1.0], [0.0, 1.0]]).unwrap();
/// assert_eq!(square.len(), 4);
/// assert!((square.perimeter() - 4.0).abs() < 1e-12);
/// assert!(square.is_clockwise());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEdgeLoop"))]
pub struct EdgeLoop {
    vertices: Vec<Point2<f64>>,
    ids: Vec<EdgeId>,
    next_id: u64,
}

/// Unchecked wire form of [`EdgeLoop`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawEdgeLoop {
    vertices: Vec<Point2<f64>>,
    ids: Vec<EdgeId>,
    next_id: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEdgeLoop> for EdgeLoop {
    type Error = GeometryError;

    fn try_from(raw: RawEdgeLoop) -> GeometryResult<Self> {
        let mut edges = Self::new(raw.vertices)?;
        if raw.ids.len() != edges.len() {
            return Err(GeometryError::invalid_loop(format!(
                "{} ids for {} edges",
                raw.ids.len(),
                edges.len()
            )));
        }
        let mut sorted = raw.ids.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(GeometryError::invalid_loop("edge ids repeat"));
        }
        if sorted.last().is_some_and(|max| max.0 >= raw.next_id) {
            return Err(GeometryError::invalid_loop(format!(
                "next id {} is already in use",
                raw.next_id
            )));
        }
        edges.ids = raw.ids;
        edges.next_id = raw.next_id;
        Ok(edges)
    }
}

impl EdgeLoop {
    /// Create a loop through the given vertices (the closing edge is implicit).
    ///
    /// # Errors
    ///
    /// Fails for fewer than three vertices or on a zero-length edge.
    pub fn new(vertices: Vec<Point2<f64>>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::InsufficientPoints {
                required: 3,
                actual: vertices.len(),
            });
        }
        let n = vertices.len();
        for i in 0..n {
            if (vertices[(i + 1) % n] - vertices[i]).norm() <= f64::EPSILON {
                return Err(GeometryError::DegenerateEdge { index: i });
            }
        }
        let ids = (0..n as u64).map(EdgeId).collect();
        Ok(Self {
            vertices,
            ids,
            next_id: n as u64,
        })
    }

    /// Create a loop from `[x, y]` pairs.
    pub fn from_verts(verts: impl IntoIterator<Item = [f64; 2]>) -> GeometryResult<Self> {
        Self::new(verts.into_iter().map(|[x, y]| Point2::new(x, y)).collect())
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Loops always hold at least three edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Vertex ring in traversal order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Edge ids in traversal order.
    #[must_use]
    pub fn ids(&self) -> &[EdgeId] {
        &self.ids
    }

    /// Edge at `index`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<Edge> {
        let n = self.len();
        (index < n).then(|| {
            Edge::new(
                self.ids[index],
                self.vertices[index],
                self.vertices[(index + 1) % n],
            )
        })
    }

    /// Edge counted from the end: `edge_from_end(1)` is the last edge.
    #[must_use]
    pub fn edge_from_end(&self, k: usize) -> Option<Edge> {
        self.len().checked_sub(k).and_then(|i| self.edge(i))
    }

    /// Iterate over all edges in order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.len()).filter_map(|i| self.edge(i))
    }

    /// Current index of an edge id.
    #[must_use]
    pub fn index_of(&self, id: EdgeId) -> Option<usize> {
        self.ids.iter().position(|&e| e == id)
    }

    /// Edge with the given id, if it is still part of the loop.
    #[must_use]
    pub fn edge_by_id(&self, id: EdgeId) -> Option<Edge> {
        self.index_of(id).and_then(|i| self.edge(i))
    }

    /// Start point of the first edge.
    #[must_use]
    pub fn start_point(&self) -> Point2<f64> {
        self.vertices[0]
    }

    /// End point of the last edge.
    #[must_use]
    pub fn end_point(&self) -> Point2<f64> {
        self.edge(self.len() - 1)
            .map_or(self.vertices[0], |edge| edge.end)
    }

    /// Distance between the end of the last edge and the start of the first.
    #[must_use]
    pub fn closure_gap(&self) -> f64 {
        (self.end_point() - self.start_point()).norm()
    }

    /// Total boundary length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Signed area (shoelace); negative for clockwise loops.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|e| e.start.x * e.end.y - e.end.x * e.start.y)
            .sum::<f64>()
            * 0.5
    }

    /// Whether the loop is traversed clockwise (interior on the right).
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    fn check_index(&self, index: usize) -> GeometryResult<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(GeometryError::EdgeIndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    fn fresh_ids(&mut self, count: usize) -> Vec<EdgeId> {
        let ids = (self.next_id..self.next_id + count as u64)
            .map(EdgeId)
            .collect();
        self.next_id += count as u64;
        ids
    }

    /// Replace edge `index` by an open sequence with the same endpoints.
    ///
    /// The replaced id is retired; the returned ids name the inserted edges
    /// in order. Edges before and after keep their ids and order.
    ///
    /// # Errors
    ///
    /// Fails if `index` is out of range or the sequence endpoints deviate
    /// from the edge endpoints by more than [`POINT_TOLERANCE`].
    pub fn substitute(
        &mut self,
        index: usize,
        replacement: &EdgeSequence,
    ) -> GeometryResult<Vec<EdgeId>> {
        self.check_index(index)?;
        let n = self.len();
        let start = self.vertices[index];
        let end = self.vertices[(index + 1) % n];
        let gap = (replacement.start() - start)
            .norm()
            .max((replacement.end() - end).norm());
        if gap > POINT_TOLERANCE {
            return Err(GeometryError::EndpointMismatch { index, gap });
        }

        let new_ids = self.fresh_ids(replacement.segment_count());
        self.vertices.splice(
            index + 1..index + 1,
            replacement.interior().iter().copied(),
        );
        self.ids.splice(index..=index, new_ids.iter().copied());
        Ok(new_ids)
    }

    /// Move vertex `index`, the end of edge `index - 1` and start of edge `index`.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or an adjacent edge would collapse.
    pub fn set_vertex(&mut self, index: usize, point: Point2<f64>) -> GeometryResult<()> {
        self.check_index(index)?;
        let n = self.len();
        let prev = (index + n - 1) % n;
        if (point - self.vertices[prev]).norm() <= f64::EPSILON {
            return Err(GeometryError::DegenerateEdge { index: prev });
        }
        if (self.vertices[(index + 1) % n] - point).norm() <= f64::EPSILON {
            return Err(GeometryError::DegenerateEdge { index });
        }
        self.vertices[index] = point;
        Ok(())
    }

    /// Replace the corner between edge `first` and the edge after it by a
    /// placed open sequence.
    ///
    /// The sequence must start on edge `first` and end on the following edge;
    /// both corner edges keep their ids and are shortened to the new
    /// endpoints. Returns the ids of the inserted shape edges.
    ///
    /// # Errors
    ///
    /// Fails if `first` is out of range.
    pub fn replace_corner(
        &mut self,
        first: usize,
        placed: &EdgeSequence,
    ) -> GeometryResult<Vec<EdgeId>> {
        self.check_index(first)?;
        let n = self.len();
        let corner = (first + 1) % n;
        let new_ids = self.fresh_ids(placed.segment_count());

        if corner == 0 {
            // The corner closes the ring: the shape trails the last vertex and
            // its endpoint becomes the new ring start.
            self.vertices[0] = placed.end();
            self.vertices.push(placed.start());
            self.vertices.extend(placed.interior().iter().copied());
            self.ids.extend(new_ids.iter().copied());
        } else {
            self.vertices
                .splice(corner..=corner, placed.points().iter().copied());
            self.ids.splice(corner..corner, new_ids.iter().copied());
        }
        Ok(new_ids)
    }

    /// Copy reflected about the local Y axis with traversal reversed, so the
    /// winding direction is preserved. Edge ids are kept.
    #[must_use]
    pub fn mirrored_x(&self) -> Self {
        let n = self.len();
        // New edge k runs from old vertex (n - k) to old vertex (n - k - 1),
        // i.e. it is old edge (n - k - 1) reversed.
        let vertices = (0..n)
            .map(|k| {
                let p = self.vertices[(n - k) % n];
                Point2::new(-p.x, p.y)
            })
            .collect();
        let ids = (0..n).map(|k| self.ids[n - k - 1]).collect();
        Self {
            vertices,
            ids,
            next_id: self.next_id,
        }
    }
}
