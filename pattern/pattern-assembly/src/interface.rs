//! Interfaces: ordered references to panel boundary edges.

use nalgebra::Point3;
use pattern_types::{Edge, EdgeId};
use std::fmt;

use crate::error::{PatternError, PatternResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference to one edge of a named panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeRef {
    /// Name of the panel that owns the edge.
    pub panel: String,
    /// Stable id of the edge within the panel's loop.
    pub edge: EdgeId,
}

impl EdgeRef {
    /// Create a new reference.
    #[must_use]
    pub fn new(panel: impl Into<String>, edge: EdgeId) -> Self {
        Self {
            panel: panel.into(),
            edge,
        }
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.panel, self.edge)
    }
}

/// Anything that can resolve edge references to current geometry.
pub trait EdgeLookup {
    /// Resolve a reference to the edge in panel-local coordinates.
    ///
    /// # Errors
    ///
    /// [`PatternError::PanelNotFound`] if the panel is unknown and
    /// [`PatternError::StaleInterface`] if the edge id was retired.
    fn lookup_edge(&self, edge: &EdgeRef) -> PatternResult<Edge>;

    /// Resolve a reference to its endpoints in world coordinates.
    fn lookup_world_edge(&self, edge: &EdgeRef) -> PatternResult<[Point3<f64>; 2]>;

    /// Current position of the referenced edge in its panel's loop.
    fn edge_index(&self, edge: &EdgeRef) -> PatternResult<usize>;
}

/// An ordered view onto a subset of boundary edges.
///
/// Interfaces never own edges; they name them by [`EdgeRef`] and are
/// resolved against the panel or component that holds the geometry. An
/// interface may span several panels (e.g. the hem of a two-panel skirt).
///
/// # Example
///
/// ```
/// use pattern_assembly::{Interface, EdgeRef};
/// use pattern_types::EdgeId;
///
/// let front = Interface::new("front", [EdgeId(0), EdgeId(3)]);
/// let back = Interface::new("back", [EdgeId(1)]);
/// let hem = Interface::chain([&front, &back]);
/// assert_eq!(hem.len(), 3);
/// assert_eq!(hem.edges()[2], EdgeRef::new("back", EdgeId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interface {
    edges: Vec<EdgeRef>,
}

impl Interface {
    /// Interface over edges of a single panel, in the given order.
    #[must_use]
    pub fn new(panel: impl Into<String>, edges: impl IntoIterator<Item = EdgeId>) -> Self {
        let panel = panel.into();
        Self {
            edges: edges
                .into_iter()
                .map(|edge| EdgeRef::new(panel.clone(), edge))
                .collect(),
        }
    }

    /// Interface over arbitrary references.
    #[must_use]
    pub fn from_refs(edges: Vec<EdgeRef>) -> Self {
        Self { edges }
    }

    /// Concatenate interfaces in exactly the order given.
    ///
    /// No reordering or deduplication happens: when the edge order of the
    /// combined seam matters, the caller decides it by the argument order.
    #[must_use]
    pub fn chain<'a>(parts: impl IntoIterator<Item = &'a Interface>) -> Self {
        Self {
            edges: parts
                .into_iter()
                .flat_map(|i| i.edges.iter().cloned())
                .collect(),
        }
    }

    /// The referenced edges in order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeRef] {
        &self.edges
    }

    /// Number of referenced edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the interface references no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Copy with the edge order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            edges: self.edges.iter().rev().cloned().collect(),
        }
    }

    /// Whether any edge belongs to `panel`.
    #[must_use]
    pub fn touches(&self, panel: &str) -> bool {
        self.edges.iter().any(|e| e.panel == panel)
    }

    /// Resolve all edges.
    pub fn resolve<L: EdgeLookup + ?Sized>(&self, lookup: &L) -> PatternResult<Vec<Edge>> {
        self.edges.iter().map(|e| lookup.lookup_edge(e)).collect()
    }

    /// Cumulative boundary length.
    ///
    /// # Errors
    ///
    /// Fails on an empty interface or any unresolved reference.
    pub fn length<L: EdgeLookup + ?Sized>(&self, lookup: &L) -> PatternResult<f64> {
        if self.is_empty() {
            return Err(PatternError::EmptyInterface);
        }
        Ok(self.resolve(lookup)?.iter().map(Edge::length).sum())
    }

    /// Length-weighted centre of the referenced edges in world space.
    pub fn world_centroid<L: EdgeLookup + ?Sized>(&self, lookup: &L) -> PatternResult<Point3<f64>> {
        if self.is_empty() {
            return Err(PatternError::EmptyInterface);
        }
        let mut sum = nalgebra::Vector3::zeros();
        let mut total = 0.0;
        for edge in &self.edges {
            let [a, b] = lookup.lookup_world_edge(edge)?;
            let len = (b - a).norm();
            sum += nalgebra::center(&a, &b).coords * len;
            total += len;
        }
        if total <= f64::EPSILON {
            return Err(PatternError::EmptyInterface);
        }
        Ok(Point3::from(sum / total))
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_keeps_argument_order() {
        let a = Interface::new("a", [EdgeId(1), EdgeId(2)]);
        let b = Interface::new("b", [EdgeId(7)]);
        let ab = Interface::chain([&a, &b]);
        let ba = Interface::chain([&b, &a]);
        assert_eq!(ab.edges()[0].panel, "a");
        assert_eq!(ba.edges()[0].panel, "b");
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_reversed() {
        let a = Interface::new("a", [EdgeId(1), EdgeId(2)]);
        let r = a.reversed();
        assert_eq!(r.edges()[0].edge, EdgeId(2));
        assert_eq!(r.reversed(), a);
    }

    #[test]
    fn test_display() {
        let a = Interface::new("front", [EdgeId(1), EdgeId(2)]);
        assert_eq!(a.to_string(), "[front:e1, front:e2]");
        assert!(a.touches("front"));
        assert!(!a.touches("back"));
    }
}
