//! Individual flat panels.
//!
//! A [`Panel`] owns one closed boundary loop, the named interfaces other
//! stages stitch to or cut into, a 3D placement and the local seams that
//! close its darts.

use hashbrown::HashMap;
use nalgebra::{Isometry3, Point2, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use pattern_types::{
    Aabb, Edge, EdgeId, EdgeLoop, EdgeSequence, GeometryError, Side, cut_into_edge, dart_shape,
    project_corner,
};
use tracing::debug;

use crate::error::{PatternError, PatternResult};
use crate::interface::{EdgeLookup, EdgeRef, Interface};
use crate::stitch::{DEFAULT_TOLERANCE, StitchingRule};

/// Edge ids produced by cutting a shape into one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCutIds {
    /// Edges contributed by the shape, in loop order.
    pub shape: Vec<EdgeId>,
    /// The two remaining parts of the original edge (before, after).
    pub outer: [EdgeId; 2],
}

/// Edge ids produced by inserting a dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DartCut {
    /// The two dart legs, sewn together by the panel's closing rule.
    pub flanks: [EdgeId; 2],
    /// The two remaining parts of the original edge (before, after).
    pub outer: [EdgeId; 2],
}

/// A flat piece of fabric.
///
/// # Example
///
/// ```
/// use pattern_assembly::Panel;
/// use pattern_types::Side;
///
/// let mut panel = Panel::from_verts(
///     "front",
///     [[0.0, 0.0], [-20.0, 0.0], [-20.0, 40.0], [0.0, 40.0]],
/// ).unwrap();
/// let bottom = panel.edge_id(0).unwrap();
/// let dart = panel.insert_dart(bottom, 3.0, 10.0, 8.0, Side::Right).unwrap();
///
/// assert_eq!(panel.edges().len(), 7);
/// assert_eq!(panel.rules().len(), 1);
/// assert!(panel.edge(dart.outer[0]).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Panel {
    /// Unique name within the pattern.
    name: String,

    /// Closed boundary in panel-local coordinates.
    edges: EdgeLoop,

    /// Named edge subsets.
    interfaces: HashMap<String, Interface>,

    /// Placement in world space.
    placement: Isometry3<f64>,

    /// Seams local to this panel (dart closures).
    rules: Vec<StitchingRule>,
}

impl Panel {
    /// Create a panel with identity placement.
    #[must_use]
    pub fn new(name: impl Into<String>, edges: EdgeLoop) -> Self {
        Self {
            name: name.into(),
            edges,
            interfaces: HashMap::new(),
            placement: Isometry3::identity(),
            rules: Vec::new(),
        }
    }

    /// Create a panel whose boundary runs through the given vertices.
    pub fn from_verts(
        name: impl Into<String>,
        verts: impl IntoIterator<Item = [f64; 2]>,
    ) -> PatternResult<Self> {
        Ok(Self::new(name, EdgeLoop::from_verts(verts)?))
    }

    /// Panel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary loop.
    #[must_use]
    pub fn edges(&self) -> &EdgeLoop {
        &self.edges
    }

    /// Placement in world space.
    #[must_use]
    pub fn placement(&self) -> &Isometry3<f64> {
        &self.placement
    }

    /// Local seams.
    #[must_use]
    pub fn rules(&self) -> &[StitchingRule] {
        &self.rules
    }

    /// All named interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &HashMap<String, Interface> {
        &self.interfaces
    }

    /// Named interface.
    pub fn interface(&self, name: &str) -> PatternResult<&Interface> {
        self.interfaces
            .get(name)
            .ok_or_else(|| PatternError::InterfaceNotFound {
                owner: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Define or replace a named interface.
    pub fn set_interface(&mut self, name: impl Into<String>, interface: Interface) {
        self.interfaces.insert(name.into(), interface);
    }

    /// Interface over edges of this panel.
    #[must_use]
    pub fn interface_of(&self, ids: impl IntoIterator<Item = EdgeId>) -> Interface {
        Interface::new(self.name.clone(), ids)
    }

    /// Id of the edge currently at `index`.
    pub fn edge_id(&self, index: usize) -> PatternResult<EdgeId> {
        self.edges
            .edge(index)
            .map(|e| e.id)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Id of the edge `k` places from the end (`1` is the last edge).
    pub fn edge_id_from_end(&self, k: usize) -> PatternResult<EdgeId> {
        self.edges
            .edge_from_end(k)
            .map(|e| e.id)
            .ok_or_else(|| self.out_of_range(k))
    }

    fn out_of_range(&self, index: usize) -> PatternError {
        GeometryError::EdgeIndexOutOfRange {
            index,
            len: self.edges.len(),
        }
        .into()
    }

    /// Current geometry of an edge.
    pub fn edge(&self, id: EdgeId) -> PatternResult<Edge> {
        self.edges
            .edge_by_id(id)
            .ok_or_else(|| PatternError::StaleInterface {
                panel: self.name.clone(),
                edge: id,
            })
    }

    fn index_of(&self, id: EdgeId) -> PatternResult<usize> {
        self.edges
            .index_of(id)
            .ok_or_else(|| PatternError::StaleInterface {
                panel: self.name.clone(),
                edge: id,
            })
    }

    // =========================================================================
    // Boundary edits
    // =========================================================================

    /// Cut `shape` into an edge, centred `offset` from the edge start.
    ///
    /// The original edge id is retired; interfaces that referenced it must be
    /// rebuilt from the returned ids.
    pub fn cut_into_edge(
        &mut self,
        edge: EdgeId,
        shape: &EdgeSequence,
        offset: f64,
        side: Side,
    ) -> PatternResult<EdgeCutIds> {
        let index = self.index_of(edge)?;
        let target = self.edge(edge)?;
        let cut = cut_into_edge(shape, &target, offset, side)?;
        let ids = self.edges.substitute(index, &cut.replacement)?;
        let [before, after] = cut.outer_segments();
        Ok(EdgeCutIds {
            shape: cut.shape_segment_range().map(|i| ids[i]).collect(),
            outer: [ids[before], ids[after]],
        })
    }

    /// Insert a dart into an edge and record the seam that closes it.
    ///
    /// # Errors
    ///
    /// Fails with an infeasible-geometry error if the width or depth is not
    /// positive, the depth reaches the host edge's length, or the dart does
    /// not fit inside the edge.
    pub fn insert_dart(
        &mut self,
        edge: EdgeId,
        width: f64,
        depth: f64,
        offset: f64,
        side: Side,
    ) -> PatternResult<DartCut> {
        let shape = dart_shape(width, depth)?;
        let host = self.edge(edge)?.length();
        if depth >= host {
            return Err(GeometryError::infeasible_cut(format!(
                "dart depth {depth:.3} exceeds host edge of length {host:.3}"
            ))
            .into());
        }
        let cut = self.cut_into_edge(edge, &shape, offset, side)?;
        let [first, second] = [cut.shape[0], cut.shape[1]];
        self.add_rule(StitchingRule::new(
            self.interface_of([first]),
            self.interface_of([second]),
        ))?;
        debug!(panel = %self.name, %edge, width, depth, offset, "Inserted dart");
        Ok(DartCut {
            flanks: [first, second],
            outer: cut.outer,
        })
    }

    /// Record a local seam after checking its lengths.
    pub fn add_rule(&mut self, rule: StitchingRule) -> PatternResult<()> {
        rule.check(&*self, DEFAULT_TOLERANCE)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Move the end point of an edge (and the start of the next one).
    pub fn set_edge_end(&mut self, edge: EdgeId, point: Point2<f64>) -> PatternResult<()> {
        let n = self.edges.len();
        let vertex = (self.index_of(edge)? + 1) % n;
        self.edges.set_vertex(vertex, point)?;
        Ok(())
    }

    /// Replace the corner named by a two-edge reference with `shape`.
    ///
    /// The shape is translated so it starts on the first edge and ends on the
    /// second; both corner edges keep their ids and are shortened. Returns an
    /// interface over the new shape edges.
    ///
    /// # Errors
    ///
    /// [`PatternError::NotACorner`] unless `corner` names two consecutive
    /// edges of this panel, or an infeasible projection error.
    pub fn cut_corner(&mut self, corner: &Interface, shape: &EdgeSequence) -> PatternResult<Interface> {
        let [incoming, outgoing] = match corner.edges() {
            [a, b] => [a, b],
            other => {
                return Err(PatternError::not_a_corner(
                    &self.name,
                    format!("expected two edges, got {}", other.len()),
                ));
            }
        };
        if incoming.panel != self.name || outgoing.panel != self.name {
            return Err(PatternError::not_a_corner(
                &self.name,
                format!("reference into another panel ({incoming}, {outgoing})"),
            ));
        }
        let first = self.index_of(incoming.edge)?;
        let second = self.index_of(outgoing.edge)?;
        if (first + 1) % self.edges.len() != second {
            return Err(PatternError::not_a_corner(
                &self.name,
                format!("edges {} and {} are not consecutive", incoming.edge, outgoing.edge),
            ));
        }

        let (placed, s, t) = project_corner(shape, &self.edge(incoming.edge)?, &self.edge(outgoing.edge)?)?;
        let ids = self.edges.replace_corner(first, &placed)?;
        debug!(
            panel = %self.name,
            incoming = %incoming.edge,
            outgoing = %outgoing.edge,
            at_incoming = s,
            at_outgoing = t,
            segments = ids.len(),
            "Cut corner"
        );
        Ok(self.interface_of(ids))
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Move the panel in world space.
    pub fn translate_by(&mut self, offset: Vector3<f64>) -> &mut Self {
        self.placement = Translation3::from(offset) * self.placement;
        self
    }

    /// Rotate the panel about the world origin.
    pub fn rotate_by(&mut self, rotation: UnitQuaternion<f64>) -> &mut Self {
        self.placement = rotation * self.placement;
        self
    }

    /// Reflect the panel across the world YZ plane.
    ///
    /// Local geometry is reflected about its Y axis with traversal reversed,
    /// so the loop keeps its winding; every interface and rule is reversed to
    /// follow the new traversal. Names and edge ids are unchanged.
    pub fn mirror(&mut self) -> &mut Self {
        self.edges = self.edges.mirrored_x();
        for interface in self.interfaces.values_mut() {
            *interface = interface.reversed();
        }
        for rule in &mut self.rules {
            *rule = rule.reversed();
        }

        let t = self.placement.translation.vector;
        let q = self.placement.rotation;
        // Conjugating by diag(-1, 1, 1) negates the y and z quaternion parts.
        let rotation = UnitQuaternion::new_normalize(Quaternion::new(q.w, q.i, -q.j, -q.k));
        self.placement = Isometry3::from_parts(Translation3::new(-t.x, t.y, t.z), rotation);
        self
    }

    /// Map a local point to world space.
    #[must_use]
    pub fn world_point(&self, point: &Point2<f64>) -> Point3<f64> {
        self.placement * Point3::new(point.x, point.y, 0.0)
    }

    /// Boundary vertices in world space.
    #[must_use]
    pub fn world_vertices(&self) -> Vec<Point3<f64>> {
        self.edges
            .vertices()
            .iter()
            .map(|p| self.world_point(p))
            .collect()
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.world_vertices().iter())
    }
}

impl EdgeLookup for Panel {
    fn lookup_edge(&self, edge: &EdgeRef) -> PatternResult<Edge> {
        if edge.panel != self.name {
            return Err(PatternError::PanelNotFound {
                name: edge.panel.clone(),
            });
        }
        self.edge(edge.edge)
    }

    fn lookup_world_edge(&self, edge: &EdgeRef) -> PatternResult<[Point3<f64>; 2]> {
        let e = self.lookup_edge(edge)?;
        Ok([self.world_point(&e.start), self.world_point(&e.end)])
    }

    fn edge_index(&self, edge: &EdgeRef) -> PatternResult<usize> {
        if edge.panel != self.name {
            return Err(PatternError::PanelNotFound {
                name: edge.panel.clone(),
            });
        }
        self.index_of(edge.edge)
    }
}
