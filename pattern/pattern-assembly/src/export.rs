//! The flattened pattern artifact.
//!
//! Edge ids are internal; the artifact refers to edges by their index in
//! the panel's vertex ring, which is what downstream tools consume.

use crate::error::{PatternError, PatternResult};
use crate::interface::{EdgeLookup, Interface};
use crate::panel::Panel;
use crate::stitch::StitchingRule;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finished pattern: panels plus the stitching graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    /// Name of the root component.
    pub name: String,
    /// Panels in depth-first order.
    pub panels: Vec<PatternPanel>,
    /// All seams, child seams first.
    pub stitches: Vec<Stitch>,
}

impl Pattern {
    /// Panel by name.
    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&PatternPanel> {
        self.panels.iter().find(|p| p.name == name)
    }
}

/// One flat panel with its placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternPanel {
    /// Panel name.
    pub name: String,
    /// Boundary vertices; edge `i` joins vertex `i` and `i + 1` (wrapping).
    pub vertices: Vec<[f64; 2]>,
    /// World translation.
    pub translation: [f64; 3],
    /// World rotation as roll, pitch, yaw in degrees (applied about X, Y, Z).
    pub rotation: [f64; 3],
}

impl PatternPanel {
    /// Snapshot a panel.
    #[must_use]
    pub fn from_panel(panel: &Panel) -> Self {
        let t = panel.placement().translation.vector;
        let (roll, pitch, yaw) = panel.placement().rotation.euler_angles();
        Self {
            name: panel.name().to_string(),
            vertices: panel.edges().vertices().iter().map(|p| [p.x, p.y]).collect(),
            translation: [t.x, t.y, t.z],
            rotation: [roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees()],
        }
    }
}

/// One side of a seam on one panel: the panel and an edge index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StitchEdge {
    /// Panel name.
    pub panel: String,
    /// Edge index in the panel's boundary.
    pub edge: usize,
}

/// A seam in index form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stitch {
    /// First side, in order.
    pub a: Vec<StitchEdge>,
    /// Second side, in order.
    pub b: Vec<StitchEdge>,
    /// Gathering ratio of `a` onto `b`.
    pub gather: f64,
}

impl Stitch {
    /// Convert a rule, resolving edge ids to current edge indices.
    pub fn from_rule<L: EdgeLookup + ?Sized>(rule: &StitchingRule, lookup: &L) -> PatternResult<Self> {
        Ok(Self {
            a: side(rule.a(), lookup)?,
            b: side(rule.b(), lookup)?,
            gather: rule.gather(),
        })
    }
}

fn side<L: EdgeLookup + ?Sized>(interface: &Interface, lookup: &L) -> PatternResult<Vec<StitchEdge>> {
    interface
        .edges()
        .iter()
        .map(|r| {
            lookup.edge_index(r).map(|edge| StitchEdge {
                panel: r.panel.clone(),
                edge,
            })
        })
        .collect::<PatternResult<Vec<_>>>()
        .and_then(|edges| {
            if edges.is_empty() {
                Err(PatternError::EmptyInterface)
            } else {
                Ok(edges)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use approx::assert_relative_eq;
    use nalgebra::{UnitQuaternion, Vector3};

    #[test]
    fn test_export_indices_and_placement() {
        let mut panel = Panel::from_verts("p", [[0.0, 0.0], [-4.0, 0.0], [-4.0, 4.0], [0.0, 4.0]]).unwrap();
        let side = panel.edge_id(1).unwrap();
        let center = panel.edge_id(3).unwrap();
        panel
            .rotate_by(UnitQuaternion::from_euler_angles(0.0, std::f64::consts::PI / 2.0 - 0.5, 0.0))
            .translate_by(Vector3::new(1.0, 2.0, 3.0));
        let rule = StitchingRule::new(panel.interface_of([side]), panel.interface_of([center]));

        let snapshot = PatternPanel::from_panel(&panel);
        assert_eq!(snapshot.vertices.len(), 4);
        assert_eq!(snapshot.translation, [1.0, 2.0, 3.0]);
        assert_relative_eq!(snapshot.rotation[1], (std::f64::consts::PI / 2.0 - 0.5).to_degrees(), epsilon = 1e-9);

        let mut c = Component::new("c");
        c.add_panel(panel).unwrap();
        let stitch = Stitch::from_rule(&rule, &c).unwrap();
        assert_eq!(stitch.a, vec![StitchEdge { panel: "p".to_string(), edge: 1 }]);
        assert_eq!(stitch.b[0].edge, 3);
    }
}
