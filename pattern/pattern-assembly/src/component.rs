//! Hierarchical components.
//!
//! A [`Component`] owns panels and sub-components, the seams between them
//! and a set of exported interfaces its parent can stitch to.

use hashbrown::{HashMap, HashSet};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use pattern_types::{Aabb, Edge};
use tracing::debug;

use crate::error::{PatternError, PatternResult};
use crate::export::{Pattern, PatternPanel, Stitch};
use crate::interface::{EdgeLookup, EdgeRef, Interface};
use crate::panel::Panel;
use crate::stitch::{DEFAULT_TOLERANCE, StitchingRule};
use crate::validation::PatternValidation;

/// A child of a component.
#[derive(Debug, Clone)]
pub enum Node {
    /// A single panel.
    Panel(Panel),
    /// A nested component.
    Component(Component),
}

impl Node {
    /// Name of the panel or component.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Panel(p) => p.name(),
            Self::Component(c) => c.name(),
        }
    }
}

/// A composite of panels and sub-components.
///
/// Panel names must be unique across the whole tree, since interfaces
/// reference edges by panel name.
///
/// # Example
///
/// ```
/// use pattern_assembly::{Component, Panel};
///
/// let front = Panel::from_verts("front", [[0.0, 0.0], [-5.0, 0.0], [-5.0, 8.0], [0.0, 8.0]]).unwrap();
/// let back = Panel::from_verts("back", [[0.0, 0.0], [-5.0, 0.0], [-5.0, 8.0], [0.0, 8.0]]).unwrap();
/// let side_f = front.interface_of([front.edge_id(1).unwrap()]);
/// let side_b = back.interface_of([back.edge_id(1).unwrap()]);
///
/// let mut body = Component::new("body");
/// body.add_panel(front).unwrap();
/// body.add_panel(back).unwrap();
/// body.stitch(side_f, side_b).unwrap();
///
/// assert_eq!(body.rules().len(), 1);
/// assert!(body.validate().is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Component {
    /// Component name.
    name: String,

    /// Children in insertion order.
    children: Vec<Node>,

    /// Seams between children.
    rules: Vec<StitchingRule>,

    /// Interfaces exported to the parent.
    interfaces: HashMap<String, Interface>,
}

impl Component {
    /// Create an empty component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            rules: Vec::new(),
            interfaces: HashMap::new(),
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Seams declared on this component (not including children's).
    #[must_use]
    pub fn rules(&self) -> &[StitchingRule] {
        &self.rules
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Add a panel.
    ///
    /// # Errors
    ///
    /// [`PatternError::DuplicatePanel`] if a panel of that name already exists.
    pub fn add_panel(&mut self, panel: Panel) -> PatternResult<()> {
        self.ensure_unique([panel.name()])?;
        self.children.push(Node::Panel(panel));
        Ok(())
    }

    /// Add a sub-component.
    ///
    /// # Errors
    ///
    /// [`PatternError::DuplicatePanel`] if any of its panel names already exist.
    pub fn add_component(&mut self, component: Component) -> PatternResult<()> {
        self.ensure_unique(component.panel_names())?;
        self.children.push(Node::Component(component));
        Ok(())
    }

    fn ensure_unique<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> PatternResult<()> {
        let existing: HashSet<&str> = self.panel_names().into_iter().collect();
        for name in names {
            if existing.contains(name) {
                return Err(PatternError::DuplicatePanel {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// All panels, depth first in insertion order.
    #[must_use]
    pub fn panels(&self) -> Vec<&Panel> {
        let mut out = Vec::new();
        self.collect_panels(&mut out);
        out
    }

    fn collect_panels<'a>(&'a self, out: &mut Vec<&'a Panel>) {
        for child in &self.children {
            match child {
                Node::Panel(p) => out.push(p),
                Node::Component(c) => c.collect_panels(out),
            }
        }
    }

    fn for_each_panel_mut(&mut self, f: &mut impl FnMut(&mut Panel)) {
        for child in &mut self.children {
            match child {
                Node::Panel(p) => f(p),
                Node::Component(c) => c.for_each_panel_mut(f),
            }
        }
    }

    /// Names of all panels, depth first.
    #[must_use]
    pub fn panel_names(&self) -> Vec<&str> {
        self.panels().into_iter().map(Panel::name).collect()
    }

    /// Find a panel anywhere in the tree.
    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.children.iter().find_map(|child| match child {
            Node::Panel(p) if p.name() == name => Some(p),
            Node::Panel(_) => None,
            Node::Component(c) => c.panel(name),
        })
    }

    /// Direct sub-component by name.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.children.iter().find_map(|child| match child {
            Node::Component(c) if c.name() == name => Some(c),
            _ => None,
        })
    }

    // =========================================================================
    // Interfaces and seams
    // =========================================================================

    /// Exported interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &HashMap<String, Interface> {
        &self.interfaces
    }

    /// Exported interface by name.
    pub fn interface(&self, name: &str) -> PatternResult<&Interface> {
        self.interfaces
            .get(name)
            .ok_or_else(|| PatternError::InterfaceNotFound {
                owner: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Export an interface under `name`.
    pub fn set_interface(&mut self, name: impl Into<String>, interface: Interface) {
        self.interfaces.insert(name.into(), interface);
    }

    /// Cumulative length of an interface resolved against this tree.
    pub fn interface_length(&self, interface: &Interface) -> PatternResult<f64> {
        interface.length(self)
    }

    /// Record a plain seam between two interfaces.
    ///
    /// # Errors
    ///
    /// [`PatternError::MismatchedStitch`] if the lengths differ; the rule is
    /// not recorded.
    pub fn stitch(&mut self, a: Interface, b: Interface) -> PatternResult<()> {
        self.add_rule(StitchingRule::new(a, b))
    }

    /// Record a seam where `a` is gathered by `gather` onto `b`.
    pub fn stitch_gathered(&mut self, a: Interface, b: Interface, gather: f64) -> PatternResult<()> {
        self.add_rule(StitchingRule::gathered(a, b, gather))
    }

    fn add_rule(&mut self, rule: StitchingRule) -> PatternResult<()> {
        rule.check(&*self, DEFAULT_TOLERANCE)?;
        debug!(component = %self.name, a = %rule.a(), b = %rule.b(), gather = rule.gather(), "Stitched");
        self.rules.push(rule);
        Ok(())
    }

    /// Every seam in the tree: child seams first, then this component's.
    #[must_use]
    pub fn all_rules(&self) -> Vec<&StitchingRule> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                Node::Panel(p) => out.extend(p.rules()),
                Node::Component(c) => out.extend(c.all_rules()),
            }
        }
        out.extend(&self.rules);
        out
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Move the whole component.
    pub fn translate_by(&mut self, offset: Vector3<f64>) -> &mut Self {
        self.for_each_panel_mut(&mut |p| {
            p.translate_by(offset);
        });
        self
    }

    /// Rotate the whole component about the world origin.
    pub fn rotate_by(&mut self, rotation: UnitQuaternion<f64>) -> &mut Self {
        self.for_each_panel_mut(&mut |p| {
            p.rotate_by(rotation);
        });
        self
    }

    /// Reflect the whole component across the world YZ plane.
    ///
    /// Names are preserved; exported interfaces and seams are reversed to
    /// follow the mirrored edge traversal.
    pub fn mirror(&mut self) -> &mut Self {
        for child in &mut self.children {
            match child {
                Node::Panel(p) => {
                    p.mirror();
                }
                Node::Component(c) => {
                    c.mirror();
                }
            }
        }
        for interface in self.interfaces.values_mut() {
            *interface = interface.reversed();
        }
        for rule in &mut self.rules {
            *rule = rule.reversed();
        }
        self
    }

    /// World-space bounds of all panels.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.panels()
            .iter()
            .fold(Aabb::empty(), |acc, p| acc.union(&p.bounds()))
    }

    /// Move this component so its `own` interface sits at `target`.
    ///
    /// The centres of both interfaces are aligned, then the component is
    /// pushed `gap` further toward its own body so the seam has room.
    /// `target` is resolved against `target_owner`.
    pub fn place_by_interface(
        &mut self,
        own: &Interface,
        target: &Interface,
        target_owner: &impl EdgeLookup,
        gap: f64,
    ) -> PatternResult<()> {
        let own_center = own.world_centroid(&*self)?;
        let target_center = target.world_centroid(target_owner)?;
        self.translate_by(target_center - own_center);

        let body = self.bounds().center() - target_center;
        if let Some(direction) = body.try_normalize(f64::EPSILON) {
            self.translate_by(direction * gap);
        }
        debug!(component = %self.name, x = target_center.x, y = target_center.y, z = target_center.z, gap, "Placed by interface");
        Ok(())
    }

    // =========================================================================
    // Validation and export
    // =========================================================================

    /// Re-check closure, reference freshness and every seam in the tree.
    #[must_use]
    pub fn validate(&self) -> PatternValidation {
        let mut report = PatternValidation::new();
        for panel in self.panels() {
            let gap = panel.edges().closure_gap();
            if gap > pattern_types::POINT_TOLERANCE {
                report.open_loops.push((panel.name().to_string(), gap));
            }
            if !panel.edges().is_clockwise() {
                report.inverted_panels.push(panel.name().to_string());
            }
        }
        for (index, rule) in self.all_rules().into_iter().enumerate() {
            for edge in rule.a().edges().iter().chain(rule.b().edges()) {
                if let Err(PatternError::StaleInterface { .. } | PatternError::PanelNotFound { .. }) =
                    self.lookup_edge(edge)
                {
                    report.stale_references.push(edge.clone());
                }
            }
            if let Err(PatternError::MismatchedStitch { difference, .. }) = rule.check(self, DEFAULT_TOLERANCE) {
                report.mismatched_stitches.push((index, difference));
            }
        }
        report
    }

    /// Flatten the tree into the exported pattern artifact.
    ///
    /// # Errors
    ///
    /// [`PatternError::InvalidPattern`] if validation finds any issue.
    pub fn assemble(&self) -> PatternResult<Pattern> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(PatternError::InvalidPattern {
                summary: report.summary(),
            });
        }

        let panels: Vec<PatternPanel> = self.panels().into_iter().map(PatternPanel::from_panel).collect();
        let stitches = self
            .all_rules()
            .into_iter()
            .map(|rule| Stitch::from_rule(rule, self))
            .collect::<PatternResult<Vec<_>>>()?;

        debug!(
            pattern = %self.name,
            panels = panels.len(),
            stitches = stitches.len(),
            "Assembled pattern"
        );
        Ok(Pattern {
            name: self.name.clone(),
            panels,
            stitches,
        })
    }
}

impl Component {
    fn owner_of(&self, edge: &EdgeRef) -> PatternResult<&Panel> {
        self.panel(&edge.panel)
            .ok_or_else(|| PatternError::PanelNotFound {
                name: edge.panel.clone(),
            })
    }
}

impl EdgeLookup for Component {
    fn lookup_edge(&self, edge: &EdgeRef) -> PatternResult<Edge> {
        self.owner_of(edge)?.lookup_edge(edge)
    }

    fn lookup_world_edge(&self, edge: &EdgeRef) -> PatternResult<[Point3<f64>; 2]> {
        self.owner_of(edge)?.lookup_world_edge(edge)
    }

    fn edge_index(&self, edge: &EdgeRef) -> PatternResult<usize> {
        self.owner_of(edge)?.edge_index(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pattern_types::Side;

    fn rect(name: &str, w: f64, h: f64) -> Panel {
        Panel::from_verts(name, [[0.0, 0.0], [-w, 0.0], [-w, h], [0.0, h]]).unwrap()
    }

    fn half(tag: &str) -> Component {
        let mut front = rect(&format!("{tag}_front"), 10.0, 20.0);
        let bottom = front.edge_id(0).unwrap();
        let dart = front.insert_dart(bottom, 2.0, 5.0, 4.0, Side::Right).unwrap();
        let inside = front.edge_id_from_end(1).unwrap();
        front.set_interface("bottom", front.interface_of(dart.outer));
        front.set_interface("inside", front.interface_of([inside]));
        front.translate_by(Vector3::new(0.0, 0.0, 10.0));

        let mut back = rect(&format!("{tag}_back"), 10.0, 20.0);
        let inside_b = back.edge_id_from_end(1).unwrap();
        back.set_interface("inside", back.interface_of([inside_b]));
        back.translate_by(Vector3::new(0.0, 0.0, -10.0));

        let side_f = front.interface_of([front.edge_id_from_end(3).unwrap()]);
        let side_b = back.interface_of([back.edge_id(1).unwrap()]);

        let mut c = Component::new(tag);
        let (fi, bi) = (front.interface("inside").unwrap().clone(), back.interface("inside").unwrap().clone());
        c.add_panel(front).unwrap();
        c.add_panel(back).unwrap();
        c.stitch(side_f, side_b).unwrap();
        c.set_interface("front_inside", fi);
        c.set_interface("back_inside", bi);
        c
    }

    #[test]
    fn test_duplicate_panel_rejected() {
        let mut c = Component::new("c");
        c.add_panel(rect("a", 1.0, 1.0)).unwrap();
        let err = c.add_panel(rect("a", 2.0, 2.0)).unwrap_err();
        assert_eq!(err, PatternError::DuplicatePanel { name: "a".to_string() });

        let mut sub = Component::new("sub");
        sub.add_panel(rect("a", 1.0, 1.0)).unwrap();
        assert!(c.add_component(sub).is_err());
    }

    #[test]
    fn test_mismatched_stitch_not_recorded() {
        let mut c = Component::new("c");
        let a = rect("a", 4.0, 3.0);
        let b = rect("b", 4.0, 3.0);
        let ia = a.interface_of([a.edge_id(0).unwrap()]);
        let ib = b.interface_of([b.edge_id(1).unwrap()]);
        c.add_panel(a).unwrap();
        c.add_panel(b).unwrap();
        let err = c.stitch(ia, ib).unwrap_err();
        assert!(err.is_mismatched_stitch());
        assert!(c.rules().is_empty());
    }

    #[test]
    fn test_unknown_panel_in_interface() {
        let c = Component::new("c");
        let err = c
            .interface_length(&Interface::new("ghost", [pattern_types::EdgeId(0)]))
            .unwrap_err();
        assert!(matches!(err, PatternError::PanelNotFound { .. }));
    }

    #[test]
    fn test_mirror_preserves_names_and_lengths() {
        let right = half("right");
        let mut left = half("left");
        left.mirror();

        let names: HashSet<&str> = right.panel_names().into_iter().map(|n| n.trim_start_matches("right_")).collect();
        let mirrored: HashSet<&str> = left.panel_names().into_iter().map(|n| n.trim_start_matches("left_")).collect();
        assert_eq!(names, mirrored);

        let before = half("left");
        for (name, interface) in before.interfaces() {
            let original = before.interface_length(interface).unwrap();
            let after = left.interface_length(left.interface(name).unwrap()).unwrap();
            assert_eq!(original, after);
        }
        assert!(left.validate().is_valid());
    }

    #[test]
    fn test_two_halves_stitched() {
        let mut whole = Component::new("whole");
        let right = half("right");
        let mut left = half("left");
        left.mirror();
        let (rf, lf) = (
            right.interface("front_inside").unwrap().clone(),
            left.interface("front_inside").unwrap().clone(),
        );
        whole.add_component(right).unwrap();
        whole.add_component(left).unwrap();
        whole.stitch(rf, lf).unwrap();

        // Two dart closures, two side seams, one centre seam.
        assert_eq!(whole.all_rules().len(), 5);
        let pattern = whole.assemble().unwrap();
        assert_eq!(pattern.panels.len(), 4);
        assert_eq!(pattern.stitches.len(), 5);
    }

    #[test]
    fn test_place_by_interface_with_gap() {
        let upper = rect("upper", 10.0, 10.0);
        let upper_bottom = upper.interface_of([upper.edge_id(0).unwrap()]);
        let mut top = Component::new("top");
        top.add_panel(upper).unwrap();
        top.translate_by(Vector3::new(0.0, 50.0, 0.0));

        let lower = rect("lower", 10.0, 10.0);
        let lower_top = lower.interface_of([lower.edge_id(2).unwrap()]);
        let mut bottom = Component::new("bottom");
        bottom.add_panel(lower).unwrap();
        bottom.place_by_interface(&lower_top, &upper_bottom, &top, 5.0).unwrap();

        let seam = lower_top.world_centroid(&bottom).unwrap();
        assert_relative_eq!(seam.y, 45.0, epsilon = 1e-9);
        assert_relative_eq!(seam.x, -5.0, epsilon = 1e-9);
    }
}
