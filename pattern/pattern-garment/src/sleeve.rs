//! Armhole openings and the sleeve sewn into them.

use nalgebra::{Point2, Vector2, Vector3};
use pattern_assembly::{Component, Interface, Panel};
use pattern_types::{EdgeLoop, EdgeSequence};
use tracing::debug;

use crate::body::Body;
use crate::design::SleeveDesign;
use crate::error::{GarmentError, GarmentResult};

/// Armhole depth as a fraction of the bust line.
pub const ARMHOLE_DEPTH_FRAC: f64 = 0.7;

/// Distance of the sleeve panels from the body centre plane.
const DEPTH_OFFSET: f64 = 25.0;

/// Armhole shapes for a front and back bodice half plus a matching sleeve.
///
/// The back opening steps `inclination` in from the side and runs up to the
/// shoulder over `ARMHOLE_DEPTH_FRAC * bust_line`. The front opening is
/// wider by `depth_diff` (front minus back half-width) and deeper by the
/// shoulder rise over that width, so both cuts end at the same distance from
/// the centre line and take the same length off the side seams.
///
/// The sleeve is two panels whose caps are the opening shapes; they are
/// sewn together along both lengthwise sides and export their caps as
/// `in_front` and `in_back`.
#[derive(Debug, Clone)]
pub struct SleeveOpening {
    front_shape: EdgeSequence,
    back_shape: EdgeSequence,
    sleeve: Component,
}

impl SleeveOpening {
    /// Build the openings and the sleeve for the half named `name`.
    pub fn new(
        name: &str,
        body: &Body,
        design: &SleeveDesign,
        depth_diff: f64,
    ) -> GarmentResult<Self> {
        let tan = body.shoulder_incl_rad().tan();
        let back_width = design.inclination;
        let back_depth = ARMHOLE_DEPTH_FRAC * body.bust_line;
        let front_width = back_width + depth_diff;
        let front_depth = back_depth + depth_diff * tan;
        if !(front_width > 0.0 && front_depth > 0.0) {
            return Err(GarmentError::InfeasibleGeometry {
                panel: format!("{name}_sleeve"),
                feature: "armhole".to_string(),
                reason: format!("front opening {front_width} x {front_depth} is empty"),
            });
        }

        let front_shape = armhole(front_width, front_depth)?;
        let back_shape = armhole(back_width, back_depth)?;

        let (mut front, front_parts) = sleeve_panel(&format!("{name}_sleeve_f"), &front_shape, design.length)?;
        let (mut back, back_parts) = sleeve_panel(&format!("{name}_sleeve_b"), &back_shape, design.length)?;
        let height = body.height - body.head_l - back_depth;
        let across = -(body.bust / 4.0 + design.length);
        front.translate_by(Vector3::new(across, height, DEPTH_OFFSET));
        back.translate_by(Vector3::new(across, height, -DEPTH_OFFSET));

        let mut sleeve = Component::new(format!("{name}_sleeve"));
        sleeve.add_panel(front)?;
        sleeve.add_panel(back)?;
        sleeve.stitch(front_parts.under, back_parts.under)?;
        sleeve.stitch(front_parts.over, back_parts.over)?;
        sleeve.set_interface("in_front", front_parts.cap);
        sleeve.set_interface("in_back", back_parts.cap);
        sleeve.set_interface("cuff_front", front_parts.cuff);
        sleeve.set_interface("cuff_back", back_parts.cuff);

        debug!(sleeve = %name, front_width, front_depth, back_width, back_depth, "Built sleeve opening");
        Ok(Self {
            front_shape,
            back_shape,
            sleeve,
        })
    }

    /// Opening to cut into the front shoulder corner.
    #[must_use]
    pub fn in_front_shape(&self) -> &EdgeSequence {
        &self.front_shape
    }

    /// Opening to cut into the back shoulder corner.
    #[must_use]
    pub fn in_back_shape(&self) -> &EdgeSequence {
        &self.back_shape
    }

    /// The sleeve component.
    #[must_use]
    pub fn sleeve(&self) -> &Component {
        &self.sleeve
    }

    /// Take the sleeve component.
    #[must_use]
    pub fn into_sleeve(self) -> Component {
        self.sleeve
    }
}

/// Step from the side seam into the panel, then up to the shoulder.
fn armhole(width: f64, depth: f64) -> GarmentResult<EdgeSequence> {
    Ok(EdgeSequence::from_verts([[0.0, 0.0], [width, 0.0], [width, depth]])?)
}

struct SleeveParts {
    cap: Interface,
    under: Interface,
    over: Interface,
    cuff: Interface,
}

/// Sleeve panel extruded from its cap away from the side the cap bulges to.
fn sleeve_panel(name: &str, cap: &EdgeSequence, length: f64) -> GarmentResult<(Panel, SleeveParts)> {
    let chord = cap.chord();
    let out = Vector2::new(-chord.y, chord.x).normalize() * length;
    let points = cap.points();
    let first = points[0];
    let last = points[points.len() - 1];

    let mut verts: Vec<Point2<f64>> = vec![first, first + out, last + out];
    verts.extend(points[1..].iter().rev());
    let panel = Panel::new(name, EdgeLoop::new(verts)?);

    let ids = panel.edges().ids().to_vec();
    let parts = SleeveParts {
        under: panel.interface_of([ids[0]]),
        cuff: panel.interface_of([ids[1]]),
        over: panel.interface_of([ids[2]]),
        cap: panel.interface_of(ids[3..].iter().copied()),
    };
    Ok((panel, parts))
}
