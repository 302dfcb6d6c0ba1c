//! Two-panel skirts used as tiers.
//!
//! Every skirt is a front and a back panel sewn at both sides. Panels hang
//! down from their top edge (local `y = 0`), the back panel is turned to
//! face backwards. Each skirt exports `top`, `bottom` and their per-panel
//! parts `top_f`, `top_b`, `bottom_f`, `bottom_b`. The waist input is split
//! into `waist - waist_back_width` for the front and `waist_back_width` for
//! the back, and the top edges realize exactly those lengths.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{UnitQuaternion, Vector3};
use pattern_assembly::{Component, Interface, Panel};
use pattern_types::EdgeId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::Body;
use crate::design::Design;
use crate::error::{GarmentError, GarmentResult};

/// Segments used for each arc of a circle skirt panel.
pub const ARC_SEGMENTS: usize = 16;

/// Distance of the skirt panels from the body centre plane.
const DEPTH_OFFSET: f64 = 15.0;

/// Skirt variants available to tiered garments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkirtShape {
    /// Two flared trapezoids.
    Skirt2,
    /// Two annular sectors.
    CircleSkirt,
    /// Annular sectors with a hem tilted side to side.
    AsymmSkirtCircle,
}

/// A built skirt and the values a parent needs from it.
#[derive(Debug, Clone)]
pub struct SkirtPiece {
    /// Panels, side seams and exported interfaces.
    pub component: Component,
    /// Nominal vertical length at the centre front.
    pub length: f64,
    /// Hem tilt in degrees, for skirts that have one.
    pub low_angle: Option<f64>,
}

impl SkirtShape {
    /// Every registered shape.
    pub const ALL: [Self; 3] = [Self::Skirt2, Self::CircleSkirt, Self::AsymmSkirtCircle];

    /// Registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Skirt2 => "Skirt2",
            Self::CircleSkirt => "CircleSkirt",
            Self::AsymmSkirtCircle => "AsymmSkirtCircle",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }

    /// Build a skirt of the given length for the body's waist.
    pub fn build(self, name: &str, body: &Body, design: &Design, length: f64) -> GarmentResult<SkirtPiece> {
        if !(length.is_finite() && length > 0.0) {
            return Err(GarmentError::InfeasibleGeometry {
                panel: name.to_string(),
                feature: "skirt length".to_string(),
                reason: format!("length {length} must be positive"),
            });
        }
        let (front_width, back_width) = split_waist(name, body)?;
        let front_name = format!("{name}_front");
        let back_name = format!("{name}_back");

        let (front, back, low_angle) = match self {
            Self::Skirt2 => {
                let flare = design.skirt.flare;
                (
                    trapezoid(&front_name, front_width, length, flare)?,
                    trapezoid(&back_name, back_width, length, flare)?,
                    None,
                )
            }
            Self::CircleSkirt | Self::AsymmSkirtCircle => {
                let suns = design.flare_skirt.suns;
                let (tilt, low_angle) = if self == Self::AsymmSkirtCircle {
                    let angle = design.flare_skirt.low_angle;
                    (angle.to_radians().tan() * body.waist / 4.0, Some(angle))
                } else {
                    (0.0, None)
                };
                let sweep = |width: f64| 2.0 * PI * suns * width / body.waist;
                (
                    sector(&front_name, front_width, sweep(front_width), length, tilt)?,
                    sector(&back_name, back_width, sweep(back_width), length, -tilt)?,
                    low_angle,
                )
            }
        };

        let component = join_panels(name, front, back, body)?;
        debug!(skirt = %name, shape = %self, length, front_width, back_width, "Built skirt");
        Ok(SkirtPiece {
            component,
            length,
            low_angle,
        })
    }
}

impl fmt::Display for SkirtShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkirtShape {
    type Err = GarmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| GarmentError::unknown_variant("skirt shape", s, &Self::names()))
    }
}

impl TryFrom<String> for SkirtShape {
    type Error = GarmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SkirtShape> for String {
    fn from(shape: SkirtShape) -> Self {
        shape.name().to_string()
    }
}

// ============================================================================
// Panels
// ============================================================================

/// A skirt panel with its boundary parts.
struct SkirtPanel {
    panel: Panel,
    top: Vec<EdgeId>,
    bottom: Vec<EdgeId>,
    left: EdgeId,
    right: EdgeId,
}

fn split_waist(name: &str, body: &Body) -> GarmentResult<(f64, f64)> {
    let back = body.waist_back_width();
    let front = body.waist - back;
    if front > 0.0 && back > 0.0 {
        Ok((front, back))
    } else {
        Err(GarmentError::InfeasibleGeometry {
            panel: name.to_string(),
            feature: "waist split".to_string(),
            reason: format!("waist {} cannot hold a back width of {back}", body.waist),
        })
    }
}

fn trapezoid(name: &str, top: f64, length: f64, flare: f64) -> GarmentResult<SkirtPanel> {
    let bottom = top + 2.0 * flare;
    let panel = Panel::from_verts(
        name,
        [
            [bottom / 2.0, -length],
            [-bottom / 2.0, -length],
            [-top / 2.0, 0.0],
            [top / 2.0, 0.0],
        ],
    )?;
    Ok(SkirtPanel {
        top: vec![panel.edge_id(2)?],
        bottom: vec![panel.edge_id(0)?],
        left: panel.edge_id(1)?,
        right: panel.edge_id(3)?,
        panel,
    })
}

/// Annular sector whose top polyline measures exactly `top`.
///
/// The hem drops by `tilt * u` relative to `length`, where `u` runs from -1
/// at the left side to 1 at the right side.
fn sector(name: &str, top: f64, sweep: f64, length: f64, tilt: f64) -> GarmentResult<SkirtPanel> {
    if length - tilt.abs() <= 0.0 {
        return Err(GarmentError::InfeasibleGeometry {
            panel: name.to_string(),
            feature: "asymmetric hem".to_string(),
            reason: format!("tilt {tilt} leaves no fabric below a length of {length}"),
        });
    }
    #[allow(clippy::cast_precision_loss)]
    let n = ARC_SEGMENTS as f64;
    let inner = top / (2.0 * n * (sweep / (2.0 * n)).sin());
    let at = |k: usize| {
        #[allow(clippy::cast_precision_loss)]
        let u = 2.0 * k as f64 / n - 1.0;
        (u * sweep / 2.0, u)
    };
    let point = |radius: f64, angle: f64| [radius * angle.sin(), inner - radius * angle.cos()];

    let mut verts = Vec::with_capacity(2 * ARC_SEGMENTS + 2);
    for k in (0..=ARC_SEGMENTS).rev() {
        let (angle, u) = at(k);
        verts.push(point(inner + length + tilt * u, angle));
    }
    for k in 0..=ARC_SEGMENTS {
        verts.push(point(inner, at(k).0));
    }

    let panel = Panel::from_verts(name, verts)?;
    let ids = panel.edges().ids().to_vec();
    Ok(SkirtPanel {
        bottom: ids[..ARC_SEGMENTS].to_vec(),
        left: ids[ARC_SEGMENTS],
        top: ids[ARC_SEGMENTS + 1..=2 * ARC_SEGMENTS].to_vec(),
        right: ids[2 * ARC_SEGMENTS + 1],
        panel,
    })
}

// ============================================================================
// Assembly
// ============================================================================

fn join_panels(name: &str, front: SkirtPanel, back: SkirtPanel, body: &Body) -> GarmentResult<Component> {
    let waist_level = body.height - body.head_l - body.waist_line;
    let interfaces = |part: &SkirtPanel| {
        let p = &part.panel;
        (
            p.interface_of(part.top.iter().copied()),
            p.interface_of(part.bottom.iter().copied()),
            p.interface_of([part.left]),
            p.interface_of([part.right]),
        )
    };
    let (top_f, bottom_f, left_f, right_f) = interfaces(&front);
    let (top_b, bottom_b, left_b, right_b) = interfaces(&back);

    let mut front = front.panel;
    front.translate_by(Vector3::new(0.0, waist_level, DEPTH_OFFSET));
    let mut back = back.panel;
    back.rotate_by(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI))
        .translate_by(Vector3::new(0.0, waist_level, -DEPTH_OFFSET));

    let mut skirt = Component::new(name);
    skirt.add_panel(front)?;
    skirt.add_panel(back)?;
    skirt.stitch(left_f, right_b)?;
    skirt.stitch(right_f, left_b)?;

    skirt.set_interface("top", Interface::chain([&top_f, &top_b]));
    skirt.set_interface("bottom", Interface::chain([&bottom_f, &bottom_b]));
    skirt.set_interface("top_f", top_f);
    skirt.set_interface("top_b", top_b);
    skirt.set_interface("bottom_f", bottom_f);
    skirt.set_interface("bottom_b", bottom_b);
    Ok(skirt)
}
