//! Tiered skirts.
//!
//! A base skirt hangs from the waist and every further tier hangs from the
//! hem of the one above. Each tier is sized from the realized hem of its
//! predecessor times the ruffle factor, so the seam between them gathers.

use nalgebra::{UnitQuaternion, Vector3};
use pattern_assembly::{Component, Node};
use tracing::debug;

use crate::body::Body;
use crate::design::{Design, LevelsSkirtDesign};
use crate::error::{GarmentError, GarmentResult};

/// Vertical clearance left between consecutive tiers when placing them.
pub const TIER_GAP: f64 = 5.0;

/// Resolved tier lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLengths {
    /// Total length below the hip line.
    pub total: f64,
    /// Length of the base tier, measured from the waist.
    pub base: f64,
    /// Length of every following tier.
    pub level: f64,
}

impl TierLengths {
    /// Split the design length between the base and the levels.
    ///
    /// # Errors
    ///
    /// [`GarmentError::InvalidDesign`] if any resulting length is not positive.
    pub fn compute(body: &Body, design: &LevelsSkirtDesign) -> GarmentResult<Self> {
        let total = design.length * body.leg_length();
        let frac = design.base_length_frac;
        let base = body.hips_line + frac * total;
        #[allow(clippy::cast_precision_loss)]
        let level = if design.num_levels == 0 {
            0.0
        } else {
            (1.0 - frac) * total / design.num_levels as f64
        };
        if !(base > 0.0 && (design.num_levels == 0 || level > 0.0)) {
            return Err(GarmentError::invalid_design(
                "levels-skirt.length",
                format!("tiers of {base} and {level} cm cannot be built"),
            ));
        }
        Ok(Self { total, base, level })
    }
}

/// Build a base skirt and `num_levels` gathered tiers below it.
///
/// Exports only `top`, the waist of the base tier.
pub fn skirt_levels(body: &Body, design: &Design) -> GarmentResult<Component> {
    let config = &design.levels_skirt;
    let lengths = TierLengths::compute(body, config)?;

    let base = config.base.build("skirt", body, design, lengths.base)?;
    let angle = base.low_angle.unwrap_or(0.0);
    let mut bottom = base.component.interface("bottom")?.clone();
    let mut bottom_back = base.component.interface("bottom_b")?.clone();

    let mut root = Component::new("SkirtLevels");
    root.set_interface("top", base.component.interface("top")?.clone());
    root.add_component(base.component)?;

    let ruffle = config.level_ruffle;
    let mut level_body = body.clone();
    for i in 0..config.num_levels {
        let waist = ruffle * root.interface_length(&bottom)?;
        let back_width = ruffle * root.interface_length(&bottom_back)?;
        level_body = level_body.with_waist(waist).with_waist_back_width(back_width);

        let mut tier = config
            .level
            .build(&format!("skirt_{i}"), &level_body, design, lengths.level)?
            .component;
        tier.rotate_by(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), (-angle).to_radians()));
        let top = tier.interface("top")?.clone();
        tier.place_by_interface(&top, &bottom, &root, TIER_GAP)?;

        let next_bottom = tier.interface("bottom")?.clone();
        let next_back = tier.interface("bottom_b")?.clone();
        root.add_component(tier)?;
        root.stitch_gathered(std::mem::replace(&mut bottom, next_bottom), top, ruffle)?;
        bottom_back = next_back;

        debug!(level = i, waist, back_width, length = lengths.level, "Added skirt tier");
    }
    Ok(root)
}

/// Names of the tier components in stacking order.
#[must_use]
pub fn tier_names(root: &Component) -> Vec<&str> {
    root.children()
        .iter()
        .filter_map(|child| match child {
            Node::Component(c) => Some(c.name()),
            Node::Panel(_) => None,
        })
        .collect()
}
