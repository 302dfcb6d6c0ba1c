//! Fitted bodice halves.
//!
//! Both panels are drafted for the right half of the body in local
//! coordinates: the centre line is `x = 0`, the side seam lies at negative
//! `x` and the waist at `y = 0`. Loops run clockwise starting at the centre
//! waist corner.
//!
//! Drafting numbers come from [`FrontDraft`] and [`BackDraft`], which are
//! pure functions of the body and design and can be checked on their own.

use nalgebra::{Point2, Vector3};
use pattern_assembly::Panel;
use pattern_types::Side;
use tracing::debug;

use crate::body::Body;
use crate::design::Design;
use crate::error::{FeatureContext, GarmentError, GarmentResult};

/// Side dart depth as a fraction of the distance from the side to the bust point.
pub const SIDE_DART_DEPTH_FRAC: f64 = 0.8;

/// Share of the bust-to-waist difference taken out by bottom darts.
pub const BOTTOM_DART_WIDTH_FRAC: f64 = 2.0 / 3.0;

/// Back dart depth as a fraction of the bust-to-waist distance.
pub const BACK_DART_DEPTH_FRAC: f64 = 0.9;

/// Width, depth and centre position of a dart along its host edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DartSpec {
    /// Opening width on the host edge.
    pub width: f64,
    /// Distance from the host edge to the apex.
    pub depth: f64,
    /// Distance of the dart centre from the host edge start.
    pub offset: f64,
}

/// Length of the side piece left between the hem corner and a bottom dart
/// when the hem is pulled in by `removed` over a height of `rise`.
fn slant(removed: f64, rise: f64) -> f64 {
    removed.hypot(rise)
}

// ============================================================================
// Front
// ============================================================================

/// Drafting numbers of the front half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontDraft {
    /// Half-width at the bust line.
    pub width: f64,
    /// Half-width at the waist.
    pub waist: f64,
    /// Height of the side corner below the armhole.
    pub max_len: f64,
    /// Side length after the incline correction.
    pub side_len: f64,
    /// Waist to bust line distance.
    pub bust_rise: f64,
    /// Shoulder rise across the half-width.
    pub shoulder_rise: f64,
    /// Dart cut into the side seam.
    pub side_dart: DartSpec,
    /// Dart cut into the waist.
    pub bottom_dart: DartSpec,
    /// Length of the slanted side piece below the side dart.
    pub side_slant: f64,
}

impl FrontDraft {
    /// Compute the front draft.
    #[must_use]
    pub fn compute(body: &Body, design: &Design) -> Self {
        let ease = design.bodice.ease;
        let bust = body.bust + ease;
        let waist_girth = body.waist + ease;
        let tan = body.shoulder_incl_rad().tan();

        let front_frac = (body.bust - body.back_width) / 2.0 / body.bust;
        let width = front_frac * bust;
        let waist = front_frac * waist_girth;

        // Front and back shares differ, so the shoulder line meets the side at different heights.
        let share_diff = (front_frac - (0.5 - front_frac)) * body.bust;
        let side_len = body.waist_line - tan * share_diff;
        let max_len = body.waist_over_bust_line;
        let bust_rise = body.waist_line - body.bust_line;

        let side_width = max_len - side_len;
        let side_dart = DartSpec {
            width: side_width,
            depth: SIDE_DART_DEPTH_FRAC * (width - body.bust_points / 2.0),
            offset: bust_rise + side_width / 2.0,
        };
        let bottom_dart = DartSpec {
            width: (width - waist) * BOTTOM_DART_WIDTH_FRAC,
            depth: bust_rise,
            offset: body.bust_points / 2.0,
        };

        Self {
            width,
            waist,
            max_len,
            side_len,
            bust_rise,
            shoulder_rise: width * tan,
            side_dart,
            bottom_dart,
            side_slant: slant(width - waist - bottom_dart.width, bust_rise),
        }
    }
}

/// Front half of a fitted bodice.
#[derive(Debug, Clone)]
pub struct BodiceFront {
    /// The drafted panel with its interfaces.
    pub panel: Panel,
    /// Numbers it was drafted from.
    pub draft: FrontDraft,
}

impl BodiceFront {
    /// Draft the front panel.
    ///
    /// The panel exports `outside` (side seam), `inside` (centre front),
    /// `shoulder`, `bottom` and the corner references `shoulder_corner` and
    /// `collar_corner`. Two dart seams are recorded on the panel.
    ///
    /// # Errors
    ///
    /// [`crate::GarmentError::InfeasibleGeometry`] if a dart does not fit.
    pub fn build(name: &str, body: &Body, design: &Design) -> GarmentResult<Self> {
        let d = FrontDraft::compute(body, design);
        let mut panel = Panel::from_verts(
            name,
            [
                [0.0, 0.0],
                [-d.width, 0.0],
                [-d.width, d.max_len],
                [0.0, d.max_len + d.shoulder_rise],
            ],
        )?;

        let side = panel.edge_id(1)?;
        let side_dart = panel
            .insert_dart(side, d.side_dart.width, d.side_dart.depth, d.side_dart.offset, Side::Right)
            .at(name, "side dart")?;

        let bottom = panel.edge_id(0)?;
        let bottom_dart = panel
            .insert_dart(bottom, d.bottom_dart.width, d.bottom_dart.depth, d.bottom_dart.offset, Side::Right)
            .at(name, "bottom dart")?;

        // Pull the side corner in so the waist measures the target after the dart.
        let corner = Point2::new(-(d.waist + d.bottom_dart.width), 0.0);
        let leg = panel.edge(bottom_dart.outer[1])?;
        if corner.x >= leg.start.x {
            return Err(GarmentError::InfeasibleGeometry {
                panel: name.to_string(),
                feature: "waist trim".to_string(),
                reason: format!(
                    "waist corner at x = {:.3} falls inside the bottom dart ending at x = {:.3}",
                    corner.x, leg.start.x
                ),
            });
        }
        panel.set_edge_end(bottom_dart.outer[1], corner).at(name, "waist trim")?;

        let inside = panel.edge_id_from_end(1)?;
        let shoulder = panel.edge_id_from_end(2)?;
        let upper_side = panel.edge_id_from_end(3)?;
        panel.set_interface("outside", panel.interface_of(side_dart.outer));
        panel.set_interface("inside", panel.interface_of([inside]));
        panel.set_interface("shoulder", panel.interface_of([shoulder]));
        panel.set_interface("bottom", panel.interface_of(bottom_dart.outer));
        panel.set_interface("shoulder_corner", panel.interface_of([upper_side, shoulder]));
        panel.set_interface("collar_corner", panel.interface_of([shoulder, inside]));

        panel.translate_by(Vector3::new(0.0, body.height - body.head_l - d.max_len, 0.0));
        debug!(panel = %name, width = d.width, waist = d.waist, "Drafted bodice front");
        Ok(Self { panel, draft: d })
    }
}

// ============================================================================
// Back
// ============================================================================

/// Drafting numbers of the back half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackDraft {
    /// Half-width at the bust line.
    pub width: f64,
    /// Half-width at the waist.
    pub waist: f64,
    /// Half-width at the waist before the dart is taken out.
    pub waist_width: f64,
    /// Height of the side corner below the armhole.
    pub side_height: f64,
    /// Waist to bust line distance.
    pub bust_rise: f64,
    /// Shoulder rise across the half-width.
    pub shoulder_rise: f64,
    /// Dart cut into the waist.
    pub bottom_dart: DartSpec,
    /// Length of the slanted side piece below the bust line.
    pub side_slant: f64,
}

impl BackDraft {
    /// Compute the back draft.
    ///
    /// The side height is chosen so the back side seam measures the same as
    /// the front one after the front side dart is closed.
    #[must_use]
    pub fn compute(body: &Body, design: &Design) -> Self {
        let front = FrontDraft::compute(body, design);
        let ease = design.bodice.ease;
        let bust = body.bust + ease;
        let tan = body.shoulder_incl_rad().tan();

        let back_frac = body.back_width / body.bust / 2.0;
        let width = back_frac * bust;
        let waist = back_frac * (body.waist + ease);
        let removed = (width - waist) / 3.0;
        let bust_rise = body.waist_line - body.bust_line;
        let side_slant = slant(removed, bust_rise);

        Self {
            width,
            waist,
            waist_width: width - removed,
            side_height: front.side_len + front.side_slant - side_slant,
            bust_rise,
            shoulder_rise: width * tan,
            bottom_dart: DartSpec {
                width: (width - waist) * BOTTOM_DART_WIDTH_FRAC,
                depth: BACK_DART_DEPTH_FRAC * bust_rise,
                offset: body.bust_points / 2.0,
            },
            side_slant,
        }
    }
}

/// Back half of a fitted bodice.
#[derive(Debug, Clone)]
pub struct BodiceBack {
    /// The drafted panel with its interfaces.
    pub panel: Panel,
    /// Numbers it was drafted from.
    pub draft: BackDraft,
}

impl BodiceBack {
    /// Draft the back panel.
    ///
    /// Exports the same interface names as [`BodiceFront::build`]. One waist
    /// dart is recorded on the panel.
    pub fn build(name: &str, body: &Body, design: &Design) -> GarmentResult<Self> {
        let d = BackDraft::compute(body, design);
        let mut panel = Panel::from_verts(
            name,
            [
                [0.0, 0.0],
                [-d.waist_width, 0.0],
                [-d.width, d.bust_rise],
                [-d.width, d.side_height],
                [0.0, d.side_height + d.shoulder_rise],
            ],
        )?;

        let lower_side = panel.edge_id(1)?;
        let upper_side = panel.edge_id(2)?;
        let shoulder = panel.edge_id(3)?;
        let inside = panel.edge_id(4)?;
        panel.set_interface("outside", panel.interface_of([lower_side, upper_side]));
        panel.set_interface("inside", panel.interface_of([inside]));
        panel.set_interface("shoulder", panel.interface_of([shoulder]));
        panel.set_interface("shoulder_corner", panel.interface_of([upper_side, shoulder]));
        panel.set_interface("collar_corner", panel.interface_of([shoulder, inside]));

        let bottom = panel.edge_id(0)?;
        let dart = panel
            .insert_dart(bottom, d.bottom_dart.width, d.bottom_dart.depth, d.bottom_dart.offset, Side::Right)
            .at(name, "bottom dart")?;
        panel.set_interface("bottom", panel.interface_of(dart.outer));

        panel.translate_by(Vector3::new(0.0, body.height - body.head_l - d.side_height, 0.0));
        debug!(panel = %name, width = d.width, side_height = d.side_height, "Drafted bodice back");
        Ok(Self { panel, draft: d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::tests::sample_body;
    use approx::assert_relative_eq;

    fn length(panel: &Panel, name: &str) -> f64 {
        panel.interface(name).unwrap().length(panel).unwrap()
    }

    #[test]
    fn test_front_draft_numbers() {
        let body = sample_body();
        let d = FrontDraft::compute(&body, &Design::default());
        let tan = 18f64.to_radians().tan();

        let front_frac = (92.0 - 36.0) / 2.0 / 92.0;
        let width = front_frac * 94.0;
        let waist = front_frac * 72.0;
        let side_len = 40.0 - tan * (2.0 * front_frac - 0.5) * 92.0;

        assert_relative_eq!(d.width, width, epsilon = 1e-12);
        assert_relative_eq!(d.side_dart.width, 44.0 - side_len, epsilon = 1e-12);
        assert_relative_eq!(d.side_dart.depth, 0.8 * (width - 9.0), epsilon = 1e-12);
        assert_relative_eq!(d.side_dart.offset, 16.0 + (44.0 - side_len) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(d.bottom_dart.width, (width - waist) * 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(d.bottom_dart.depth, 16.0, epsilon = 1e-12);
        assert_relative_eq!(d.bottom_dart.offset, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_front_panel() {
        let body = sample_body();
        let front = BodiceFront::build("ftorso", &body, &Design::default()).unwrap();
        let panel = &front.panel;

        assert_eq!(panel.edges().len(), 10);
        assert_eq!(panel.rules().len(), 2);
        assert!(panel.edges().is_clockwise());
        assert!(panel.edges().closure_gap() < 1e-6);

        // Waist measures the target once the dart is closed.
        assert_relative_eq!(length(panel, "bottom"), front.draft.waist, epsilon = 1e-9);
        // Closing the side dart leaves the corrected side length.
        let expected = front.draft.side_slant + front.draft.side_len - front.draft.bust_rise;
        assert_relative_eq!(length(panel, "outside"), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_back_side_matches_front_side() {
        let body = sample_body();
        let design = Design::default();
        let front = BodiceFront::build("ftorso", &body, &design).unwrap();
        let back = BodiceBack::build("btorso", &body, &design).unwrap();

        assert_eq!(back.panel.rules().len(), 1);
        assert!(back.panel.edges().is_clockwise());
        assert_relative_eq!(
            length(&front.panel, "outside"),
            length(&back.panel, "outside"),
            epsilon = 1e-9
        );
        assert_relative_eq!(length(&back.panel, "bottom"), back.draft.waist, epsilon = 1e-9);
        assert_relative_eq!(back.draft.waist, 36.0 / 92.0 / 2.0 * 72.0, epsilon = 1e-12);
    }

    #[test]
    fn test_infeasible_side_dart_names_panel() {
        let mut body = sample_body();
        // The side corner sits below the corrected side length: no room for a dart.
        body.waist_over_bust_line = 30.0;
        let err = BodiceFront::build("ftorso", &body, &Design::default()).unwrap_err();
        assert!(err.is_infeasible());
        let msg = err.to_string();
        assert!(msg.contains("ftorso"));
        assert!(msg.contains("side dart"));
    }

    #[test]
    fn test_bottom_dart_deeper_than_waist_edge() {
        let mut body = sample_body();
        body.bust_line = 14.0;
        body.waist_line = 46.0;
        body.waist_over_bust_line = 50.0;
        let d = FrontDraft::compute(&body, &Design::default());
        assert!(d.bottom_dart.depth > d.width);

        let err = BodiceFront::build("ftorso", &body, &Design::default()).unwrap_err();
        assert!(err.is_infeasible());
        assert!(err.to_string().contains("bottom dart"));
    }

    #[test]
    fn test_waist_trim_past_dart_is_infeasible() {
        let mut body = sample_body();
        // Bust points so wide the trimmed waist corner would land inside the dart.
        body.bust_points = 50.0;
        let err = BodiceFront::build("ftorso", &body, &Design::default()).unwrap_err();
        assert!(err.is_infeasible());
        assert!(err.to_string().contains("waist trim"));
    }
}
