//! Grafting sleeve openings and necklines onto bodice corners.
//!
//! Sleeves and collars differ: a sleeve is a separate component sewn to the
//! cut it leaves, while a neckline is only a cut and adds no seam.

use pattern_assembly::{Component, Interface, Panel};
use pattern_types::EdgeSequence;
use tracing::debug;

use crate::collar::CollarShape;
use crate::error::{FeatureContext, GarmentResult};
use crate::sleeve::SleeveOpening;

/// Outcome of cutting armholes into a bodice half.
#[derive(Debug, Clone)]
pub enum SleeveAttachment {
    /// A sleeve is kept, with the seams pairing its caps to the armholes.
    Sleeve {
        /// The sleeve component.
        sleeve: Component,
        /// `(sleeve cap, armhole)` for the front and the back.
        seams: [(Interface, Interface); 2],
    },
    /// Only the armholes are cut.
    CutOnly {
        /// Front and back armhole edges.
        armholes: [Interface; 2],
    },
}

/// Replace the corner a panel exports as `corner` with `shape`.
///
/// Returns an interface over the new boundary edges.
///
/// # Errors
///
/// [`crate::GarmentError::InfeasibleGeometry`] if the shape cannot be placed
/// between the two corner edges.
pub fn attach_corner(panel: &mut Panel, corner: &str, shape: &EdgeSequence) -> GarmentResult<Interface> {
    let reference = panel.interface(corner)?.clone();
    let name = panel.name().to_string();
    panel.cut_corner(&reference, shape).at(&name, corner)
}

/// Cut the sleeve openings into both shoulder corners.
///
/// When `sleeveless` is set the sleeve component is dropped and only the
/// cuts remain.
pub fn attach_sleeve(
    front: &mut Panel,
    back: &mut Panel,
    opening: SleeveOpening,
    sleeveless: bool,
) -> GarmentResult<SleeveAttachment> {
    let front_armhole = attach_corner(front, "shoulder_corner", opening.in_front_shape())?;
    let back_armhole = attach_corner(back, "shoulder_corner", opening.in_back_shape())?;

    if sleeveless {
        debug!(front = %front.name(), back = %back.name(), "Cut armholes without sleeve");
        return Ok(SleeveAttachment::CutOnly {
            armholes: [front_armhole, back_armhole],
        });
    }

    let sleeve = opening.into_sleeve();
    let front_cap = sleeve.interface("in_front")?.clone();
    let back_cap = sleeve.interface("in_back")?.clone();
    Ok(SleeveAttachment::Sleeve {
        sleeve,
        seams: [(front_cap, front_armhole), (back_cap, back_armhole)],
    })
}

/// Cut a neckline into the panel's collar corner.
pub fn attach_collar(panel: &mut Panel, shape: CollarShape, depth: f64, neck_w: f64) -> GarmentResult<()> {
    let neckline = shape.shape(depth, neck_w)?;
    attach_corner(panel, "collar_corner", &neckline)?;
    debug!(panel = %panel.name(), collar = %shape, depth, "Cut neckline");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodice::{BodiceBack, BodiceFront};
    use crate::body::tests::sample_body;
    use crate::design::Design;
    use approx::assert_relative_eq;

    fn halves() -> (BodiceFront, BodiceBack, SleeveOpening) {
        let body = sample_body();
        let design = Design::default();
        let front = BodiceFront::build("ftorso", &body, &design).unwrap();
        let back = BodiceBack::build("btorso", &body, &design).unwrap();
        let opening =
            SleeveOpening::new("right", &body, &design.sleeve, front.draft.width - back.draft.width).unwrap();
        (front, back, opening)
    }

    #[test]
    fn test_armholes_leave_matching_seams() {
        let (mut front, mut back, opening) = halves();
        let attachment = attach_sleeve(&mut front.panel, &mut back.panel, opening, false).unwrap();
        assert!(matches!(attachment, SleeveAttachment::Sleeve { .. }));

        for name in ["outside", "shoulder"] {
            let f = front.panel.interface(name).unwrap().length(&front.panel).unwrap();
            let b = back.panel.interface(name).unwrap().length(&back.panel).unwrap();
            assert_relative_eq!(f, b, epsilon = 1e-9);
        }
        assert!(front.panel.edges().is_clockwise());
        assert!(back.panel.edges().is_clockwise());
    }

    #[test]
    fn test_sleeveless_keeps_only_cut() {
        let (mut front, mut back, opening) = halves();
        let before = front.panel.edges().len();
        let attachment = attach_sleeve(&mut front.panel, &mut back.panel, opening, true).unwrap();
        match attachment {
            SleeveAttachment::CutOnly { armholes } => assert_eq!(armholes[0].len(), 2),
            SleeveAttachment::Sleeve { .. } => panic!("sleeve kept"),
        }
        assert_eq!(front.panel.edges().len(), before + 2);
    }

    #[test]
    fn test_collar_adds_no_rule() {
        let (mut front, _, _) = halves();
        let rules = front.panel.rules().len();
        attach_collar(&mut front.panel, CollarShape::CircleNeckHalf, 12.0, 18.0).unwrap();
        assert_eq!(front.panel.rules().len(), rules);
        assert!(front.panel.edges().closure_gap() < 1e-6);
    }

    #[test]
    fn test_too_deep_collar_is_infeasible() {
        let (mut front, _, _) = halves();
        let err = attach_collar(&mut front.panel, CollarShape::VNeckHalf, 200.0, 18.0).unwrap_err();
        assert!(err.is_infeasible());
    }
}
