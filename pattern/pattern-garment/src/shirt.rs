//! Fitted shirt built from two mirrored bodice halves.

use nalgebra::Vector3;
use pattern_assembly::Component;
use tracing::debug;

use crate::attach::{SleeveAttachment, attach_collar, attach_sleeve};
use crate::bodice::{BodiceBack, BodiceFront};
use crate::body::Body;
use crate::design::Design;
use crate::error::GarmentResult;
use crate::sleeve::SleeveOpening;

/// Distance of the bodice panels from the body centre plane.
const DEPTH_OFFSET: f64 = 20.0;

/// One half of a fitted shirt, drafted for the right side of the body.
///
/// Exports `front_inside`, `back_inside`, `front_bottom` and `back_bottom`.
///
/// The armhole seams are kept as two separate rules (front cap to front
/// armhole, back cap to back armhole). Joining them into one interface would
/// need an edge order across both panels that the draft does not define; a
/// caller that wants a single armhole has to chain them itself with
/// [`pattern_assembly::Interface::chain`] in an order of its choosing.
///
/// # Errors
///
/// Besides infeasible darts and cuts, a design with `sleeve_shape` off is
/// rejected as [`crate::GarmentError::InvalidDesign`]: without armholes the
/// front and back shoulders cannot be sewn together.
pub fn fitted_shirt_half(tag: &str, body: &Body, design: &Design) -> GarmentResult<Component> {
    design.bodice.require_armholes()?;
    let BodiceFront {
        panel: mut front,
        draft: front_draft,
    } = BodiceFront::build(&format!("{tag}_ftorso"), body, design)?;
    let BodiceBack {
        panel: mut back,
        draft: back_draft,
    } = BodiceBack::build(&format!("{tag}_btorso"), body, design)?;
    front.translate_by(Vector3::new(0.0, 0.0, DEPTH_OFFSET));
    back.translate_by(Vector3::new(0.0, 0.0, -DEPTH_OFFSET));

    let opening = SleeveOpening::new(tag, body, &design.sleeve, front_draft.width - back_draft.width)?;
    let attachment = attach_sleeve(&mut front, &mut back, opening, design.bodice.sleeveless)?;

    let bodice = &design.bodice;
    attach_collar(&mut front, bodice.f_collar, bodice.fc_depth, body.neck_w)?;
    attach_collar(&mut back, bodice.b_collar, bodice.bc_depth, body.neck_w)?;

    let side = (front.interface("outside")?.clone(), back.interface("outside")?.clone());
    let shoulder = (front.interface("shoulder")?.clone(), back.interface("shoulder")?.clone());
    let exports = [
        ("front_inside", front.interface("inside")?.clone()),
        ("back_inside", back.interface("inside")?.clone()),
        ("front_bottom", front.interface("bottom")?.clone()),
        ("back_bottom", back.interface("bottom")?.clone()),
    ];

    let mut half = Component::new(tag);
    half.add_panel(front)?;
    half.add_panel(back)?;

    if let SleeveAttachment::Sleeve { sleeve, seams } = attachment {
        half.add_component(sleeve)?;
        for (cap, armhole) in seams {
            half.stitch(cap, armhole)?;
        }
    }

    half.stitch(side.0, side.1)?;
    half.stitch(shoulder.0, shoulder.1)?;
    for (name, interface) in exports {
        half.set_interface(name, interface);
    }

    debug!(half = %tag, panels = half.panels().len(), seams = half.rules().len(), "Built shirt half");
    Ok(half)
}

/// Fitted shirt: a right half and its mirror image sewn at centre front and
/// centre back.
///
/// Exports `right_front_bottom`, `right_back_bottom`, `left_front_bottom`
/// and `left_back_bottom`.
pub fn fitted_shirt(body: &Body, design: &Design) -> GarmentResult<Component> {
    let right = fitted_shirt_half("right", body, design)?;
    let mut left = fitted_shirt_half("left", body, design)?;
    left.mirror();

    let mut shirt = Component::new("FittedShirt");
    for (side, half) in [("right", &right), ("left", &left)] {
        for part in ["front", "back"] {
            let bottom = half.interface(&format!("{part}_bottom"))?.clone();
            shirt.set_interface(format!("{side}_{part}_bottom"), bottom);
        }
    }
    let front = (
        right.interface("front_inside")?.clone(),
        left.interface("front_inside")?.clone(),
    );
    let back = (
        right.interface("back_inside")?.clone(),
        left.interface("back_inside")?.clone(),
    );

    shirt.add_component(right)?;
    shirt.add_component(left)?;
    shirt.stitch(front.0, front.1)?;
    shirt.stitch(back.0, back.1)?;
    Ok(shirt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GarmentError;
    use crate::body::tests::sample_body;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_with_sleeve() {
        let half = fitted_shirt_half("right", &sample_body(), &Design::default()).unwrap();
        assert_eq!(
            half.panel_names(),
            ["right_ftorso", "right_btorso", "right_sleeve_f", "right_sleeve_b"]
        );
        // Two armholes, side and shoulder.
        assert_eq!(half.rules().len(), 4);
        assert!(half.validate().is_valid());
    }

    #[test]
    fn test_sleeveless_half() {
        let mut design = Design::default();
        design.bodice.sleeveless = true;
        let half = fitted_shirt_half("right", &sample_body(), &design).unwrap();
        assert_eq!(half.panel_names(), ["right_ftorso", "right_btorso"]);
        assert_eq!(half.rules().len(), 2);
    }

    #[test]
    fn test_without_armholes_is_a_design_error() {
        let mut design = Design::default();
        design.bodice.sleeve_shape = false;
        let err = fitted_shirt_half("right", &sample_body(), &design).unwrap_err();
        assert!(matches!(err, GarmentError::InvalidDesign { field: "bodice.sleeve_shape", .. }));
        assert!(!err.is_mismatched_stitch());
    }

    #[test]
    fn test_whole_shirt() {
        let body = sample_body();
        let shirt = fitted_shirt(&body, &Design::default()).unwrap();
        assert_eq!(shirt.panels().len(), 8);
        assert_eq!(shirt.rules().len(), 2);
        assert_eq!(shirt.interfaces().len(), 4);

        let right = shirt.interface("right_front_bottom").unwrap();
        let left = shirt.interface("left_front_bottom").unwrap();
        assert_relative_eq!(
            shirt.interface_length(right).unwrap(),
            shirt.interface_length(left).unwrap(),
            epsilon = 1e-12
        );
        assert!(shirt.validate().is_valid());
    }
}
