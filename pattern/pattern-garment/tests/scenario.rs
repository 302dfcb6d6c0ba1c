//! Fitted shirt built for a reference body.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use pattern_assembly::DEFAULT_TOLERANCE;
use pattern_garment::{Body, CollarShape, Design, FrontDraft, Garment, fitted_shirt};

fn reference_body() -> Body {
    Body::from_json(
        r#"{
            "bust": 92, "waist": 70, "back_width": 36,
            "bust_line": 24, "waist_line": 40, "waist_over_bust_line": 44,
            "shoulder_incl": 18, "neck_w": 18, "height": 170, "head_l": 22,
            "hips_line": 22, "bust_points": 18
        }"#,
    )
    .unwrap()
}

fn reference_design() -> Design {
    Design::from_json(r#"{ "bodice": { "ease": { "v": 2 } } }"#).unwrap()
}

#[test]
fn front_draft_follows_the_formulas() {
    let draft = FrontDraft::compute(&reference_body(), &reference_design());
    let tan = 18f64.to_radians().tan();
    let front_frac = 28.0 / 92.0;

    let width = front_frac * 94.0;
    let waist = front_frac * 72.0;
    let side_len = 40.0 - tan * (front_frac - (0.5 - front_frac)) * 92.0;

    assert_relative_eq!(draft.width, width, epsilon = 1e-12);
    assert_relative_eq!(draft.side_dart.width, 44.0 - side_len, epsilon = 1e-12);
    assert_relative_eq!(draft.side_dart.depth, 0.8 * (width - 9.0), epsilon = 1e-12);
    assert_relative_eq!(draft.bottom_dart.width, (width - waist) * 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(draft.bottom_dart.depth, 16.0, epsilon = 1e-12);

    // Rounded reference values.
    assert_relative_eq!(draft.width, 28.609, epsilon = 1e-3);
    assert_relative_eq!(draft.side_dart.width, 7.249, epsilon = 1e-3);
    assert_relative_eq!(draft.side_dart.depth, 15.687, epsilon = 1e-3);
    assert_relative_eq!(draft.bottom_dart.width, 4.464, epsilon = 1e-3);
}

#[test]
fn shirt_has_expected_seams() {
    let shirt = fitted_shirt(&reference_body(), &reference_design()).unwrap();
    let rules = shirt.all_rules();

    let mut side = 0;
    let mut shoulder = 0;
    for tag in ["right", "left"] {
        let front = shirt.panel(&format!("{tag}_ftorso")).unwrap();
        let back = shirt.panel(&format!("{tag}_btorso")).unwrap();
        assert_eq!(front.rules().len(), 2, "{tag} front darts");
        assert_eq!(back.rules().len(), 1, "{tag} back dart");

        for rule in &rules {
            let joins = |name: &str| {
                rule.a() == front.interface(name).unwrap() && rule.b() == back.interface(name).unwrap()
            };
            if joins("outside") {
                side += 1;
            }
            if joins("shoulder") {
                shoulder += 1;
            }
        }
    }
    assert_eq!(side, 2);
    assert_eq!(shoulder, 2);
}

#[test]
fn every_seam_and_loop_is_consistent() {
    let shirt = fitted_shirt(&reference_body(), &reference_design()).unwrap();
    for rule in shirt.all_rules() {
        rule.check(&shirt, DEFAULT_TOLERANCE).unwrap();
    }
    for panel in shirt.panels() {
        assert!(panel.edges().closure_gap() <= 1e-6, "{} is open", panel.name());
        assert!(panel.edges().is_clockwise(), "{} is inverted", panel.name());
    }
}

#[test]
fn every_collar_fits_the_reference_body() {
    let body = reference_body();
    for front in CollarShape::ALL {
        for back in CollarShape::ALL {
            let mut design = reference_design();
            design.bodice.f_collar = front;
            design.bodice.b_collar = back;
            let pattern = Garment::FittedShirt.build(&body, &design).unwrap();
            assert_eq!(pattern.panels.len(), 8, "{front}/{back}");
        }
    }
}

#[test]
fn pattern_refers_to_edges_by_index() {
    let pattern = Garment::FittedShirt
        .build(&reference_body(), &reference_design())
        .unwrap();
    for stitch in &pattern.stitches {
        for side in [&stitch.a, &stitch.b] {
            for edge in side {
                let panel = pattern.panel(&edge.panel).unwrap();
                assert!(edge.edge < panel.vertices.len());
            }
        }
    }
}
