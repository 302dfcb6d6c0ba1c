//! Mirroring a shirt half keeps its panels and seam lengths.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use hashbrown::HashSet;
use pattern_garment::{Body, Design, fitted_shirt_half};

fn body() -> Body {
    Body::from_json(
        r#"{
            "bust": 100, "waist": 82, "back_width": 40,
            "bust_line": 26, "waist_line": 42, "waist_over_bust_line": 46,
            "shoulder_incl": 20, "neck_w": 17, "height": 176, "head_l": 23,
            "hips_line": 21, "bust_points": 19
        }"#,
    )
    .unwrap()
}

#[test]
fn mirrored_half_keeps_names_and_lengths() {
    let original = fitted_shirt_half("half", &body(), &Design::default()).unwrap();
    let mut mirrored = original.clone();
    mirrored.mirror();

    let before: HashSet<&str> = original.panel_names().into_iter().collect();
    let after: HashSet<&str> = mirrored.panel_names().into_iter().collect();
    assert_eq!(before, after);

    for (name, interface) in original.interfaces() {
        let other = mirrored.interface(name).unwrap();
        assert_relative_eq!(
            original.interface_length(interface).unwrap(),
            mirrored.interface_length(other).unwrap(),
            epsilon = 1e-12
        );
    }
    for panel in original.panels() {
        let twin = mirrored.panel(panel.name()).unwrap();
        for (name, interface) in panel.interfaces() {
            assert_relative_eq!(
                interface.length(panel).unwrap(),
                twin.interface(name).unwrap().length(twin).unwrap(),
                epsilon = 1e-12
            );
        }
    }
    assert!(mirrored.validate().is_valid());
}

#[test]
fn mirrored_half_lies_on_the_other_side() {
    let original = fitted_shirt_half("half", &body(), &Design::default()).unwrap();
    let mut mirrored = original.clone();
    mirrored.mirror();

    let a = original.bounds();
    let b = mirrored.bounds();
    assert_relative_eq!(a.center().x, -b.center().x, epsilon = 1e-9);
    assert_relative_eq!(a.center().y, b.center().y, epsilon = 1e-9);
}

#[test]
fn mirroring_a_copy_leaves_the_original_untouched() {
    let original = fitted_shirt_half("half", &body(), &Design::default()).unwrap();
    let snapshot = original.panels()[0].edges().vertices().to_vec();
    let mut mirrored = original.clone();
    mirrored.mirror();
    assert_eq!(original.panels()[0].edges().vertices(), snapshot.as_slice());
}
